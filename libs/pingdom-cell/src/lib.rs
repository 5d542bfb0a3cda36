// libs/pingdom-cell/src/lib.rs
//! # Pingdom Cell
//!
//! Client for the Pingdom REST API 2.1.
//!
//! ```text
//! +-----------------------------------------------------+
//! |                   Pingdom Cell                      |
//! +-----------------------------------------------------+
//! |  models.rs      |  Probe, Resolution, ResultsQuery  |
//! |  error.rs       |  PingdomError                     |
//! |  services/      |                                   |
//! |    client.rs    |  Authenticated API client         |
//! +-----------------------------------------------------+
//! ```
//!
//! Every request is a GET against `{base_url}/{path}` carrying HTTP basic
//! auth and an `App-Key` header. When an account email is configured the
//! multi-user authentication headers are sent as well.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use pingdom_cell::{PingdomClient, Resolution, ResultsQuery};
//! use shared_config::PingdomConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PingdomConfig::new("ops@example.com", "password", "app-key");
//! let client = PingdomClient::new(&config)?;
//!
//! let checks = client.get_checks().await?;
//! let probes = client.get_probes().await?;
//! let results = client
//!     .get_results(42, &ResultsQuery::default().with_limit(10))
//!     .await?;
//! let summary = client.get_performance_summary(42, Resolution::Day).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod models;
pub mod services;

pub use error::PingdomError;
pub use models::{Probe, Resolution, ResultsQuery};
pub use services::PingdomClient;
