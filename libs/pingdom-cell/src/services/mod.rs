// libs/pingdom-cell/src/services/mod.rs

pub mod client;

pub use client::PingdomClient;
