// libs/pingdom-cell/src/models.rs
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

// ==============================================================================
// PROBES
// ==============================================================================

/// A Pingdom probe server.
///
/// Wraps the attribute map returned by the API as-is. The accessors are
/// conveniences over well-known keys; nothing is validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Probe {
    attributes: Map<String, Value>,
}

impl Probe {
    pub fn new(attributes: Map<String, Value>) -> Self {
        Self { attributes }
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    pub fn into_attributes(self) -> Map<String, Value> {
        self.attributes
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn id(&self) -> Option<u64> {
        self.get("id").and_then(Value::as_u64)
    }

    pub fn name(&self) -> Option<&str> {
        self.str_attr("name")
    }

    pub fn country(&self) -> Option<&str> {
        self.str_attr("country")
    }

    pub fn country_iso(&self) -> Option<&str> {
        self.str_attr("countryiso")
    }

    pub fn city(&self) -> Option<&str> {
        self.str_attr("city")
    }

    pub fn region(&self) -> Option<&str> {
        self.str_attr("region")
    }

    pub fn hostname(&self) -> Option<&str> {
        self.str_attr("hostname")
    }

    pub fn ip(&self) -> Option<&str> {
        self.str_attr("ip")
    }

    pub fn ipv6(&self) -> Option<&str> {
        self.str_attr("ipv6")
    }

    pub fn is_active(&self) -> Option<bool> {
        self.get("active").and_then(Value::as_bool)
    }

    fn str_attr(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }
}

impl From<Map<String, Value>> for Probe {
    fn from(attributes: Map<String, Value>) -> Self {
        Self::new(attributes)
    }
}

// ==============================================================================
// QUERY PARAMETERS
// ==============================================================================

/// Bucket size for performance summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    #[default]
    Hour,
    Day,
    Week,
}

impl Resolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::Hour => "hour",
            Resolution::Day => "day",
            Resolution::Week => "week",
        }
    }

    /// Key under `summary` holding the buckets for this resolution.
    pub fn summary_key(&self) -> &'static str {
        match self {
            Resolution::Hour => "hours",
            Resolution::Day => "days",
            Resolution::Week => "weeks",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown resolution '{0}', expected hour, day or week")]
pub struct ParseResolutionError(String);

impl FromStr for Resolution {
    type Err = ParseResolutionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hour" => Ok(Resolution::Hour),
            "day" => Ok(Resolution::Day),
            "week" => Ok(Resolution::Week),
            _ => Err(ParseResolutionError(s.to_string())),
        }
    }
}

pub const DEFAULT_RESULTS_LIMIT: u32 = 100;

/// Parameters for `results/{checkId}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsQuery {
    pub limit: u32,
    /// Probe ids to filter on. `Some` is sent even when empty.
    pub probes: Option<Vec<String>>,
}

impl Default for ResultsQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_RESULTS_LIMIT,
            probes: None,
        }
    }
}

impl ResultsQuery {
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_probes<I, S>(mut self, probes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.probes = Some(probes.into_iter().map(Into::into).collect());
        self
    }

    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![("limit", self.limit.to_string())];
        if let Some(probes) = &self.probes {
            query.push(("probes", probes.join(",")));
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stockholm_probe() -> Probe {
        let attributes = json!({
            "id": 33,
            "country": "Sweden",
            "city": "Stockholm",
            "name": "Stockholm, Sweden",
            "active": true,
            "hostname": "s413.pingdom.com",
            "ip": "185.39.146.215",
            "ipv6": "2a02:752:100:e::4002",
            "countryiso": "SE",
            "region": "EU"
        });
        match attributes {
            Value::Object(map) => Probe::new(map),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_probe_accessors() {
        let probe = stockholm_probe();
        assert_eq!(probe.id(), Some(33));
        assert_eq!(probe.name(), Some("Stockholm, Sweden"));
        assert_eq!(probe.country(), Some("Sweden"));
        assert_eq!(probe.country_iso(), Some("SE"));
        assert_eq!(probe.city(), Some("Stockholm"));
        assert_eq!(probe.region(), Some("EU"));
        assert_eq!(probe.hostname(), Some("s413.pingdom.com"));
        assert_eq!(probe.ip(), Some("185.39.146.215"));
        assert_eq!(probe.ipv6(), Some("2a02:752:100:e::4002"));
        assert_eq!(probe.is_active(), Some(true));
    }

    #[test]
    fn test_probe_tolerates_missing_and_mistyped_attributes() {
        let probe: Probe = serde_json::from_value(json!({"id": "not-a-number"})).unwrap();
        assert_eq!(probe.id(), None);
        assert_eq!(probe.name(), None);
        assert_eq!(probe.get("id"), Some(&json!("not-a-number")));
    }

    #[test]
    fn test_probe_serializes_as_plain_map() {
        let probe = stockholm_probe();
        let value = serde_json::to_value(&probe).unwrap();
        assert_eq!(value["hostname"], "s413.pingdom.com");
        assert_eq!(Value::Object(probe.into_attributes()), value);
    }

    #[test]
    fn test_resolution_wire_values() {
        assert_eq!(Resolution::default(), Resolution::Hour);
        assert_eq!(Resolution::Hour.to_string(), "hour");
        assert_eq!(Resolution::Week.summary_key(), "weeks");
        assert_eq!("Day".parse::<Resolution>(), Ok(Resolution::Day));
        assert!("month".parse::<Resolution>().is_err());
    }

    #[test]
    fn test_results_query_defaults() {
        let query = ResultsQuery::default();
        assert_eq!(query.to_query(), vec![("limit", "100".to_string())]);
    }

    #[test]
    fn test_results_query_joins_probes() {
        let query = ResultsQuery::default().with_limit(10).with_probes(["p1", "p2"]);
        assert_eq!(
            query.to_query(),
            vec![("limit", "10".to_string()), ("probes", "p1,p2".to_string())]
        );
    }

    #[test]
    fn test_results_query_sends_empty_probe_list() {
        let query = ResultsQuery::default().with_probes(Vec::<String>::new());
        assert_eq!(query.to_query()[1], ("probes", String::new()));
    }
}
