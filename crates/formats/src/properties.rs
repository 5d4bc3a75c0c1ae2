//! Property-bag resolution for country datasets.
//!
//! Natural Earth, world.geo.json and geo-countries all name the same fields
//! differently; each lookup walks a fixed priority list and takes the first
//! non-empty string.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const NAME_KEYS: [&str; 6] = ["ADMIN", "NAME_LONG", "NAME", "name", "SOVEREIGNT", "COUNTRY"];
pub const ISO3_KEYS: [&str; 4] = ["ISO_A3", "iso_a3", "ADM0_A3", "WB_A3"];
pub const CONTINENT_KEYS: [&str; 5] = ["CONTINENT", "continent", "REGION_UN", "region_un", "SUBREGION"];

pub const UNKNOWN_NAME: &str = "Unknown";

pub fn first_string<'a>(props: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|k| props.get(*k).and_then(|v| v.as_str()))
        .find(|s| !s.is_empty())
}

pub fn display_name(props: &Map<String, Value>) -> &str {
    first_string(props, &NAME_KEYS).unwrap_or(UNKNOWN_NAME)
}

pub fn iso3(props: &Map<String, Value>) -> Option<&str> {
    first_string(props, &ISO3_KEYS)
}

pub fn continent(props: &Map<String, Value>) -> Option<&str> {
    first_string(props, &CONTINENT_KEYS)
}

/// Owned, serializable digest of a feature's identity fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSummary {
    pub code: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso3: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continent: Option<String>,
}

impl FeatureSummary {
    pub fn from_properties(code: u32, props: &Map<String, Value>) -> Self {
        Self {
            code,
            name: display_name(props).to_string(),
            iso3: iso3(props).map(str::to_string),
            continent: continent(props).map(str::to_string),
        }
    }
}
