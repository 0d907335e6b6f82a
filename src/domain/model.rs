use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned identity of a persisted sight.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SightId(String);

impl SightId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SightId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A sight that has not been persisted yet.
///
/// Carries no identity: anything decoded into it (scraped or user submitted)
/// loses whatever `id` the source had, so only a store can hand one out.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSight {
    pub sight_name: String,
    #[serde(alias = "zoneName")]
    pub zone: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, rename = "photoURL")]
    pub photo_url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

impl NewSight {
    pub fn new(sight_name: impl Into<String>, zone: impl Into<String>) -> Self {
        Self {
            sight_name: sight_name.into(),
            zone: zone.into(),
            ..Default::default()
        }
    }

    pub fn into_sight(self, id: SightId) -> Sight {
        Sight { id, details: self }
    }
}

/// A persisted sight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sight {
    pub id: SightId,
    #[serde(flatten)]
    pub details: NewSight,
}

impl Sight {
    pub fn zone(&self) -> &str {
        &self.details.zone
    }

    pub fn sight_name(&self) -> &str {
        &self.details.sight_name
    }
}
