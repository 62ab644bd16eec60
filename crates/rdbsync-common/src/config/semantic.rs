//! Delivery semantic of a pipeline destination

use schemars::gen::SchemaGenerator;
use schemars::schema::{InstanceType, Schema, SchemaObject};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Delivery guarantee requested for the destination
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Semantic {
    /// Every change is committed exactly once (transactional sink)
    ExactlyOnce,
    /// Changes may be replayed after a failure
    #[default]
    AtLeastOnce,
}

impl Semantic {
    /// Canonical name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExactlyOnce => "exactly-once",
            Self::AtLeastOnce => "at-least-once",
        }
    }

    /// Whether transactional commit settings apply
    pub fn is_exactly_once(&self) -> bool {
        matches!(self, Self::ExactlyOnce)
    }
}

impl fmt::Display for Semantic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Semantic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "exactly-once" => Ok(Self::ExactlyOnce),
            "at-least-once" => Ok(Self::AtLeastOnce),
            _ => Err(format!(
                "unknown semantic '{}', expected 'exactly-once' or 'at-least-once'",
                s
            )),
        }
    }
}

impl Serialize for Semantic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Semantic {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl JsonSchema for Semantic {
    fn schema_name() -> String {
        "Semantic".to_string()
    }

    fn json_schema(_gen: &mut SchemaGenerator) -> Schema {
        SchemaObject {
            instance_type: Some(InstanceType::String.into()),
            enum_values: Some(vec![
                Self::ExactlyOnce.as_str().into(),
                Self::AtLeastOnce.as_str().into(),
            ]),
            ..Default::default()
        }
        .into()
    }
}
