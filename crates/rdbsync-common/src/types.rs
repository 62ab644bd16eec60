//! Shared value types

use schemars::JsonSchema;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Database password carried through source and destination properties
///
/// Connector configs hold their `password` fields as this type, so the
/// secret stays hidden when a `StreamSource`, a `SourceConnection` or a
/// parsed dist config is logged with `{:?}`. Writing a config back out
/// (e.g. a JSON dump of resolved properties) emits `"***REDACTED***"`.
///
/// YAML job files may leave a purely numeric password unquoted
/// (`password: 123456`); integers are read back as their decimal text.
///
/// ```rust
/// use rdbsync_common::SensitiveString;
///
/// let password = SensitiveString::new("root");
/// assert_eq!(format!("{:?}", password), "[REDACTED]");
/// assert_eq!(password.expose_secret(), "root");
/// ```
#[derive(Clone)]
pub struct SensitiveString(SecretString);

impl SensitiveString {
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretString::new(value.into().into_boxed_str()))
    }

    /// The plain password, for building a `SourceConnection` or a JDBC login
    pub fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }
}

impl PartialEq for SensitiveString {
    fn eq(&self, other: &Self) -> bool {
        self.expose_secret() == other.expose_secret()
    }
}

impl Eq for SensitiveString {}

impl std::fmt::Debug for SensitiveString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl std::fmt::Display for SensitiveString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SensitiveString {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for SensitiveString {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl Serialize for SensitiveString {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str("***REDACTED***")
    }
}

struct PasswordVisitor;

impl serde::de::Visitor<'_> for PasswordVisitor {
    type Value = SensitiveString;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("a password string or integer")
    }

    fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(SensitiveString::new(v))
    }

    fn visit_string<E: serde::de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(SensitiveString::new(v))
    }

    fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(SensitiveString::new(v.to_string()))
    }

    fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(SensitiveString::new(v.to_string()))
    }
}

impl<'de> Deserialize<'de> for SensitiveString {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PasswordVisitor)
    }
}

impl JsonSchema for SensitiveString {
    fn schema_name() -> String {
        "SensitiveString".to_string()
    }

    fn json_schema(gen: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        let mut schema = gen.subschema_for::<String>();
        if let schemars::schema::Schema::Object(obj) = &mut schema {
            obj.format = Some("password".to_string());
            obj.metadata().description =
                Some("Database password; redacted in logs and config dumps.".to_string());
        }
        schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_is_redacted() {
        let password = SensitiveString::new("s3cr3t");
        assert_eq!(format!("{:?}", password), "[REDACTED]");
        assert_eq!(format!("{}", password), "[REDACTED]");
        assert_eq!(password.expose_secret(), "s3cr3t");
    }

    #[test]
    fn test_password_serde() {
        let password: SensitiveString = serde_json::from_str("\"s3cr3t\"").unwrap();
        assert_eq!(password.expose_secret(), "s3cr3t");

        let dumped = serde_json::to_string(&password).unwrap();
        assert_eq!(dumped, "\"***REDACTED***\"");
    }

    #[test]
    fn test_unquoted_numeric_password() {
        let password: SensitiveString = serde_yaml::from_str("123456").unwrap();
        assert_eq!(password.expose_secret(), "123456");

        let password: SensitiveString = serde_yaml::from_str("-42").unwrap();
        assert_eq!(password.expose_secret(), "-42");

        let quoted: SensitiveString = serde_yaml::from_str("'007'").unwrap();
        assert_eq!(quoted.expose_secret(), "007");
    }

    #[test]
    fn test_non_scalar_password_rejected() {
        assert!(serde_yaml::from_str::<SensitiveString>("[1, 2]").is_err());
        assert!(serde_yaml::from_str::<SensitiveString>("1.5").is_err());
    }

    #[test]
    fn test_password_equality_uses_value() {
        assert_eq!(SensitiveString::from("root"), SensitiveString::new("root"));
        assert_ne!(SensitiveString::from("root"), SensitiveString::new("admin"));
    }

    #[test]
    fn test_schema_marks_password_format() {
        let schema = schemars::schema_for!(SensitiveString);
        let json = serde_json::to_value(schema).unwrap();
        assert_eq!(json["format"], "password");
    }
}
