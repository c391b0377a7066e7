use std::path::Path;

use super::traits::{FormatHandler, HandlerError};
use super::types::Mapping;

/// TOML documents (`.toml`)
#[derive(Debug, Default, Clone, Copy)]
pub struct TomlHandler;

impl FormatHandler for TomlHandler {
    fn name(&self) -> &'static str {
        "toml"
    }

    fn supported_formats(&self) -> &[&str] {
        &[".toml"]
    }

    fn is_available(&self) -> bool {
        cfg!(feature = "toml")
    }

    #[cfg(feature = "toml")]
    fn parse(&self, _file: &Path, contents: &[u8]) -> Result<Mapping, HandlerError> {
        let text = std::str::from_utf8(contents).map_err(|err| HandlerError::parse("toml", err))?;
        let table: toml::Table = toml::from_str(text).map_err(|err| HandlerError::parse("toml", err))?;

        Ok(table
            .into_iter()
            .map(|(key, value)| (key, convert::to_json(value)))
            .collect())
    }

    #[cfg(not(feature = "toml"))]
    fn parse(&self, file: &Path, _contents: &[u8]) -> Result<Mapping, HandlerError> {
        Err(HandlerError::unsupported(file))
    }
}

#[cfg(feature = "toml")]
mod convert {
    use serde_json::Value;

    /// Datetimes have no JSON counterpart and are kept in their TOML text form
    pub fn to_json(value: toml::Value) -> Value {
        match value {
            toml::Value::String(s) => Value::String(s),
            toml::Value::Integer(i) => Value::from(i),
            toml::Value::Float(f) => Value::from(f),
            toml::Value::Boolean(b) => Value::Bool(b),
            toml::Value::Datetime(dt) => Value::String(dt.to_string()),
            toml::Value::Array(items) => Value::Array(items.into_iter().map(to_json).collect()),
            toml::Value::Table(table) => Value::Object(
                table
                    .into_iter()
                    .map(|(key, value)| (key, to_json(value)))
                    .collect(),
            ),
        }
    }
}


#[cfg(test)]
mod availability_tests {
    use super::*;

    #[test]
    fn test_availability_follows_feature() {
        assert_eq!(TomlHandler.is_available(), cfg!(feature = "toml"));
        assert!(TomlHandler.matches(Path::new("settings.toml")));
    }

    #[cfg(not(feature = "toml"))]
    #[test]
    fn test_parse_without_feature_is_unsupported() {
        let err = TomlHandler
            .parse(Path::new("settings.toml"), b"a = 1\n")
            .unwrap_err();
        assert!(matches!(err, HandlerError::Unsupported { .. }));
    }
}
