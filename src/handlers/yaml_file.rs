use std::path::Path;

use super::traits::{FormatHandler, HandlerError};
use super::types::Mapping;

/// YAML documents (`.yml`, `.yaml`)
///
/// Parsing is data-only: tags are dropped and their inner value is kept.
/// Merge keys (`<<: *anchor`) are applied. An empty document loads as an
/// empty mapping.
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlHandler;

impl FormatHandler for YamlHandler {
    fn name(&self) -> &'static str {
        "yaml"
    }

    fn supported_formats(&self) -> &[&str] {
        &[".yml", ".yaml"]
    }

    fn is_available(&self) -> bool {
        cfg!(feature = "yaml")
    }

    #[cfg(feature = "yaml")]
    fn parse(&self, _file: &Path, contents: &[u8]) -> Result<Mapping, HandlerError> {
        let mut document: serde_yaml::Value =
            serde_yaml::from_slice(contents).map_err(|err| HandlerError::parse("yaml", err))?;
        document
            .apply_merge()
            .map_err(|err| HandlerError::parse("yaml", err))?;

        match convert::to_json(document)? {
            serde_json::Value::Object(mapping) => Ok(mapping),
            serde_json::Value::Null => Ok(Mapping::new()),
            other => Err(HandlerError::parse(
                "yaml",
                format!("expected a mapping at the top level, found {}", convert::kind(&other)),
            )),
        }
    }

    #[cfg(not(feature = "yaml"))]
    fn parse(&self, file: &Path, _contents: &[u8]) -> Result<Mapping, HandlerError> {
        Err(HandlerError::unsupported(file))
    }
}

#[cfg(feature = "yaml")]
mod convert {
    use serde_json::{Map, Value};
    use serde_yaml::Value as Yaml;

    use super::HandlerError;

    pub fn to_json(value: Yaml) -> Result<Value, HandlerError> {
        Ok(match value {
            Yaml::Null => Value::Null,
            Yaml::Bool(b) => Value::Bool(b),
            Yaml::Number(n) => number(&n),
            Yaml::String(s) => Value::String(s),
            Yaml::Sequence(items) => Value::Array(
                items
                    .into_iter()
                    .map(to_json)
                    .collect::<Result<_, _>>()?,
            ),
            Yaml::Mapping(entries) => {
                let mut object = Map::with_capacity(entries.len());
                for (key, value) in entries {
                    object.insert(key_to_string(key)?, to_json(value)?);
                }
                Value::Object(object)
            }
            Yaml::Tagged(tagged) => to_json(tagged.value)?,
        })
    }

    fn number(n: &serde_yaml::Number) -> Value {
        if let Some(i) = n.as_i64() {
            Value::from(i)
        } else if let Some(u) = n.as_u64() {
            Value::from(u)
        } else {
            n.as_f64().map(Value::from).unwrap_or(Value::Null)
        }
    }

    /// Scalar keys are stringified; sequences and mappings cannot be keys
    fn key_to_string(key: Yaml) -> Result<String, HandlerError> {
        match key {
            Yaml::String(s) => Ok(s),
            Yaml::Bool(b) => Ok(b.to_string()),
            Yaml::Number(n) => Ok(n.to_string()),
            Yaml::Null => Ok("null".to_string()),
            Yaml::Tagged(tagged) => key_to_string(tagged.value),
            Yaml::Sequence(_) | Yaml::Mapping(_) => Err(HandlerError::parse(
                "yaml",
                "mapping keys must be scalars",
            )),
        }
    }

    pub fn kind(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "a boolean",
            Value::Number(_) => "a number",
            Value::String(_) => "a string",
            Value::Array(_) => "a sequence",
            Value::Object(_) => "a mapping",
        }
    }
}


#[cfg(test)]
mod availability_tests {
    use super::*;

    #[test]
    fn test_availability_follows_feature() {
        assert_eq!(YamlHandler.is_available(), cfg!(feature = "yaml"));
        assert!(YamlHandler.matches(Path::new("config.yaml")));
    }

    #[cfg(not(feature = "yaml"))]
    #[test]
    fn test_parse_without_feature_is_unsupported() {
        let err = YamlHandler
            .parse(Path::new("config.yaml"), b"a: 1\n")
            .unwrap_err();
        assert!(matches!(err, HandlerError::Unsupported { ref extension } if extension == ".yaml"));
    }
}
