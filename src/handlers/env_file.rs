use std::path::Path;

use super::traits::{FormatHandler, HandlerError};
use super::types::Mapping;

/// `KEY=VALUE` env files (`.env`)
///
/// Every value is kept as a string; no type inference is applied. A line
/// holding only a key (`FLAG`) loads as null.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvHandler;

impl FormatHandler for EnvHandler {
    fn name(&self) -> &'static str {
        "env"
    }

    fn supported_formats(&self) -> &[&str] {
        &[".env"]
    }

    fn is_available(&self) -> bool {
        cfg!(feature = "env")
    }

    #[cfg(feature = "env")]
    fn parse(&self, _file: &Path, contents: &[u8]) -> Result<Mapping, HandlerError> {
        use serde_json::Value;

        let mut values = Mapping::new();
        for item in dotenvy::from_read_iter(contents) {
            match item {
                Ok((key, value)) => {
                    values.insert(key, Value::String(value));
                }
                Err(err) => match bare_key(&err) {
                    Some(key) => {
                        values.insert(key, Value::Null);
                    }
                    None => return Err(HandlerError::parse("env", err)),
                },
            }
        }
        Ok(values)
    }

    #[cfg(not(feature = "env"))]
    fn parse(&self, file: &Path, _contents: &[u8]) -> Result<Mapping, HandlerError> {
        Err(HandlerError::unsupported(file))
    }
}

/// Key of a valueless `KEY` (or `export KEY`) line rejected by `dotenvy`
#[cfg(feature = "env")]
fn bare_key(err: &dotenvy::Error) -> Option<String> {
    let dotenvy::Error::LineParse(line, _) = err else {
        return None;
    };

    let line = line.trim();
    let key = line.strip_prefix("export ").map(str::trim_start).unwrap_or(line);
    let is_key = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');

    is_key.then(|| key.to_string())
}
