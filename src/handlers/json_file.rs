use std::path::Path;

use super::traits::{FormatHandler, HandlerError};
use super::types::Mapping;

/// JSON documents (`.json`); the top level must be an object
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonHandler;

impl FormatHandler for JsonHandler {
    fn name(&self) -> &'static str {
        "json"
    }

    fn supported_formats(&self) -> &[&str] {
        &[".json"]
    }

    fn is_available(&self) -> bool {
        cfg!(feature = "json")
    }

    #[cfg(feature = "json")]
    fn parse(&self, _file: &Path, contents: &[u8]) -> Result<Mapping, HandlerError> {
        serde_json::from_slice(contents).map_err(|err| HandlerError::parse("json", err))
    }

    #[cfg(not(feature = "json"))]
    fn parse(&self, file: &Path, _contents: &[u8]) -> Result<Mapping, HandlerError> {
        Err(HandlerError::unsupported(file))
    }
}


#[cfg(test)]
mod availability_tests {
    use super::*;

    #[test]
    fn test_availability_follows_feature() {
        assert_eq!(JsonHandler.is_available(), cfg!(feature = "json"));
        assert!(JsonHandler.matches(Path::new("settings.json")));
    }

    #[cfg(not(feature = "json"))]
    #[test]
    fn test_parse_without_feature_is_unsupported() {
        let err = JsonHandler
            .parse(Path::new("settings.json"), br#"{"a": 1}"#)
            .unwrap_err();
        assert!(matches!(err, HandlerError::Unsupported { .. }));
    }
}
