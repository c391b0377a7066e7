use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use super::registry::HandlerRegistry;
use super::traits::{FormatHandler, HandlerError};
use super::types::Mapping;
use crate::fs::{FileSystem, LocalFileSystem};

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("file {} not found", .path.display())]
    FileNotFound { path: PathBuf },

    /// No handler in the chain claims the file
    #[error("no handler in the chain accepts {}", .path.display())]
    EndOfChain { path: PathBuf },

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: {source}", .path.display())]
    Handler {
        path: PathBuf,
        #[source]
        source: HandlerError,
    },
}

/// Format handlers in dispatch priority order
///
/// The first handler is the head. [`dispatch`](Self::dispatch) walks the
/// handlers from the head and lets the first one whose format set matches
/// the file parse it; the rest are never consulted for that file.
#[derive(Clone)]
pub struct HandlerChain {
    handlers: Vec<Arc<dyn FormatHandler>>,
    fs: Arc<dyn FileSystem>,
}

impl HandlerChain {
    /// Chain over `handlers` as given, head first
    pub fn new(handlers: Vec<Arc<dyn FormatHandler>>) -> Self {
        Self {
            handlers,
            fs: Arc::new(LocalFileSystem),
        }
    }

    /// Build a chain with one fresh handler per registered kind
    ///
    /// With `reverse` set, kinds registered later are consulted first, so a
    /// handler registered after the built-ins overrides them for the formats
    /// it claims.
    pub fn build(registry: &HandlerRegistry, reverse: bool) -> Self {
        let mut chain = Self::new(registry.instantiate_all());
        if reverse {
            chain.reverse();
        }
        tracing::debug!(chain = %chain, reverse, "Built handler chain");
        chain
    }

    pub fn with_file_system(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    /// Flip priority order in place; the tail becomes the head
    pub fn reverse(&mut self) {
        self.handlers.reverse();
    }

    pub fn head(&self) -> Option<&Arc<dyn FormatHandler>> {
        self.handlers.first()
    }

    pub fn handlers(&self) -> &[Arc<dyn FormatHandler>] {
        &self.handlers
    }

    /// Handler names in priority order
    pub fn names(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|handler| handler.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// First handler in priority order that claims `file`
    pub fn handler_for(&self, file: &Path) -> Option<&Arc<dyn FormatHandler>> {
        self.handlers.iter().find(|handler| handler.matches(file))
    }

    /// Parse `file` with the first matching handler
    ///
    /// Existence is checked before any format matching, so a missing file is
    /// reported as [`DispatchError::FileNotFound`] even when no handler
    /// would claim it.
    pub fn dispatch(&self, file: &Path) -> Result<Mapping, DispatchError> {
        if !self.fs.is_file(file) {
            return Err(DispatchError::FileNotFound {
                path: file.to_path_buf(),
            });
        }

        let Some(handler) = self.handler_for(file) else {
            tracing::debug!(file = %file.display(), "No handler accepts file");
            return Err(DispatchError::EndOfChain {
                path: file.to_path_buf(),
            });
        };

        tracing::debug!(file = %file.display(), handler = handler.name(), "Dispatching file");

        if !handler.is_available() {
            tracing::warn!(
                file = %file.display(),
                handler = handler.name(),
                "Parser for matched format is not available"
            );
        }

        let contents = self.fs.read(file).map_err(|source| DispatchError::Read {
            path: file.to_path_buf(),
            source,
        })?;

        handler
            .parse(file, &contents)
            .map_err(|source| DispatchError::Handler {
                path: file.to_path_buf(),
                source,
            })
    }
}

impl Default for HandlerChain {
    fn default() -> Self {
        Self::build(&HandlerRegistry::with_defaults(), true)
    }
}

impl fmt::Display for HandlerChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, handler) in self.handlers.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{}", handler)?;
        }
        Ok(())
    }
}

impl fmt::Debug for HandlerChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerChain")
            .field("handlers", &self.handlers)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::{EnvHandler, JsonHandler, TomlHandler, YamlHandler};
    use serde_json::{Value, json};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory files keyed by path
    #[derive(Default)]
    struct MemoryFileSystem {
        files: HashMap<PathBuf, Vec<u8>>,
        reads: Mutex<Vec<PathBuf>>,
    }

    impl MemoryFileSystem {
        fn with_file(mut self, path: &str, contents: &str) -> Self {
            self.files.insert(PathBuf::from(path), contents.as_bytes().to_vec());
            self
        }
    }

    impl FileSystem for MemoryFileSystem {
        fn is_file(&self, path: &Path) -> bool {
            self.files.contains_key(path)
        }

        fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
            self.reads.lock().unwrap().push(path.to_path_buf());
            self.files
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
        }
    }

    /// Claims `.toml` and tags its output so tests can tell who parsed
    #[derive(Default)]
    struct OverrideToml;

    impl FormatHandler for OverrideToml {
        fn name(&self) -> &'static str {
            "override-toml"
        }

        fn supported_formats(&self) -> &[&str] {
            &[".toml"]
        }

        fn is_available(&self) -> bool {
            true
        }

        fn parse(&self, _file: &Path, _contents: &[u8]) -> Result<Mapping, HandlerError> {
            let mut mapping = Mapping::new();
            mapping.insert("parsed_by".to_string(), Value::from("override"));
            Ok(mapping)
        }
    }

    /// Claims `.ini` but never has a parser
    #[derive(Default)]
    struct MissingIni;

    impl FormatHandler for MissingIni {
        fn name(&self) -> &'static str {
            "ini"
        }

        fn supported_formats(&self) -> &[&str] {
            &[".ini"]
        }

        fn is_available(&self) -> bool {
            false
        }

        fn parse(&self, file: &Path, _contents: &[u8]) -> Result<Mapping, HandlerError> {
            Err(HandlerError::unsupported(file))
        }
    }

    fn memory_chain(fs: MemoryFileSystem) -> HandlerChain {
        HandlerChain::default().with_file_system(Arc::new(fs))
    }

    #[test]
    fn test_build_reversed_priority() {
        let chain = HandlerChain::build(&HandlerRegistry::with_defaults(), true);
        assert_eq!(chain.names(), vec!["json", "yaml", "toml", "env"]);
        assert_eq!(chain.head().unwrap().name(), "json");
    }

    #[test]
    fn test_build_registration_priority() {
        let chain = HandlerChain::build(&HandlerRegistry::with_defaults(), false);
        assert_eq!(chain.names(), vec!["env", "toml", "yaml", "json"]);
    }

    #[test]
    fn test_reverse_twice_restores_order() {
        let mut chain = HandlerChain::build(&HandlerRegistry::with_defaults(), false);
        let original = chain.names();

        chain.reverse();
        assert_eq!(chain.names(), vec!["json", "yaml", "toml", "env"]);

        chain.reverse();
        assert_eq!(chain.names(), original);
    }

    #[test]
    fn test_later_registration_takes_priority() {
        let mut registry = HandlerRegistry::with_defaults();
        registry.register::<OverrideToml>();

        let fs = MemoryFileSystem::default().with_file("app/settings.toml", "TEST = true");
        let chain = HandlerChain::build(&registry, true).with_file_system(Arc::new(fs));

        let values = chain.dispatch(Path::new("app/settings.toml")).unwrap();
        assert_eq!(values["parsed_by"], json!("override"));
    }

    #[test]
    fn test_registration_order_keeps_builtin_first() {
        let mut registry = HandlerRegistry::with_defaults();
        registry.register::<OverrideToml>();

        let fs = MemoryFileSystem::default().with_file("settings.toml", "TEST = true");
        let chain = HandlerChain::build(&registry, false).with_file_system(Arc::new(fs));

        let values = chain.dispatch(Path::new("settings.toml")).unwrap();
        assert_eq!(values["TEST"], json!(true));
    }

    #[test]
    fn test_registration_after_build_does_not_affect_chain() {
        let mut registry = HandlerRegistry::new();
        registry.register::<JsonHandler>();
        let chain = HandlerChain::build(&registry, true);

        registry.register::<TomlHandler>();
        assert_eq!(chain.names(), vec!["json"]);
        assert_eq!(HandlerChain::build(&registry, true).names(), vec!["toml", "json"]);
    }

    #[test]
    fn test_dispatch_env_and_toml() {
        let fs = MemoryFileSystem::default()
            .with_file("/tmp/.env", "TEST=true")
            .with_file("/tmp/settings.toml", "TEST=true");
        let chain = memory_chain(fs);

        let env = chain.dispatch(Path::new("/tmp/.env")).unwrap();
        assert_eq!(env["TEST"], json!("true"));

        let toml = chain.dispatch(Path::new("/tmp/settings.toml")).unwrap();
        assert_eq!(toml["TEST"], json!(true));
    }

    #[test]
    fn test_missing_file_checked_before_matching() {
        let fs = MemoryFileSystem::default();
        let chain = memory_chain(fs);

        let err = chain.dispatch(Path::new("none_exists.err")).unwrap_err();
        assert!(matches!(err, DispatchError::FileNotFound { .. }));

        let err = chain.dispatch(Path::new("none_exists.toml")).unwrap_err();
        assert!(matches!(err, DispatchError::FileNotFound { .. }));
    }

    #[test]
    fn test_missing_file_on_empty_chain() {
        let chain = HandlerChain::new(Vec::new());
        let err = chain.dispatch(Path::new("definitely/missing.toml")).unwrap_err();
        assert!(matches!(err, DispatchError::FileNotFound { .. }));
    }

    #[test]
    fn test_unclaimed_file_is_end_of_chain() {
        let fs = MemoryFileSystem::default().with_file("settings.ini", "TEST=true");
        let chain = memory_chain(fs);

        let err = chain.dispatch(Path::new("settings.ini")).unwrap_err();
        assert!(matches!(err, DispatchError::EndOfChain { ref path } if path == Path::new("settings.ini")));
    }

    #[test]
    fn test_unclaimed_file_is_not_read() {
        let fs = Arc::new(MemoryFileSystem::default().with_file("settings.ini", "TEST=true"));
        let chain = HandlerChain::default().with_file_system(fs.clone());

        let _ = chain.dispatch(Path::new("settings.ini"));
        assert!(fs.reads.lock().unwrap().is_empty());
    }

    #[test]
    fn test_matched_handler_without_parser_is_unsupported() {
        let mut registry = HandlerRegistry::with_defaults();
        registry.register::<MissingIni>();

        let fs = MemoryFileSystem::default().with_file("settings.ini", "TEST=true");
        let chain = HandlerChain::build(&registry, true).with_file_system(Arc::new(fs));

        let err = chain.dispatch(Path::new("settings.ini")).unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Handler {
                source: HandlerError::Unsupported { ref extension },
                ..
            } if extension == ".ini"
        ));
    }

    #[test]
    fn test_parse_error_propagates() {
        let fs = MemoryFileSystem::default().with_file("broken.json", "{");
        let chain = memory_chain(fs);

        let err = chain.dispatch(Path::new("broken.json")).unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Handler {
                source: HandlerError::Parse { format: "json", .. },
                ..
            }
        ));
    }

    #[test]
    fn test_handler_for() {
        let chain = HandlerChain::default();
        assert_eq!(chain.handler_for(Path::new("a.yml")).unwrap().name(), "yaml");
        assert_eq!(chain.handler_for(Path::new(".env")).unwrap().name(), "env");
        assert!(chain.handler_for(Path::new("a.ini")).is_none());
    }

    #[test]
    fn test_display() {
        let chain = HandlerChain::new(vec![
            Arc::new(EnvHandler) as Arc<dyn FormatHandler>,
            Arc::new(YamlHandler),
        ]);
        assert_eq!(chain.to_string(), "env(.env) -> yaml(.yml, .yaml)");
        assert_eq!(chain.len(), 2);
        assert!(!chain.is_empty());
    }
}
