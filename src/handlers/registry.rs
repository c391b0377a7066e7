use std::fmt;
use std::sync::Arc;

use super::env_file::EnvHandler;
use super::json_file::JsonHandler;
use super::toml_file::TomlHandler;
use super::traits::FormatHandler;
use super::yaml_file::YamlHandler;

/// Produces a fresh handler instance each time a chain is built
pub type HandlerFactory = Arc<dyn Fn() -> Arc<dyn FormatHandler> + Send + Sync>;

/// A registered handler kind
#[derive(Clone)]
pub struct HandlerKind {
    name: String,
    factory: HandlerFactory,
}

impl HandlerKind {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn instantiate(&self) -> Arc<dyn FormatHandler> {
        (self.factory)()
    }
}

impl fmt::Debug for HandlerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HandlerKind").field(&self.name).finish()
    }
}

/// Ordered, append-only list of handler kinds
///
/// Registration order is the default dispatch priority before any reversal.
/// Registering a kind only affects chains built afterwards; chains already
/// built keep the handlers they were built with.
#[derive(Clone, Debug)]
pub struct HandlerRegistry {
    kinds: Vec<HandlerKind>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self { kinds: Vec::new() }
    }

    /// Register a handler type that can be default-constructed
    pub fn register<H>(&mut self) -> &mut Self
    where
        H: FormatHandler + Default + 'static,
    {
        let name = H::default().name();
        self.register_with(name, || Arc::new(H::default()) as Arc<dyn FormatHandler>)
    }

    /// Register a handler kind built by `factory`
    pub fn register_with<F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn() -> Arc<dyn FormatHandler> + Send + Sync + 'static,
    {
        let name = name.into();
        tracing::debug!(handler = %name, position = self.kinds.len(), "Registered format handler");
        self.kinds.push(HandlerKind {
            name,
            factory: Arc::new(factory),
        });
        self
    }

    pub fn kinds(&self) -> &[HandlerKind] {
        &self.kinds
    }

    pub fn names(&self) -> Vec<&str> {
        self.kinds.iter().map(HandlerKind::name).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.kinds.iter().any(|kind| kind.name == name)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Copy keeping only the kinds named in `names`, in registration order
    pub fn filtered<S: AsRef<str>>(&self, names: &[S]) -> Self {
        let kinds = self
            .kinds
            .iter()
            .filter(|kind| names.iter().any(|name| name.as_ref() == kind.name))
            .cloned()
            .collect();
        Self { kinds }
    }

    /// One handler instance per kind, in registration order
    pub fn instantiate_all(&self) -> Vec<Arc<dyn FormatHandler>> {
        self.kinds.iter().map(HandlerKind::instantiate).collect()
    }

    /// Create registry with the built-in handlers: env, toml, yaml, json
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry
            .register::<EnvHandler>()
            .register::<TomlHandler>()
            .register::<YamlHandler>()
            .register::<JsonHandler>();
        registry
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
