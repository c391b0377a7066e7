//! Format handlers and the chain that dispatches files to them
//!
//! ## Key Components
//!
//! - [`FormatHandler`] - Trait implemented by every file format
//! - [`HandlerRegistry`] - Ordered list of handler kinds
//! - [`HandlerChain`] - Handler instances in dispatch priority order
//! - [`EnvHandler`], [`TomlHandler`], [`YamlHandler`], [`JsonHandler`] - Built-in formats
//!
//! Each built-in format sits behind a cargo feature of the same name. A
//! handler whose feature is disabled still claims its suffixes and reports
//! [`HandlerError::Unsupported`] when asked to parse.
//!
//! ## Example
//!
//! ```rust,ignore
//! use ffder::handlers::{HandlerChain, HandlerRegistry};
//!
//! let mut registry = HandlerRegistry::with_defaults();
//! registry.register::<MyIniHandler>();
//!
//! // Later registrations are consulted first
//! let chain = HandlerChain::build(&registry, true);
//! let values = chain.dispatch(Path::new("settings.ini"))?;
//! ```

mod chain;
mod env_file;
mod json_file;
mod registry;
mod toml_file;
mod traits;
mod types;
mod yaml_file;

pub use chain::{DispatchError, HandlerChain};
pub use env_file::EnvHandler;
pub use json_file::JsonHandler;
pub use registry::{HandlerFactory, HandlerKind, HandlerRegistry};
pub use toml_file::TomlHandler;
pub use traits::{BoxError, FormatHandler, HandlerError};
pub use types::{Mapping, file_name_of, suffix_of};
pub use yaml_file::YamlHandler;
