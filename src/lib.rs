pub mod config;
pub mod fs;
pub mod handlers;
pub mod loader;
pub mod observability;
pub mod search;

pub use handlers::{FormatHandler, HandlerChain, HandlerRegistry, Mapping};
pub use loader::{ConfigLoader, LoadError};
