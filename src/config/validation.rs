use super::models::Settings;
use crate::handlers::HandlerRegistry;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Unknown handler '{name}' in loader.handlers (known: {known})")]
    UnknownHandler { name: String, known: String },

    #[error("Working directory '{path}' does not exist or is not a directory")]
    WorkDirNotFound { path: String },

    #[error("Log filter must not be empty")]
    EmptyLogFilter,
}

/// Validate the entire settings tree
pub fn validate(settings: &Settings) -> Result<(), ValidationError> {
    validate_handlers(settings)?;
    validate_work_dir(settings)?;
    validate_log(settings)?;
    Ok(())
}

/// Every name in `loader.handlers` must be a built-in handler
fn validate_handlers(settings: &Settings) -> Result<(), ValidationError> {
    let registry = HandlerRegistry::with_defaults();

    for name in &settings.loader.handlers {
        if !registry.contains(name) {
            return Err(ValidationError::UnknownHandler {
                name: name.clone(),
                known: registry.names().join(", "),
            });
        }
    }

    Ok(())
}

fn validate_work_dir(settings: &Settings) -> Result<(), ValidationError> {
    if let Some(ref work_dir) = settings.loader.work_dir {
        if !work_dir.is_dir() {
            return Err(ValidationError::WorkDirNotFound {
                path: work_dir.display().to_string(),
            });
        }
    }

    Ok(())
}

fn validate_log(settings: &Settings) -> Result<(), ValidationError> {
    if settings.log.filter.trim().is_empty() {
        return Err(ValidationError::EmptyLogFilter);
    }

    Ok(())
}
