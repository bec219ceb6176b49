use label_printer::PrintError;
use thiserror::Error;

use crate::core::config::ConfigError;
use crate::label::LayoutError;
use crate::preview::PreviewError;

/// Startup and serving errors
///
/// Per-request failures (validation, printer, preview) never reach this
/// type; handlers turn them into notices on the page.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Printer error: {0}")]
    Printer(#[from] PrintError),

    #[error("Preview client error: {0}")]
    Preview(#[from] PreviewError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
