//! Label Server - batch label printing station
//!
//! # Overview
//!
//! A small web form for printing SKU/batch labels on a networked ZPL
//! printer:
//!
//! - **Label** (`label`): form validation, layout in dots, ZPL rendering
//! - **Printing**: raw TCP via the `label-printer` crate
//! - **Preview** (`preview`): PNG previews from the Labelary API
//! - **HTTP API** (`api`): form, print and preview routes
//!
//! # Module structure
//!
//! ```text
//! label-server/src/
//! ├── core/          # config, state, errors, server
//! ├── label/         # request, layout, renderer
//! ├── api/           # routes and HTML page
//! ├── preview.rs     # preview client
//! └── utils/         # logging
//! ```
//!
//! A submission flows render → print → preview → respond. Print and preview
//! failures are reported on the page and never affect each other.

pub mod api;
pub mod core;
pub mod label;
pub mod preview;
pub mod utils;

// Re-export public types
pub use crate::core::{Config, Server, ServerError, ServerState};
pub use label::{LabelDocument, LabelForm, LabelLayout, LabelRenderer, LabelRequest};
pub use preview::{Preview, PreviewClient, PreviewError};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

pub fn print_banner() {
    println!(
        r#"
  _           _          _
 | |    __ _ | |__   ___| |
 | |   / _` || '_ \ / _ \ |
 | |__| (_| || |_) |  __/ |
 |_____\__,_||_.__/ \___|_|
    "#
    );
}
