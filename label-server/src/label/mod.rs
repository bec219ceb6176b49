//! Label domain - request validation, layout and ZPL rendering
//!
//! Nothing in this module performs I/O.

pub mod layout;
pub mod renderer;
pub mod request;

pub use layout::{BarcodeStyle, LabelLayout, LayoutError, TextStyle};
pub use renderer::{LabelDocument, LabelRenderer};
pub use request::{LabelForm, LabelRequest, MAX_QUANTITY, ValidationError};
