//! # label-printer
//!
//! ZPL label printer library - low-level printing capabilities only.
//!
//! ## Scope
//!
//! This crate handles HOW to print:
//! - ZPL command building
//! - Network printing (raw TCP, port 9100)
//!
//! Business logic (WHAT to print) should stay in application code:
//! - Label layout and rendering → label-server
//!
//! ## Example
//!
//! ```ignore
//! use label_printer::{Justification, NetworkPrinter, Printer, ZplBuilder};
//!
//! // Build ZPL content
//! let mut builder = ZplBuilder::new();
//! builder.print_width(560).label_length(288);
//! builder.origin(40, 40).font('0', 80, 40).field_data("ABC123");
//! builder.origin(40, 128).bar_width(2).code128(64, false).field_data("ABC123");
//! builder.quantity(3);
//!
//! // Send to network printer
//! let printer = NetworkPrinter::new("192.168.1.100", 9100)?;
//! printer.print(builder.build().as_bytes()).await?;
//! ```

mod error;
mod printer;
mod zpl;

// Re-exports
pub use error::{PrintError, PrintResult};
pub use printer::{DEFAULT_PORT, NetworkPrinter, Printer};
pub use zpl::{Justification, ZplBuilder, is_field_safe};
