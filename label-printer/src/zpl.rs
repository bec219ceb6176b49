//! ZPL command builder
//!
//! Provides a fluent API for building ZPL label documents.

use std::fmt::Write as _;

/// Field block text justification (`^FB` parameter d)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Justification {
    Left,
    Center,
    Right,
    Justified,
}

impl Justification {
    fn code(self) -> char {
        match self {
            Justification::Left => 'L',
            Justification::Center => 'C',
            Justification::Right => 'R',
            Justification::Justified => 'J',
        }
    }
}

/// Check that text can be placed inside `^FD ... ^FS` unchanged.
///
/// `^` and `~` start ZPL commands and control characters break the stream.
pub fn is_field_safe(s: &str) -> bool {
    !s.chars().any(|c| c == '^' || c == '~' || c.is_control())
}

/// ZPL command builder
///
/// Builds a single `^XA ... ^XZ` label format. Coordinates and sizes are in dots.
pub struct ZplBuilder {
    buf: String,
}

impl ZplBuilder {
    /// Create a new builder, opening the label format (`^XA`)
    pub fn new() -> Self {
        let mut buf = String::with_capacity(256);
        buf.push_str("^XA");
        Self { buf }
    }

    // === Label Setup ===

    /// Print width in dots (`^PW`)
    pub fn print_width(&mut self, dots: u32) -> &mut Self {
        let _ = write!(self.buf, "^PW{}", dots);
        self
    }

    /// Label length in dots (`^LL`)
    pub fn label_length(&mut self, dots: u32) -> &mut Self {
        let _ = write!(self.buf, "^LL{}", dots);
        self
    }

    /// Select UTF-8 field data encoding (`^CI28`)
    pub fn utf8(&mut self) -> &mut Self {
        self.buf.push_str("^CI28");
        self
    }

    // === Field Placement ===

    /// Set the field origin (`^FO`)
    pub fn origin(&mut self, x: u32, y: u32) -> &mut Self {
        let _ = write!(self.buf, "^FO{},{}", x, y);
        self
    }

    /// Scalable/bitmap font, normal orientation (`^A`)
    pub fn font(&mut self, name: char, height: u32, width: u32) -> &mut Self {
        let _ = write!(self.buf, "^A{}N,{},{}", name, height, width);
        self
    }

    /// Field block (`^FB`): wraps or justifies text inside `width` dots
    pub fn field_block(
        &mut self,
        width: u32,
        max_lines: u32,
        justification: Justification,
    ) -> &mut Self {
        let _ = write!(
            self.buf,
            "^FB{},{},0,{},0",
            width,
            max_lines,
            justification.code()
        );
        self
    }

    // === Barcodes ===

    /// Barcode module width in dots (`^BY`)
    pub fn bar_width(&mut self, module: u32) -> &mut Self {
        let _ = write!(self.buf, "^BY{}", module);
        self
    }

    /// Code 128 barcode, normal orientation (`^BC`)
    ///
    /// `interpretation` prints the human readable line below the bars.
    pub fn code128(&mut self, height: u32, interpretation: bool) -> &mut Self {
        let line = if interpretation { 'Y' } else { 'N' };
        let _ = write!(self.buf, "^BCN,{},{},N,N", height, line);
        self
    }

    // === Data ===

    /// Field data followed by field separator (`^FD ... ^FS`)
    ///
    /// Callers are expected to pass text accepted by [`is_field_safe`].
    pub fn field_data(&mut self, data: &str) -> &mut Self {
        debug_assert!(is_field_safe(data), "unsafe ZPL field data: {data:?}");
        self.buf.push_str("^FD");
        self.buf.push_str(data);
        self.buf.push_str("^FS");
        self
    }

    /// Print quantity (`^PQ`)
    pub fn quantity(&mut self, copies: u32) -> &mut Self {
        let _ = write!(self.buf, "^PQ{}", copies);
        self
    }

    // === Output ===

    /// Close the label format (`^XZ`) and return the ZPL text
    pub fn build(mut self) -> String {
        self.buf.push_str("^XZ");
        self.buf
    }
}

impl Default for ZplBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_frames_label() {
        let zpl = ZplBuilder::new().build();
        assert_eq!(zpl, "^XA^XZ");
    }

    #[test]
    fn test_text_field() {
        let mut b = ZplBuilder::new();
        b.origin(40, 40).font('0', 80, 40).field_data("ABC123");

        let zpl = b.build();
        assert_eq!(zpl, "^XA^FO40,40^A0N,80,40^FDABC123^FS^XZ");
    }

    #[test]
    fn test_right_justified_block() {
        let mut b = ZplBuilder::new();
        b.origin(40, 208)
            .font('0', 40, 32)
            .field_block(480, 1, Justification::Right)
            .field_data("B7");

        let zpl = b.build();
        assert!(zpl.contains("^FB480,1,0,R,0^FDB7^FS"));
    }

    #[test]
    fn test_code128_and_quantity() {
        let mut b = ZplBuilder::new();
        b.bar_width(2).code128(64, false).field_data("SKU-1");
        b.quantity(3);

        let zpl = b.build();
        assert!(zpl.contains("^BY2^BCN,64,N,N,N^FDSKU-1^FS"));
        assert!(zpl.ends_with("^PQ3^XZ"));
    }

    #[test]
    fn test_field_safety() {
        assert!(is_field_safe("ABC-123 lot 7"));
        assert!(!is_field_safe("A^XZ"));
        assert!(!is_field_safe("~JA"));
        assert!(!is_field_safe("line\nbreak"));
    }
}
