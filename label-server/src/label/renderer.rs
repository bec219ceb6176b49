//! Label renderer
//!
//! Renders a LabelRequest into ZPL for the configured label stock.

use label_printer::{Justification, ZplBuilder};
use tracing::warn;

use super::layout::LabelLayout;
use super::request::LabelRequest;

/// A rendered label, ready for the printer and the preview service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelDocument {
    zpl: String,
    copies: u32,
}

impl LabelDocument {
    /// ZPL text of the label format
    pub fn zpl(&self) -> &str {
        &self.zpl
    }

    /// Bytes written to the printer
    pub fn as_bytes(&self) -> &[u8] {
        self.zpl.as_bytes()
    }

    /// Copies requested through the embedded `^PQ` directive
    pub fn copies(&self) -> u32 {
        self.copies
    }
}

/// Label renderer
///
/// Three fixed elements: SKU text top-left, SKU as Code 128 below it,
/// batch text bottom-right. Output depends only on the request and layout.
pub struct LabelRenderer<'a> {
    layout: &'a LabelLayout,
}

impl<'a> LabelRenderer<'a> {
    pub fn new(layout: &'a LabelLayout) -> Self {
        Self { layout }
    }

    /// Render a label request to a ZPL document
    pub fn render(&self, request: &LabelRequest) -> LabelDocument {
        let mut b = ZplBuilder::new();

        b.print_width(self.layout.width)
            .label_length(self.layout.height)
            .utf8();

        self.render_sku(&mut b, request.sku());
        self.render_barcode(&mut b, request.sku());
        self.render_batch(&mut b, request.batch());

        b.quantity(request.quantity());

        LabelDocument {
            zpl: b.build(),
            copies: request.quantity(),
        }
    }

    fn render_sku(&self, b: &mut ZplBuilder, sku: &str) {
        if sku.len() > self.layout.sku_capacity() {
            warn!(
                sku,
                capacity = self.layout.sku_capacity(),
                "SKU wider than the label, text will be clipped"
            );
        }

        let (x, y) = self.layout.sku_origin();
        let style = self.layout.sku;
        b.origin(x, y)
            .font(style.font, style.height, style.width)
            .field_data(sku);
    }

    fn render_barcode(&self, b: &mut ZplBuilder, sku: &str) {
        let (x, y) = self.layout.barcode_origin();
        let style = self.layout.barcode;
        b.origin(x, y)
            .bar_width(style.module_width)
            .code128(style.height, false)
            .field_data(sku);
    }

    fn render_batch(&self, b: &mut ZplBuilder, batch: &str) {
        let (x, y) = self.layout.batch_origin();
        let style = self.layout.batch;
        b.origin(x, y)
            .font(style.font, style.height, style.width)
            .field_block(self.layout.printable_width(), 1, Justification::Right)
            .field_data(batch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::label::LabelForm;

    fn layout() -> LabelLayout {
        let config = Config::from_lookup(|_| None).unwrap();
        LabelLayout::from_config(&config.label).unwrap()
    }

    fn request(sku: &str, batch: &str, quantity: u32) -> LabelRequest {
        LabelForm::new(sku, batch, quantity).validate().unwrap()
    }

    #[test]
    fn test_render_default_label() {
        let layout = layout();
        let doc = LabelRenderer::new(&layout).render(&request("ABC123", "B7", 3));

        assert_eq!(
            doc.zpl(),
            "^XA^PW560^LL288^CI28\
             ^FO40,40^A0N,80,40^FDABC123^FS\
             ^FO40,128^BY2^BCN,64,N,N,N^FDABC123^FS\
             ^FO40,208^A0N,40,32^FB480,1,0,R,0^FDB7^FS\
             ^PQ3^XZ"
        );
        assert_eq!(doc.copies(), 3);
    }

    #[test]
    fn test_each_element_appears_once() {
        let layout = layout();
        let doc = LabelRenderer::new(&layout).render(&request("ABC123", "B7", 3));
        let zpl = doc.zpl();

        assert_eq!(zpl.matches("^BCN").count(), 1);
        assert_eq!(zpl.matches("^FDABC123^FS").count(), 2);
        assert_eq!(zpl.matches("^FDB7^FS").count(), 1);
        assert_eq!(zpl.matches("^PQ3").count(), 1);
        assert!(zpl.starts_with("^XA"));
        assert!(zpl.ends_with("^XZ"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let layout = layout();
        let renderer = LabelRenderer::new(&layout);
        let req = request("SKU-9", "2024-11", 12);

        assert_eq!(renderer.render(&req), renderer.render(&req));
    }

    #[test]
    fn test_positions_follow_configuration() {
        let mut config = Config::from_lookup(|_| None).unwrap();
        config.label.dpi = 300;
        config.label.padding_mm = 3.0;
        let layout = LabelLayout::from_config(&config.label).unwrap();

        let doc = LabelRenderer::new(&layout).render(&request("X1", "L2", 1));
        let zpl = doc.zpl();

        // 12 dpmm: padding 36, SKU 120 high, gap 12
        assert!(zpl.contains("^FO36,36^A0N,120,60^FDX1^FS"));
        assert!(zpl.contains("^FO36,168^BY2^BCN,96,N,N,N^FDX1^FS"));
        // 426 - 36 - 60
        assert!(zpl.contains("^FO36,330^A0N,60,48^FB756,1,0,R,0^FDL2^FS"));
    }
}
