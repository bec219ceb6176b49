//! Label layout
//!
//! Converts the physical label description (inches, millimetres) into
//! device dots once at startup. A `LabelLayout` that exists is known to fit.

use thiserror::Error;

use crate::core::config::{LabelConfig, TextConfig};

const MM_PER_INCH: f64 = 25.4;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("{0} must be a positive number")]
    NotPositive(&'static str),

    #[error("{0} must not be negative")]
    Negative(&'static str),

    #[error("Invalid ZPL font {0:?}: expected A-Z or 0-9")]
    InvalidFont(char),

    #[error("Barcode module width must be 1-10 dots, got {0}")]
    ModuleWidth(u32),

    #[error("Label layout does not fit: {0}")]
    Overflow(String),
}

/// Font and character size of a text field, in dots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub font: char,
    pub height: u32,
    pub width: u32,
}

/// Code 128 sizing, in dots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarcodeStyle {
    pub module_width: u32,
    pub height: u32,
    /// Space between the SKU text and the bars
    pub gap: u32,
}

/// Immutable label geometry in printer dots
///
/// ```text
/// +-----------------------------------+
/// |  SKU TEXT                         |  <- sku_origin
/// |  ||| || ||| |||                   |  <- barcode_origin
/// |                          BATCH    |  <- batch_origin (right-justified block)
/// +-----------------------------------+
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LabelLayout {
    pub dpi: u32,
    /// Dots per millimetre (Labelary addresses printers by this)
    pub dpmm: u32,
    pub width_in: f64,
    pub height_in: f64,
    /// Label width in dots
    pub width: u32,
    /// Label height in dots
    pub height: u32,
    pub padding: u32,
    pub sku: TextStyle,
    pub batch: TextStyle,
    pub barcode: BarcodeStyle,
}

impl LabelLayout {
    /// Build and validate the layout from configuration
    pub fn from_config(cfg: &LabelConfig) -> Result<Self, LayoutError> {
        positive(cfg.width_in, "LABEL_WIDTH")?;
        positive(cfg.height_in, "LABEL_HEIGHT")?;
        if cfg.dpi == 0 {
            return Err(LayoutError::NotPositive("LABEL_DPI"));
        }
        non_negative(cfg.padding_mm, "LABEL_PADDING_MM")?;
        positive(cfg.barcode.height_mm, "BARCODE_HEIGHT_MM")?;
        non_negative(cfg.barcode.gap_mm, "BARCODE_GAP_MM")?;
        if !(1..=10).contains(&cfg.barcode.module_dots) {
            return Err(LayoutError::ModuleWidth(cfg.barcode.module_dots));
        }

        let dpmm = (f64::from(cfg.dpi) / MM_PER_INCH).round() as u32;
        if dpmm == 0 {
            return Err(LayoutError::NotPositive("LABEL_DPI"));
        }
        let dpi = f64::from(cfg.dpi);
        let mm = f64::from(dpmm);

        let layout = Self {
            dpi: cfg.dpi,
            dpmm,
            width_in: cfg.width_in,
            height_in: cfg.height_in,
            width: to_dots(cfg.width_in, dpi, "LABEL_WIDTH")?,
            height: to_dots(cfg.height_in, dpi, "LABEL_HEIGHT")?,
            padding: to_dots(cfg.padding_mm, mm, "LABEL_PADDING_MM")?,
            sku: text_style(&cfg.sku, dpmm, "SKU_CHAR_HEIGHT_MM", "SKU_CHAR_WIDTH_MM")?,
            batch: text_style(
                &cfg.batch,
                dpmm,
                "BATCH_CHAR_HEIGHT_MM",
                "BATCH_CHAR_WIDTH_MM",
            )?,
            barcode: BarcodeStyle {
                module_width: cfg.barcode.module_dots,
                height: to_dots(cfg.barcode.height_mm, mm, "BARCODE_HEIGHT_MM")?,
                gap: to_dots(cfg.barcode.gap_mm, mm, "BARCODE_GAP_MM")?,
            },
        };

        layout.check_fit()?;
        Ok(layout)
    }

    /// Every origin and extent below is bounded by the label size once this
    /// passes, so the accessors cannot overflow.
    fn check_fit(&self) -> Result<(), LayoutError> {
        let margins = self.padding.checked_mul(2).filter(|m| *m < self.width);
        if margins.is_none() {
            return Err(LayoutError::Overflow(format!(
                "padding {} leaves no printable width on a {}-dot label",
                self.padding, self.width
            )));
        }

        let batch_top = self
            .padding
            .checked_add(self.batch.height)
            .and_then(|used| self.height.checked_sub(used))
            .ok_or_else(|| {
                LayoutError::Overflow(format!(
                    "batch text ({} dots) does not fit in a {}-dot label",
                    self.batch.height, self.height
                ))
            })?;

        self.padding
            .checked_add(self.sku.height)
            .and_then(|v| v.checked_add(self.barcode.gap))
            .and_then(|v| v.checked_add(self.barcode.height))
            .filter(|bottom| *bottom <= batch_top)
            .ok_or_else(|| {
                LayoutError::Overflow(format!(
                    "SKU and barcode do not fit above the batch text at {} dots",
                    batch_top
                ))
            })
            .map(|_| ())
    }

    /// Width available between the left and right padding
    pub fn printable_width(&self) -> u32 {
        self.width - self.padding * 2
    }

    /// Top-left of the SKU text
    pub fn sku_origin(&self) -> (u32, u32) {
        (self.padding, self.padding)
    }

    /// Top-left of the barcode, directly under the SKU text
    pub fn barcode_origin(&self) -> (u32, u32) {
        (
            self.padding,
            self.padding + self.sku.height + self.barcode.gap,
        )
    }

    /// Top-left of the batch field block, which spans the printable width
    /// so right-justified text ends at the right padding
    pub fn batch_origin(&self) -> (u32, u32) {
        (
            self.padding,
            self.height - self.padding - self.batch.height,
        )
    }

    /// Number of SKU characters that fit on one line
    pub fn sku_capacity(&self) -> usize {
        (self.printable_width() / self.sku.width.max(1)) as usize
    }
}

fn positive(value: f64, name: &'static str) -> Result<(), LayoutError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LayoutError::NotPositive(name))
    }
}

fn non_negative(value: f64, name: &'static str) -> Result<(), LayoutError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(LayoutError::Negative(name))
    }
}

/// Scale a physical size to whole dots
fn to_dots(value: f64, dots_per_unit: f64, name: &'static str) -> Result<u32, LayoutError> {
    let dots = (value * dots_per_unit).round();
    if dots.is_finite() && (0.0..=f64::from(u32::MAX)).contains(&dots) {
        Ok(dots as u32)
    } else {
        Err(LayoutError::Overflow(format!("{name} is too large ({value})")))
    }
}

fn text_style(
    cfg: &TextConfig,
    dpmm: u32,
    height_name: &'static str,
    width_name: &'static str,
) -> Result<TextStyle, LayoutError> {
    if !(cfg.font.is_ascii_uppercase() || cfg.font.is_ascii_digit()) {
        return Err(LayoutError::InvalidFont(cfg.font));
    }
    positive(cfg.char_height_mm, height_name)?;
    positive(cfg.char_width_mm, width_name)?;

    let mm = f64::from(dpmm);
    Ok(TextStyle {
        font: cfg.font,
        height: to_dots(cfg.char_height_mm, mm, height_name)?.max(1),
        width: to_dots(cfg.char_width_mm, mm, width_name)?.max(1),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;

    fn label_config() -> LabelConfig {
        Config::from_lookup(|_| None).unwrap().label
    }

    #[test]
    fn test_default_layout_in_dots() {
        let layout = LabelLayout::from_config(&label_config()).unwrap();

        // 70 x 36 mm at 203 dpi
        assert_eq!(layout.dpmm, 8);
        assert_eq!((layout.width, layout.height), (560, 288));
        assert_eq!(layout.padding, 40);
        assert_eq!(layout.sku, TextStyle { font: '0', height: 80, width: 40 });
        assert_eq!(layout.batch, TextStyle { font: '0', height: 40, width: 32 });
        assert_eq!(
            layout.barcode,
            BarcodeStyle { module_width: 2, height: 64, gap: 8 }
        );
    }

    #[test]
    fn test_element_positions() {
        let layout = LabelLayout::from_config(&label_config()).unwrap();

        assert_eq!(layout.sku_origin(), (40, 40));
        assert_eq!(layout.barcode_origin(), (40, 128));
        assert_eq!(layout.batch_origin(), (40, 208));
        assert_eq!(layout.printable_width(), 480);
        assert_eq!(layout.sku_capacity(), 12);
    }

    #[test]
    fn test_300_dpi_scales_positions() {
        let mut cfg = label_config();
        cfg.dpi = 300;
        let layout = LabelLayout::from_config(&cfg).unwrap();

        assert_eq!(layout.dpmm, 12);
        assert_eq!(layout.width, 828);
        assert_eq!(layout.sku_origin(), (60, 60));
    }

    #[test]
    fn test_rejects_non_positive_dimensions() {
        let mut cfg = label_config();
        cfg.width_in = -1.0;
        assert!(matches!(
            LabelLayout::from_config(&cfg),
            Err(LayoutError::NotPositive("LABEL_WIDTH"))
        ));

        let mut cfg = label_config();
        cfg.dpi = 0;
        assert!(LabelLayout::from_config(&cfg).is_err());

        let mut cfg = label_config();
        cfg.padding_mm = -2.0;
        assert!(matches!(
            LabelLayout::from_config(&cfg),
            Err(LayoutError::Negative("LABEL_PADDING_MM"))
        ));
    }

    #[test]
    fn test_rejects_overflowing_elements() {
        let mut cfg = label_config();
        cfg.barcode.height_mm = 20.0;
        assert!(matches!(
            LabelLayout::from_config(&cfg),
            Err(LayoutError::Overflow(_))
        ));

        let mut cfg = label_config();
        cfg.padding_mm = 40.0;
        assert!(matches!(
            LabelLayout::from_config(&cfg),
            Err(LayoutError::Overflow(_))
        ));
    }

    #[test]
    fn test_rejects_bad_font_and_module() {
        let mut cfg = label_config();
        cfg.sku.font = 'a';
        assert!(matches!(
            LabelLayout::from_config(&cfg),
            Err(LayoutError::InvalidFont('a'))
        ));

        let mut cfg = label_config();
        cfg.barcode.module_dots = 11;
        assert!(matches!(
            LabelLayout::from_config(&cfg),
            Err(LayoutError::ModuleWidth(11))
        ));
    }

    #[test]
    fn test_huge_sizes_are_layout_errors() {
        let config = Config::from_lookup(|name| {
            (name == "SKU_CHAR_HEIGHT_MM").then(|| "1e9".to_string())
        })
        .unwrap();
        assert!(matches!(
            LabelLayout::from_config(&config.label),
            Err(LayoutError::Overflow(_))
        ));

        let mut cfg = label_config();
        cfg.sku.char_height_mm = 1e12;
        assert!(matches!(
            LabelLayout::from_config(&cfg),
            Err(LayoutError::Overflow(msg)) if msg.contains("SKU_CHAR_HEIGHT_MM")
        ));

        let mut cfg = label_config();
        cfg.height_in = 1e7;
        cfg.barcode.gap_mm = 5e8;
        cfg.barcode.height_mm = 5e8;
        assert!(matches!(
            LabelLayout::from_config(&cfg),
            Err(LayoutError::Overflow(_))
        ));

        let mut cfg = label_config();
        cfg.padding_mm = 3e8;
        cfg.width_in = 1e7;
        assert!(matches!(
            LabelLayout::from_config(&cfg),
            Err(LayoutError::Overflow(_))
        ));
    }
}
