use std::str::FromStr;

use thiserror::Error;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?} ({reason})")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Server configuration - every setting of the label station
///
/// # Environment variables
///
/// All settings are read once at startup. A `.env` file in the working
/// directory is loaded first (see `main.rs`).
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | HTTP_HOST | 0.0.0.0 | Listen address |
/// | HTTP_PORT | 8000 | Listen port |
/// | ENVIRONMENT | development | Runtime environment |
/// | PRINTER_HOST | 192.168.1.100 | Label printer host |
/// | PRINTER_PORT | 9100 | Raw TCP print port |
/// | PRINTER_TIMEOUT_MS | 5000 | Printer connect timeout |
/// | LABEL_WIDTH | 2.76 | Label width (inches, 70mm) |
/// | LABEL_HEIGHT | 1.42 | Label height (inches, 36mm) |
/// | LABEL_DPI | 203 | Printer resolution |
/// | LABEL_PADDING_MM | 5 | Outer padding |
/// | SKU_FONT | 0 | ZPL font for the SKU |
/// | SKU_CHAR_HEIGHT_MM | 10 | SKU character height |
/// | SKU_CHAR_WIDTH_MM | 5 | SKU character width |
/// | BATCH_FONT | 0 | ZPL font for the batch |
/// | BATCH_CHAR_HEIGHT_MM | 5 | Batch character height |
/// | BATCH_CHAR_WIDTH_MM | 4 | Batch character width |
/// | BARCODE_HEIGHT_MM | 8 | Code 128 bar height |
/// | BARCODE_MODULE_DOTS | 2 | Code 128 narrow bar width |
/// | BARCODE_GAP_MM | 1 | Space between SKU text and barcode |
/// | PREVIEW_ENABLED | true | Request Labelary previews |
/// | PREVIEW_URL | http://api.labelary.com/v1 | Preview service base URL |
/// | PREVIEW_TIMEOUT_MS | 5000 | Preview request timeout |
/// | LOG_LEVEL | info | Log filter when RUST_LOG is unset |
/// | LOG_DIR | - | Write daily rolling logs here |
///
/// # Example
///
/// ```ignore
/// PRINTER_HOST=10.0.0.42 LABEL_DPI=300 cargo run -p label-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP listen address
    pub http_host: String,
    /// HTTP listen port
    pub http_port: u16,
    /// Runtime environment: development | production
    pub environment: String,
    pub printer: PrinterConfig,
    pub label: LabelConfig,
    pub preview: PreviewConfig,
    /// Default log filter
    pub log_level: String,
    /// Optional directory for rolling log files
    pub log_dir: Option<String>,
}

/// Network printer settings
#[derive(Debug, Clone)]
pub struct PrinterConfig {
    pub host: String,
    pub port: u16,
    pub timeout_ms: u64,
}

/// Physical label and element sizing, in the units operators measure with
#[derive(Debug, Clone)]
pub struct LabelConfig {
    /// Label width in inches
    pub width_in: f64,
    /// Label height in inches
    pub height_in: f64,
    pub dpi: u32,
    pub padding_mm: f64,
    pub sku: TextConfig,
    pub batch: TextConfig,
    pub barcode: BarcodeConfig,
}

/// Font selection and character size for one text field
#[derive(Debug, Clone)]
pub struct TextConfig {
    pub font: char,
    pub char_height_mm: f64,
    pub char_width_mm: f64,
}

/// Code 128 barcode sizing
#[derive(Debug, Clone)]
pub struct BarcodeConfig {
    pub height_mm: f64,
    /// Narrow bar width in dots (`^BY`)
    pub module_dots: u32,
    /// Gap between the SKU text and the bars
    pub gap_mm: f64,
}

/// Label preview service settings
#[derive(Debug, Clone)]
pub struct PreviewConfig {
    pub enabled: bool,
    pub base_url: String,
    pub timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset variables take their defaults; set but unparsable ones are errors.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// Used by tests to avoid touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        Ok(Self {
            http_host: env.string("HTTP_HOST", "0.0.0.0"),
            http_port: env.parse("HTTP_PORT", 8000)?,
            environment: env.string("ENVIRONMENT", "development"),
            printer: PrinterConfig {
                host: env.string("PRINTER_HOST", "192.168.1.100"),
                port: env.parse("PRINTER_PORT", label_printer::DEFAULT_PORT)?,
                timeout_ms: env.parse("PRINTER_TIMEOUT_MS", 5000)?,
            },
            label: LabelConfig {
                width_in: env.parse("LABEL_WIDTH", 2.76)?,
                height_in: env.parse("LABEL_HEIGHT", 1.42)?,
                dpi: env.parse("LABEL_DPI", 203)?,
                padding_mm: env.parse("LABEL_PADDING_MM", 5.0)?,
                sku: TextConfig {
                    font: env.parse("SKU_FONT", '0')?,
                    char_height_mm: env.parse("SKU_CHAR_HEIGHT_MM", 10.0)?,
                    char_width_mm: env.parse("SKU_CHAR_WIDTH_MM", 5.0)?,
                },
                batch: TextConfig {
                    font: env.parse("BATCH_FONT", '0')?,
                    char_height_mm: env.parse("BATCH_CHAR_HEIGHT_MM", 5.0)?,
                    char_width_mm: env.parse("BATCH_CHAR_WIDTH_MM", 4.0)?,
                },
                barcode: BarcodeConfig {
                    height_mm: env.parse("BARCODE_HEIGHT_MM", 8.0)?,
                    module_dots: env.parse("BARCODE_MODULE_DOTS", 2)?,
                    gap_mm: env.parse("BARCODE_GAP_MM", 1.0)?,
                },
            },
            preview: PreviewConfig {
                enabled: env.parse("PREVIEW_ENABLED", true)?,
                base_url: env
                    .string("PREVIEW_URL", "http://api.labelary.com/v1")
                    .trim_end_matches('/')
                    .to_string(),
                timeout_ms: env.parse("PREVIEW_TIMEOUT_MS", 5000)?,
            },
            log_level: env.string("LOG_LEVEL", "info"),
            log_dir: env.get("LOG_DIR"),
        })
    }

    /// Whether running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// `host:port` the HTTP server binds to
    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}

struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Set and non-blank value
    fn get(&self, name: &str) -> Option<String> {
        (self.0)(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn string(&self, name: &str, default: &str) -> String {
        self.get(name).unwrap_or_else(|| default.to_string())
    }

    fn parse<T>(&self, name: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get(name) {
            None => Ok(default),
            Some(value) => value.parse::<T>().map_err(|e| ConfigError::Invalid {
                name,
                reason: e.to_string(),
                value,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config.http_port, 8000);
        assert_eq!(config.printer.port, 9100);
        assert_eq!(config.label.dpi, 203);
        assert_eq!(config.label.sku.font, '0');
        assert!(config.preview.enabled);
        assert!(config.log_dir.is_none());
        assert!(!config.is_production());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("PRINTER_HOST", "zebra.local"),
            ("PRINTER_PORT", "6101"),
            ("LABEL_DPI", "300"),
            ("SKU_FONT", "D"),
            ("PREVIEW_ENABLED", "false"),
            ("PREVIEW_URL", "http://localhost:9000/v1/"),
            ("LOG_DIR", "  "),
        ]))
        .unwrap();

        assert_eq!(config.printer.host, "zebra.local");
        assert_eq!(config.printer.port, 6101);
        assert_eq!(config.label.dpi, 300);
        assert_eq!(config.label.sku.font, 'D');
        assert!(!config.preview.enabled);
        assert_eq!(config.preview.base_url, "http://localhost:9000/v1");
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn test_unparsable_value_is_rejected() {
        let err = Config::from_lookup(lookup(&[("PRINTER_PORT", "ninety-one")])).unwrap_err();
        let ConfigError::Invalid { name, value, .. } = err;
        assert_eq!(name, "PRINTER_PORT");
        assert_eq!(value, "ninety-one");
    }
}
