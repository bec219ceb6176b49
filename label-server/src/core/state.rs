use std::sync::Arc;
use std::time::Duration;

use label_printer::NetworkPrinter;

use crate::core::{Config, Result};
use crate::label::LabelLayout;
use crate::preview::PreviewClient;

/// Server state - shared, read-only handles for every request
///
/// Built once from [`Config`]; cloning is cheap (Arc / pooled client).
///
/// | Field | Purpose |
/// |-------|---------|
/// | config | Configuration (immutable) |
/// | layout | Label geometry in dots |
/// | printer | Raw TCP label printer |
/// | preview | Labelary preview client |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub layout: Arc<LabelLayout>,
    pub printer: NetworkPrinter,
    pub preview: PreviewClient,
}

impl ServerState {
    /// Validate configuration and build the shared services
    pub fn initialize(config: &Config) -> Result<Self> {
        let layout = LabelLayout::from_config(&config.label)?;

        let printer = NetworkPrinter::new(&config.printer.host, config.printer.port)?
            .with_timeout(Duration::from_millis(config.printer.timeout_ms));

        let preview = PreviewClient::new(&config.preview)?;

        tracing::info!(
            printer = %printer.addr(),
            width = layout.width,
            height = layout.height,
            dpi = layout.dpi,
            preview = preview.is_enabled(),
            "Server state initialized"
        );

        Ok(Self {
            config: Arc::new(config.clone()),
            layout: Arc::new(layout),
            printer,
            preview,
        })
    }
}
