//! Label preview client
//!
//! Asks the Labelary rendering API to turn a ZPL document into a PNG.
//! Previews are advisory: callers degrade to a notice when this fails.

use std::time::Duration;

use base64::Engine;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::core::config::PreviewConfig;
use crate::label::{LabelDocument, LabelLayout};

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("Preview disabled")]
    Disabled,

    #[error("Preview service timed out")]
    Timeout,

    #[error("Preview service unavailable: {0}")]
    Unavailable(String),

    #[error("Preview service returned HTTP {0}")]
    Status(u16),

    #[error("Preview service returned an empty image")]
    Empty,
}

pub type PreviewResult<T> = Result<T, PreviewError>;

/// A rendered PNG
#[derive(Debug, Clone)]
pub struct Preview {
    png: Vec<u8>,
}

impl Preview {
    pub fn png(&self) -> &[u8] {
        &self.png
    }

    /// `data:` URL suitable for an `<img src>`
    pub fn data_url(&self) -> String {
        format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(&self.png)
        )
    }
}

/// HTTP client for the label rendering service
#[derive(Debug, Clone)]
pub struct PreviewClient {
    http: reqwest::Client,
    base_url: String,
    enabled: bool,
}

impl PreviewClient {
    pub fn new(config: &PreviewConfig) -> PreviewResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| PreviewError::Unavailable(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            enabled: config.enabled,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Render endpoint for the label stock: first label of the format
    pub fn endpoint(&self, layout: &LabelLayout) -> String {
        format!(
            "{}/printers/{}dpmm/labels/{}x{}/0/",
            self.base_url, layout.dpmm, layout.width_in, layout.height_in
        )
    }

    /// Render a document to PNG
    #[instrument(skip(self, document, layout), fields(bytes = document.as_bytes().len()))]
    pub async fn render(
        &self,
        document: &LabelDocument,
        layout: &LabelLayout,
    ) -> PreviewResult<Preview> {
        if !self.enabled {
            return Err(PreviewError::Disabled);
        }

        let url = self.endpoint(layout);
        let response = self
            .http
            .post(&url)
            .header(reqwest::header::ACCEPT, "image/png")
            .body(document.zpl().to_owned())
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "Preview service rejected label");
            return Err(PreviewError::Status(status.as_u16()));
        }

        let png = response.bytes().await.map_err(map_transport_error)?;
        if png.is_empty() {
            return Err(PreviewError::Empty);
        }

        info!(png_len = png.len(), "Preview rendered");
        Ok(Preview { png: png.to_vec() })
    }
}

fn map_transport_error(e: reqwest::Error) -> PreviewError {
    if e.is_timeout() {
        warn!("Preview request timed out");
        PreviewError::Timeout
    } else {
        warn!(error = %e, "Preview request failed");
        PreviewError::Unavailable(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::label::{LabelForm, LabelRenderer};

    fn config() -> Config {
        Config::from_lookup(|_| None).unwrap()
    }

    #[test]
    fn test_endpoint_uses_dpmm_and_inches() {
        let config = config();
        let layout = LabelLayout::from_config(&config.label).unwrap();
        let client = PreviewClient::new(&config.preview).unwrap();

        assert_eq!(
            client.endpoint(&layout),
            "http://api.labelary.com/v1/printers/8dpmm/labels/2.76x1.42/0/"
        );
    }

    #[test]
    fn test_data_url() {
        let preview = Preview {
            png: vec![0x89, b'P', b'N', b'G'],
        };
        assert_eq!(preview.png().len(), 4);
        assert_eq!(preview.data_url(), "data:image/png;base64,iVBORw==");
    }

    #[tokio::test]
    async fn test_disabled_client_skips_request() {
        let mut config = config();
        config.preview.enabled = false;
        // Nothing listens here; a request would fail with Unavailable instead
        config.preview.base_url = "http://127.0.0.1:9".to_string();

        let layout = LabelLayout::from_config(&config.label).unwrap();
        let client = PreviewClient::new(&config.preview).unwrap();
        let request = LabelForm::new("A1", "B1", 1).validate().unwrap();
        let doc = LabelRenderer::new(&layout).render(&request);

        assert!(!client.is_enabled());
        assert!(matches!(
            client.render(&doc, &layout).await,
            Err(PreviewError::Disabled)
        ));
    }
}
