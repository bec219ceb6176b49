//! Label request validation
//!
//! `LabelForm` is what the browser sends; `LabelRequest` is what the rest of
//! the server works with. The only way to obtain a `LabelRequest` is
//! [`LabelForm::validate`].

use serde::Deserialize;
use thiserror::Error;

/// Maximum copies per submission (matches the form's `max`)
pub const MAX_QUANTITY: u32 = 999;

/// Maximum SKU / batch length in characters
pub const MAX_FIELD_LEN: usize = 32;

/// User-facing validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("SKU is required")]
    EmptySku,

    #[error("SKU may only contain letters, digits and '-' (found {0:?})")]
    InvalidSku(char),

    #[error("SKU must be at most {} characters", MAX_FIELD_LEN)]
    SkuTooLong,

    #[error("Batch is required")]
    EmptyBatch,

    #[error("Batch contains a character that cannot be printed: {0:?}")]
    InvalidBatch(char),

    #[error("Batch must be at most {} characters", MAX_FIELD_LEN)]
    BatchTooLong,

    #[error("Quantity must be a whole number (got {0:?})")]
    InvalidQuantity(String),

    #[error("Quantity must be between 1 and {} (got {})", MAX_QUANTITY, .0)]
    QuantityOutOfRange(i64),
}

/// Raw form submission
///
/// Every field defaults to empty so that missing inputs surface as
/// validation errors instead of extractor rejections. `copies` is the older
/// name for `quantity` and is only consulted when `quantity` is blank.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LabelForm {
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub batch: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub copies: Option<String>,
}

/// A validated label request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelRequest {
    sku: String,
    batch: String,
    quantity: u32,
}

impl LabelRequest {
    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn batch(&self) -> &str {
        &self.batch
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

impl LabelForm {
    pub fn new(sku: impl Into<String>, batch: impl Into<String>, quantity: impl ToString) -> Self {
        Self {
            sku: sku.into(),
            batch: batch.into(),
            quantity: quantity.to_string(),
            copies: None,
        }
    }

    /// The submitted quantity, falling back to `copies`
    pub fn quantity(&self) -> &str {
        match self.copies.as_deref() {
            Some(copies) if self.quantity.trim().is_empty() => copies,
            _ => &self.quantity,
        }
    }

    /// Validate all three inputs
    pub fn validate(&self) -> Result<LabelRequest, ValidationError> {
        Ok(LabelRequest {
            sku: validate_sku(&self.sku)?,
            batch: validate_batch(&self.batch)?,
            quantity: validate_quantity(self.quantity())?,
        })
    }
}

fn validate_sku(raw: &str) -> Result<String, ValidationError> {
    let sku = raw.trim();
    if sku.is_empty() {
        return Err(ValidationError::EmptySku);
    }
    if let Some(c) = sku.chars().find(|c| !(c.is_ascii_alphanumeric() || *c == '-')) {
        return Err(ValidationError::InvalidSku(c));
    }
    if sku.len() > MAX_FIELD_LEN {
        return Err(ValidationError::SkuTooLong);
    }
    Ok(sku.to_string())
}

fn validate_batch(raw: &str) -> Result<String, ValidationError> {
    let batch = raw.trim();
    if batch.is_empty() {
        return Err(ValidationError::EmptyBatch);
    }
    if let Some(c) = batch.chars().find(|c| !label_printer::is_field_safe(&c.to_string())) {
        return Err(ValidationError::InvalidBatch(c));
    }
    if batch.chars().count() > MAX_FIELD_LEN {
        return Err(ValidationError::BatchTooLong);
    }
    Ok(batch.to_string())
}

fn validate_quantity(raw: &str) -> Result<u32, ValidationError> {
    let raw = raw.trim();
    let value: i64 = raw
        .parse()
        .map_err(|_| ValidationError::InvalidQuantity(raw.to_string()))?;

    match u32::try_from(value) {
        Ok(q) if (1..=MAX_QUANTITY).contains(&q) => Ok(q),
        _ => Err(ValidationError::QuantityOutOfRange(value)),
    }
}
