//! HTML page rendering
//!
//! One page serves every state: empty form, validation error, print result
//! and preview. All user input is escaped before it is written out.

use crate::label::{LabelForm, MAX_QUANTITY};

/// Status line shown above the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Ok(String),
    Error(String),
}

impl Notice {
    fn class(&self) -> &'static str {
        match self {
            Notice::Ok(_) => "ok",
            Notice::Error(_) => "err",
        }
    }

    fn message(&self) -> &str {
        match self {
            Notice::Ok(m) | Notice::Error(m) => m,
        }
    }
}

/// Preview area below the form
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PreviewSlot {
    /// No preview was requested
    #[default]
    Empty,
    /// `data:` URL of the rendered label
    Image(String),
    /// Preview requested but not available
    Unavailable(String),
}

/// Full HTML page
#[derive(Debug, Clone)]
pub struct Page {
    sku: String,
    batch: String,
    quantity: String,
    notices: Vec<Notice>,
    preview: PreviewSlot,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            sku: String::new(),
            batch: String::new(),
            quantity: "1".to_string(),
            notices: Vec::new(),
            preview: PreviewSlot::Empty,
        }
    }
}

impl Page {
    /// Page with the form filled from a previous submission
    pub fn from_form(form: &LabelForm) -> Self {
        Self {
            sku: form.sku.clone(),
            batch: form.batch.clone(),
            quantity: form.quantity().to_string(),
            ..Self::default()
        }
    }

    pub fn notice(mut self, notice: Notice) -> Self {
        self.notices.push(notice);
        self
    }

    pub fn preview(mut self, preview: PreviewSlot) -> Self {
        self.preview = preview;
        self
    }

    pub fn render(&self) -> String {
        let notices: String = self
            .notices
            .iter()
            .map(|n| {
                format!(
                    "  <p class=\"msg {}\">{}</p>\n",
                    n.class(),
                    escape(n.message())
                )
            })
            .collect();

        let preview = match &self.preview {
            PreviewSlot::Empty => String::new(),
            PreviewSlot::Image(src) => format!(
                "  <div class=\"preview\"><img src=\"{}\" alt=\"Label preview\"></div>\n",
                escape(src)
            ),
            PreviewSlot::Unavailable(reason) => format!(
                "  <div class=\"preview\"><p class=\"msg warn\">Preview unavailable: {}</p></div>\n",
                escape(reason)
            ),
        };

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>Batch Label Printer</title>
  <style>
    body    {{ font-family: sans-serif; max-width: 480px; margin: 60px auto; padding: 0 16px; }}
    label   {{ display: block; margin-top: 14px; font-weight: bold; }}
    input   {{ width: 100%; padding: 8px; margin-top: 4px; box-sizing: border-box; font-size: 1rem; }}
    .buttons {{ margin-top: 20px; display: flex; gap: 10px; }}
    button  {{ padding: 10px 28px; border: none; cursor: pointer; font-size: 1rem; }}
    button.btn-print   {{ background: #222; color: #fff; }}
    button.btn-print:hover {{ background: #444; }}
    button.btn-preview {{ background: #fff; color: #222; border: 1px solid #222; }}
    button.btn-preview:hover {{ background: #f0f0f0; }}
    .msg    {{ margin-top: 16px; padding: 10px 14px; border-radius: 4px; }}
    .ok     {{ background: #e8f5e9; border: 1px solid #4caf50; }}
    .err    {{ background: #fdecea; border: 1px solid #f44336; }}
    .warn   {{ background: #fff8e1; border: 1px solid #ffb300; }}
    .preview     {{ margin-top: 24px; }}
    .preview img {{ max-width: 100%; border: 1px solid #ccc; }}
  </style>
</head>
<body>
  <h1>Batch Label Printer</h1>
{notices}  <form method="post" action="/print">
    <label>SKU</label>
    <input name="sku" value="{sku}" required pattern="[A-Za-z0-9\-]+" placeholder="e.g. ToGD">
    <label>Batch</label>
    <input name="batch" value="{batch}" required placeholder="e.g. 12345">
    <label>Quantity</label>
    <input type="number" name="quantity" value="{quantity}" min="1" max="{max}" required>
    <div class="buttons">
      <button class="btn-preview" type="submit" formaction="/preview">Preview</button>
      <button class="btn-print"   type="submit">Print Labels</button>
    </div>
  </form>
{preview}</body>
</html>
"#,
            notices = notices,
            sku = escape(&self.sku),
            batch = escape(&self.batch),
            quantity = escape(&self.quantity),
            max = MAX_QUANTITY,
            preview = preview,
        )
    }
}

/// Escape text for HTML element content and quoted attributes
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_form() {
        let html = Page::default().render();
        assert!(html.contains("<form"));
        assert!(html.contains("name=\"sku\""));
        assert!(html.contains("name=\"quantity\" value=\"1\""));
        assert!(html.contains("max=\"999\""));
        assert!(!html.contains("class=\"msg"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_values_are_escaped() {
        let form = LabelForm::new("\"><script>", "a&b", 2);
        let html = Page::from_form(&form)
            .notice(Notice::Error("<b>bad</b>".to_string()))
            .render();

        assert!(!html.contains("<script>"));
        assert!(html.contains("value=\"&quot;&gt;&lt;script&gt;\""));
        assert!(html.contains("value=\"a&amp;b\""));
        assert!(html.contains("<p class=\"msg err\">&lt;b&gt;bad&lt;/b&gt;</p>"));
    }

    #[test]
    fn test_preview_slots() {
        let html = Page::default()
            .notice(Notice::Ok("Sent".to_string()))
            .preview(PreviewSlot::Image("data:image/png;base64,AAA".to_string()))
            .render();
        assert!(html.contains("<p class=\"msg ok\">Sent</p>"));
        assert!(html.contains("<img src=\"data:image/png;base64,AAA\""));

        let html = Page::default()
            .preview(PreviewSlot::Unavailable("Preview service timed out".to_string()))
            .render();
        assert!(html.contains("Preview unavailable: Preview service timed out"));
        assert!(!html.contains("<img"));
    }
}
