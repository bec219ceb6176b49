//! Label form routes
//!
//! # Routes
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | / | GET | Empty form |
//! | / | POST | Same as /print |
//! | /print | POST | Validate, render, print, preview |
//! | /preview | POST | Validate, render, preview (no printing) |

use axum::{
    Form, Router,
    extract::State,
    http::StatusCode,
    response::Html,
    routing::{get, post},
};
use label_printer::Printer;
use tracing::{error, info, instrument, warn};

use super::page::{Notice, Page, PreviewSlot};
use crate::core::ServerState;
use crate::label::{LabelDocument, LabelForm, LabelRenderer, LabelRequest};
use crate::preview::PreviewError;

type PageResponse = (StatusCode, Html<String>);

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/", get(index).post(print_labels))
        .route("/print", post(print_labels))
        .route("/preview", post(preview_label))
}

async fn index() -> Html<String> {
    Html(Page::default().render())
}

/// Validate, print with `^PQ{quantity}`, then fetch the preview.
///
/// Printer and preview failures are reported on the page; neither one
/// stops the other.
#[instrument(skip(state, form), fields(sku = %form.sku, batch = %form.batch))]
async fn print_labels(
    State(state): State<ServerState>,
    Form(form): Form<LabelForm>,
) -> PageResponse {
    let request = match validate(&form) {
        Ok(r) => r,
        Err(rejected) => return rejected,
    };

    let document = LabelRenderer::new(&state.layout).render(&request);

    let print_notice = match state.printer.print(document.as_bytes()).await {
        Ok(()) => {
            info!(copies = document.copies(), "Labels sent to printer");
            Notice::Ok(format!(
                "Sent {} label(s): SKU {}, batch {}",
                document.copies(),
                request.sku(),
                request.batch()
            ))
        }
        Err(e) => {
            if e.is_connection_error() {
                warn!(error = %e, printer = %state.printer.addr(), "Printer unreachable");
            } else {
                error!(error = %e, printer = %state.printer.addr(), "Print failed");
            }
            Notice::Error(format!("Print failed: {}", e))
        }
    };

    let preview = fetch_preview(&state, &document).await;

    (
        StatusCode::OK,
        Html(
            Page::from_form(&form)
                .notice(print_notice)
                .preview(preview)
                .render(),
        ),
    )
}

/// Validate and show the preview without touching the printer.
#[instrument(skip(state, form), fields(sku = %form.sku))]
async fn preview_label(
    State(state): State<ServerState>,
    Form(form): Form<LabelForm>,
) -> PageResponse {
    let request = match validate(&form) {
        Ok(r) => r,
        Err(rejected) => return rejected,
    };

    let document = LabelRenderer::new(&state.layout).render(&request);
    let preview = fetch_preview(&state, &document).await;

    (
        StatusCode::OK,
        Html(Page::from_form(&form).preview(preview).render()),
    )
}

fn validate(form: &LabelForm) -> Result<LabelRequest, PageResponse> {
    form.validate().map_err(|e| {
        info!(reason = %e, "Label form rejected");
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(
                Page::from_form(form)
                    .notice(Notice::Error(e.to_string()))
                    .render(),
            ),
        )
    })
}

async fn fetch_preview(state: &ServerState, document: &LabelDocument) -> PreviewSlot {
    match state.preview.render(document, &state.layout).await {
        Ok(preview) => PreviewSlot::Image(preview.data_url()),
        Err(PreviewError::Disabled) => PreviewSlot::Empty,
        Err(e) => PreviewSlot::Unavailable(e.to_string()),
    }
}
