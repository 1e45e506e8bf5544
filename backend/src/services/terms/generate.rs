//! Handler for `POST /api/gerar-termo`.
//!
//! ## Workflow
//!
//! 1.  **Form decoding**: `read_submission` walks the multipart stream. Text
//!     parts become form fields; `imgCotas` and `imgCalculo` become
//!     attachments carrying their declared (or sniffed) media type. Parts
//!     with any other name are drained and dropped. A part larger than the
//!     configured limit, or a form larger than that limit for each known
//!     part, aborts the request with `413`.
//!
//! 2.  **Generation**: the `TermGenerator` runs on the blocking thread pool,
//!     since launching and driving the browser is synchronous.
//!
//! 3.  **Response**: the PDF is returned as a download. Failures are answered
//!     with the status of the `TermoError` and a JSON `{"error": ...}` body.

use crate::error::{Result, TermoError};
use crate::pipeline::render::RenderedArtifact;
use crate::pipeline::submission::{Attachment, FormSubmission};
use crate::state::AppState;
use actix_multipart::Multipart;
use actix_web::http::header;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::requests::fields;
use futures_util::StreamExt;
use log::{debug, error, info};
use uuid::Uuid;

pub async fn process(state: web::Data<AppState>, payload: Multipart) -> impl Responder {
    let request_id = Uuid::new_v4();
    match generate_term(&state, payload, request_id).await {
        Ok(artifact) => {
            info!(
                "[{}] Sending {} ({} bytes)",
                request_id,
                artifact.file_name(),
                artifact.bytes().len()
            );
            HttpResponse::Ok()
                .content_type("application/pdf")
                .insert_header((
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", artifact.file_name()),
                ))
                .body(artifact.into_bytes())
        }
        Err(e) => {
            error!("[{}] Erro ao gerar termo: {}", request_id, e);
            e.error_response()
        }
    }
}

async fn generate_term(
    state: &AppState,
    payload: Multipart,
    request_id: Uuid,
) -> Result<RenderedArtifact> {
    let form = read_submission(payload, state.max_attachment_bytes).await?;
    info!(
        "[{}] Term requested: document '{}', condominium '{}'",
        request_id,
        form.document_id(),
        form.condominium_id()
    );

    let generator = state.generator.clone();
    web::block(move || generator.generate(&form))
        .await
        .map_err(TermoError::render)?
}

fn is_attachment(name: &str) -> bool {
    name == fields::QUOTA_IMAGE || name == fields::CALCULATION_IMAGE
}

/// Decodes the multipart form.
///
/// # Arguments
/// - `payload`: the request's multipart stream.
/// - `limit`: largest accepted part, in bytes.
///
/// # Returns
/// The submission holding only the parts named in `fields::ALL`. Other parts
/// are read and discarded. Fails with `AttachmentTooLarge` when one part
/// exceeds `limit`, and with `SubmissionTooLarge` when the parts together
/// exceed `limit` for every known part.
pub async fn read_submission(mut payload: Multipart, limit: usize) -> Result<FormSubmission> {
    let total_limit = limit.saturating_mul(fields::ALL.len());
    let mut total = 0usize;
    let mut form = FormSubmission::new();

    while let Some(item) = payload.next().await {
        let mut field = item?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));
        let known = name
            .as_deref()
            .is_some_and(|n| fields::ALL.contains(&n));
        let declared = field.content_type().map(|m| m.essence_str().to_string());

        let mut bytes: Vec<u8> = Vec::new();
        let mut size = 0usize;
        while let Some(chunk) = field.next().await {
            let chunk = chunk?;
            size += chunk.len();
            total += chunk.len();
            if total > total_limit {
                return Err(TermoError::SubmissionTooLarge { limit: total_limit });
            }
            if !known {
                continue;
            }
            if size > limit {
                return Err(TermoError::AttachmentTooLarge {
                    field: name.clone().unwrap_or_default(),
                    limit,
                });
            }
            bytes.extend_from_slice(&chunk);
        }

        let Some(name) = name.filter(|_| known) else {
            debug!("Discarded unknown part ({} bytes)", size);
            continue;
        };
        debug!("Received part '{}' ({} bytes)", name, size);
        if is_attachment(&name) {
            form.attach(name, Attachment::new(bytes, declared));
        } else {
            form.insert_field(name, String::from_utf8_lossy(&bytes).into_owned());
        }
    }

    Ok(form)
}
