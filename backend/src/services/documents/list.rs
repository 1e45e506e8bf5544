use crate::error::TermoError;
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use log::error;

/// Actix web handler for `GET /api/documentos`.
///
/// # Returns
/// - `200 OK` with the document summaries as JSON.
/// - `500 Internal Server Error` with `{"error": ...}` if the catalog fails.
pub async fn process(state: web::Data<AppState>) -> impl Responder {
    let catalog = state.catalog.clone();
    let result = web::block(move || catalog.documents())
        .await
        .map_err(|e| TermoError::Catalog(e.to_string()))
        .and_then(|listed| listed);
    match result {
        Ok(documents) => HttpResponse::Ok().json(documents),
        Err(e) => {
            error!("Error listing documents: {}", e);
            e.error_response()
        }
    }
}
