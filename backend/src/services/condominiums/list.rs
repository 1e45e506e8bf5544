use crate::error::TermoError;
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use log::error;

/// Actix web handler for `GET /api/condominios`.
pub async fn process(state: web::Data<AppState>) -> impl Responder {
    let catalog = state.catalog.clone();
    let result = web::block(move || catalog.condominiums())
        .await
        .map_err(|e| TermoError::Catalog(e.to_string()))
        .and_then(|listed| listed);
    match result {
        Ok(condominiums) => HttpResponse::Ok().json(condominiums),
        Err(e) => {
            error!("Error listing condominiums: {}", e);
            e.error_response()
        }
    }
}
