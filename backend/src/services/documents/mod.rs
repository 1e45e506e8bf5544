//! # Document Catalog Service
//!
//! Exposes the document templates a term can be generated from, so the
//! client form can offer them as choices.
//!
//! *   **`GET /api/documentos`**:
//!     - **Handler**: `list::process`
//!     - **Description**: Returns `[{ "id": ..., "nome": ... }]` for every
//!       registered template, sorted by name.

mod list;

use actix_web::web::{get, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/documentos";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", get().to(list::process))
}
