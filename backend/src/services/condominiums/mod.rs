//! # Condominium Catalog Service
//!
//! *   **`GET /api/condominios`**:
//!     - **Handler**: `list::process`
//!     - **Description**: Returns `[{ "id": ..., "nome": ... }]` for every
//!       condominium, sorted by name.

mod list;

use actix_web::web::{get, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/condominios";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", get().to(list::process))
}
