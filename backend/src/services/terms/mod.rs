//! # Term Generation Service
//!
//! *   **`POST /api/gerar-termo`**:
//!     - **Handler**: `generate::process`
//!     - **Description**: Accepts a `multipart/form-data` form with the debtor
//!       fields, `documentoId`, `condominioId` and the optional `imgCotas` and
//!       `imgCalculo` images, and answers with the generated PDF as an
//!       attachment named `termo-gerado.pdf`.

mod generate;

use actix_web::web::{post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/gerar-termo";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", post().to(generate::process))
}
