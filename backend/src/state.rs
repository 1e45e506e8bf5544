//! Application state shared with every request handler.

use crate::catalog::Catalog;
use crate::pipeline::TermGenerator;
use std::sync::Arc;

/// Cheap to clone; injected into actix as `web::Data<AppState>`.
#[derive(Clone)]
pub struct AppState {
    /// Term pipeline, run on the blocking pool for each generation request.
    pub generator: Arc<TermGenerator>,
    /// Catalog used by the listing endpoints.
    pub catalog: Arc<dyn Catalog>,
    /// Largest accepted multipart field, in bytes.
    pub max_attachment_bytes: usize,
}

impl AppState {
    pub fn new(
        generator: TermGenerator,
        catalog: Arc<dyn Catalog>,
        max_attachment_bytes: usize,
    ) -> Self {
        Self {
            generator: Arc::new(generator),
            catalog,
            max_attachment_bytes,
        }
    }
}
