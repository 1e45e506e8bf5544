//! Turning a composed document into PDF bytes.
//!
//! Rendering goes through a [`RenderEngine`], which hands out one isolated
//! [`RenderSession`] per document. The session is owned by a guard that
//! closes it when dropped, so it is released exactly once whether the load,
//! the export or anything in between fails.

use crate::error::{Result, TermoError};
use crate::pipeline::compose::{ComposedDocument, PrintSettings};
use log::{debug, info, warn};
use std::sync::Arc;

/// Name offered to the client for the downloaded PDF.
pub const SUGGESTED_FILE_NAME: &str = "termo-gerado.pdf";

/// Source of isolated rendering sessions.
pub trait RenderEngine: Send + Sync {
    fn open_session(&self) -> Result<Box<dyn RenderSession>>;
}

pub trait RenderSession {
    /// Loads `html` and returns once the page and its resources have loaded.
    fn load_html(&mut self, html: &str) -> Result<()>;

    fn export_pdf(&mut self, settings: &PrintSettings) -> Result<Vec<u8>>;

    fn close(&mut self) -> Result<()>;
}

struct SessionGuard {
    session: Box<dyn RenderSession>,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        if let Err(e) = self.session.close() {
            warn!("Failed to close render session: {}", e);
        }
    }
}

/// The PDF produced for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifact {
    bytes: Vec<u8>,
    file_name: String,
}

impl RenderedArtifact {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

#[derive(Clone)]
pub struct PdfRenderer {
    engine: Arc<dyn RenderEngine>,
}

impl PdfRenderer {
    pub fn new(engine: Arc<dyn RenderEngine>) -> Self {
        Self { engine }
    }

    /// Prints `document` to PDF in a session of its own.
    ///
    /// The session is opened, loaded with the document's HTML and exported
    /// with its print settings. It is closed exactly once before this
    /// returns, whichever step fails.
    ///
    /// # Arguments
    /// * `document` - The composed HTML and the print settings its layout needs.
    ///
    /// # Returns
    /// - `Ok(RenderedArtifact)` with the PDF bytes and `termo-gerado.pdf` as name.
    /// - `Err(TermoError::Render)` if the session fails at any step or the
    ///   engine returns no bytes.
    pub fn render(&self, document: &ComposedDocument) -> Result<RenderedArtifact> {
        let mut guard = SessionGuard {
            session: self.engine.open_session()?,
        };
        debug!("Loading {} bytes of HTML", document.html().len());
        guard.session.load_html(document.html())?;
        let bytes = guard.session.export_pdf(document.print_settings())?;
        drop(guard);

        if bytes.is_empty() {
            return Err(TermoError::render("renderer returned an empty document"));
        }
        info!("Rendered PDF of {} bytes", bytes.len());
        Ok(RenderedArtifact {
            bytes,
            file_name: SUGGESTED_FILE_NAME.to_string(),
        })
    }
}
