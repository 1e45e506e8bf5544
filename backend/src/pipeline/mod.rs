//! # Term Generation Pipeline
//!
//! Produces the PDF of a debt-settlement term from a submitted form.
//!
//! ## Workflow
//!
//! 1.  **Lookups**: the condominium and the document template named by the
//!     form are fetched from the [`Catalog`]. An unknown id aborts the
//!     request before any rendering resource is acquired.
//! 2.  **Template**: the template file is read from the templates directory.
//! 3.  **Substitution**: a [`PlaceholderMap`](substitute::PlaceholderMap) is
//!     built from the form, the condominium, today's date and the uploaded
//!     images, and applied to the template. Tokens the map does not know are
//!     left in place and logged.
//! 4.  **Composition**: the body is wrapped with the letterhead according to
//!     the configured [`PaginationStrategy`].
//! 5.  **Rendering**: the composed document is printed to PDF by the
//!     [`PdfRenderer`].

pub mod assets;
pub mod chrome;
pub mod compose;
pub mod embed;
pub mod placeholders;
pub mod render;
pub mod submission;
pub mod substitute;

use crate::catalog::Catalog;
use crate::error::Result;
use assets::{AssetLoader, Letterhead};
use chrono::NaiveDate;
use compose::{compose, ComposedDocument, PaginationStrategy};
use log::{debug, info, warn};
use render::{PdfRenderer, RenderedArtifact};
use std::sync::Arc;
use submission::FormSubmission;

/// Runs the whole pipeline for one form; shared by every request.
pub struct TermGenerator {
    catalog: Arc<dyn Catalog>,
    templates: AssetLoader,
    letterhead: Arc<Letterhead>,
    renderer: PdfRenderer,
    strategy: PaginationStrategy,
}

impl TermGenerator {
    /// Creates a generator.
    ///
    /// # Arguments
    /// * `catalog` - Where documents and condominiums are looked up.
    /// * `templates` - Loader rooted at the templates directory.
    /// * `letterhead` - Header and footer images, loaded once at startup.
    /// * `renderer` - Prints the composed document to PDF.
    /// * `strategy` - How the letterhead is repeated on every page.
    pub fn new(
        catalog: Arc<dyn Catalog>,
        templates: AssetLoader,
        letterhead: Arc<Letterhead>,
        renderer: PdfRenderer,
        strategy: PaginationStrategy,
    ) -> Self {
        Self {
            catalog,
            templates,
            letterhead,
            renderer,
            strategy,
        }
    }

    pub fn strategy(&self) -> &PaginationStrategy {
        &self.strategy
    }

    /// Generates the term dated today in São Paulo.
    ///
    /// # Arguments
    /// * `form` - The decoded `POST /api/gerar-termo` form.
    ///
    /// # Returns
    /// - `Ok(RenderedArtifact)` with the PDF.
    /// - `Err(TermoError::LookupNotFound)` for an unknown condominium or
    ///   document, before any render session is opened.
    /// - `Err(TermoError::AssetNotFound)` if the template file is missing.
    /// - `Err(TermoError::Render)` if printing fails.
    pub fn generate(&self, form: &FormSubmission) -> Result<RenderedArtifact> {
        self.generate_on(form, placeholders::today_in_sao_paulo())
    }

    pub fn generate_on(&self, form: &FormSubmission, today: NaiveDate) -> Result<RenderedArtifact> {
        let document = self.compose_on(form, today)?;
        self.renderer.render(&document)
    }

    /// Runs every step up to, but not including, rendering.
    pub fn compose_on(&self, form: &FormSubmission, today: NaiveDate) -> Result<ComposedDocument> {
        let condominium = self.catalog.condominium(form.condominium_id())?;
        let template = self.catalog.document_template(form.document_id())?;
        info!(
            "Generating '{}' for condominium {} ({} layout)",
            template.id,
            condominium.id,
            self.strategy.name()
        );

        let text = self.templates.load_text(&template.template_file)?;
        let map = placeholders::build_placeholders(form, &condominium, today);
        debug!("Substituting {} placeholders", map.len());
        let body = substitute::substitute(&text, &map);

        let gaps = substitute::unresolved_tokens(&body);
        if !gaps.is_empty() {
            warn!(
                "Template {} has placeholders without a value: {}",
                template.template_file,
                gaps.join(", ")
            );
        }

        Ok(compose(
            &body,
            self.letterhead.header.inline(),
            self.letterhead.footer.inline(),
            &self.strategy,
        ))
    }
}
