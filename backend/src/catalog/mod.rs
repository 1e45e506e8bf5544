//! Lookups of document templates and condominiums.
//!
//! The generation pipeline only sees the [`Catalog`] trait; the service
//! backs it with [`SqliteCatalog`].

mod sqlite;

pub use sqlite::SqliteCatalog;

use crate::error::Result;
use common::model::condominium::{Condominium, CondominiumSummary};
use common::model::document::{DocumentSummary, DocumentTemplate};

/// Read access to the records a term is generated from.
///
/// Implementations are shared across request threads, hence `Send + Sync`.
pub trait Catalog: Send + Sync {
    /// Fetches the document template registered under `id`.
    ///
    /// # Arguments
    /// * `id` - The `documentoId` sent with the form.
    ///
    /// # Returns
    /// - `Ok(DocumentTemplate)` with the template file name to load.
    /// - `Err(TermoError::LookupNotFound)` when no template has `id`.
    /// - `Err(TermoError::Catalog)` if the store cannot be queried.
    fn document_template(&self, id: &str) -> Result<DocumentTemplate>;

    /// Fetches the condominium registered under `id`.
    ///
    /// # Arguments
    /// * `id` - The `condominioId` sent with the form.
    ///
    /// # Returns
    /// - `Ok(Condominium)`; columns missing in the store are `None`.
    /// - `Err(TermoError::LookupNotFound)` when no condominium has `id`.
    /// - `Err(TermoError::Catalog)` if the store cannot be queried.
    fn condominium(&self, id: &str) -> Result<Condominium>;

    /// Lists every document template, ordered by name.
    fn documents(&self) -> Result<Vec<DocumentSummary>>;

    /// Lists every condominium, ordered by name.
    fn condominiums(&self) -> Result<Vec<CondominiumSummary>>;
}
