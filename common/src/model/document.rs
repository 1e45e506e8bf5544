use serde::{Deserialize, Serialize};

/// A document template registered in the catalog.
///
/// `template_file` is a bare file name resolved against the templates
/// directory configured on the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentTemplate {
    pub id: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "templatefile")]
    pub template_file: String,
}

/// Entry of the `GET /api/documentos` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub id: String,
    #[serde(rename = "nome")]
    pub name: String,
}
