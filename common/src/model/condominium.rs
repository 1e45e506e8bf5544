use serde::{Deserialize, Serialize};

/// A condominium as stored in the catalog.
///
/// Every descriptive column is nullable in the catalog; a missing value is
/// rendered as an empty string in generated documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condominium {
    pub id: String,
    #[serde(rename = "nome")]
    pub name: Option<String>,
    /// CNPJ of the condominium.
    #[serde(rename = "cnpj")]
    pub tax_id: Option<String>,
    #[serde(rename = "endereco")]
    pub address: Option<String>,
    #[serde(rename = "bairro")]
    pub neighborhood: Option<String>,
    #[serde(rename = "cidade")]
    pub city: Option<String>,
    /// Name of the síndico, the condominium's legal representative.
    #[serde(rename = "sindico")]
    pub representative: Option<String>,
}

/// Entry of the `GET /api/condominios` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CondominiumSummary {
    pub id: String,
    #[serde(rename = "nome")]
    pub name: Option<String>,
}
