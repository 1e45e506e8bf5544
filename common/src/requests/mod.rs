use serde::{Deserialize, Serialize};

/// Multipart field names accepted by `POST /api/gerar-termo`.
pub mod fields {
    pub const DEBTOR: &str = "devedor";
    pub const DEBTOR_TAX_ID: &str = "cpf";
    pub const DEBTOR_ADDRESS: &str = "endereco_devedor";
    pub const DEBTOR_PHONE: &str = "telefone";
    pub const DEBTOR_EMAIL: &str = "email";
    pub const TOTAL_AMOUNT: &str = "valor_total";
    pub const PAYMENT_METHOD: &str = "forma_pagamento";
    pub const DOCUMENT_ID: &str = "documentoId";
    pub const CONDOMINIUM_ID: &str = "condominioId";

    /// Screenshot of the outstanding quotas.
    pub const QUOTA_IMAGE: &str = "imgCotas";
    /// Screenshot of the debt calculation.
    pub const CALCULATION_IMAGE: &str = "imgCalculo";

    /// Every part the endpoint reads; anything else is discarded.
    pub const ALL: [&str; 11] = [
        DEBTOR,
        DEBTOR_TAX_ID,
        DEBTOR_ADDRESS,
        DEBTOR_PHONE,
        DEBTOR_EMAIL,
        TOTAL_AMOUNT,
        PAYMENT_METHOD,
        DOCUMENT_ID,
        CONDOMINIUM_ID,
        QUOTA_IMAGE,
        CALCULATION_IMAGE,
    ];
}

/// Body returned with every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
