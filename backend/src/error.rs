//! Error taxonomy of the term generation service.
//!
//! Every failure of a generation request ends up as a single `TermoError`,
//! which actix renders as a JSON `{"error": "..."}` body with the matching
//! status code. Unresolved template tokens are deliberately *not* part of this
//! enum: they are reported as warnings and left visible in the document.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use common::requests::ErrorBody;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TermoError>;

/// Catalog entity a lookup was made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Document,
    Condominium,
}

impl std::fmt::Display for LookupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupKind::Document => write!(f, "Documento"),
            LookupKind::Condominium => write!(f, "Condomínio"),
        }
    }
}

#[derive(Debug, Error)]
pub enum TermoError {
    #[error("{kind} não encontrado: {id}")]
    LookupNotFound { kind: LookupKind, id: String },

    #[error("Arquivo não encontrado: {}", path.display())]
    AssetNotFound { path: PathBuf },

    #[error("Falha ao renderizar o PDF: {0}")]
    Render(String),

    #[error("Anexo '{field}' excede o limite de {limit} bytes")]
    AttachmentTooLarge { field: String, limit: usize },

    #[error("Formulário excede o limite de {limit} bytes")]
    SubmissionTooLarge { limit: usize },

    #[error("Formulário inválido: {0}")]
    InvalidSubmission(String),

    #[error("Erro no catálogo: {0}")]
    Catalog(String),
}

impl TermoError {
    pub fn not_found(kind: LookupKind, id: impl Into<String>) -> Self {
        TermoError::LookupNotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn render(err: impl std::fmt::Display) -> Self {
        TermoError::Render(err.to_string())
    }
}

impl From<rusqlite::Error> for TermoError {
    fn from(e: rusqlite::Error) -> Self {
        TermoError::Catalog(e.to_string())
    }
}

impl From<actix_multipart::MultipartError> for TermoError {
    fn from(e: actix_multipart::MultipartError) -> Self {
        TermoError::InvalidSubmission(e.to_string())
    }
}

impl ResponseError for TermoError {
    fn status_code(&self) -> StatusCode {
        match self {
            TermoError::LookupNotFound { .. } => StatusCode::NOT_FOUND,
            TermoError::AttachmentTooLarge { .. } | TermoError::SubmissionTooLarge { .. } => {
                StatusCode::PAYLOAD_TOO_LARGE
            }
            TermoError::InvalidSubmission(_) => StatusCode::BAD_REQUEST,
            TermoError::AssetNotFound { .. } | TermoError::Render(_) | TermoError::Catalog(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}
