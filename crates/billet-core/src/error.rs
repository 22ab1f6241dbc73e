//! Error types for billet.

use serde::Serialize;
use thiserror::Error;

/// Top-level result type for billet operations.
pub type Result<T> = std::result::Result<T, BilletError>;

/// Top-level error type for billet.
#[derive(Debug, Error)]
pub enum BilletError {
    #[error("unknown document type: {0}")]
    UnknownDocType(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// A single save-time validation failure on one field.
///
/// Every error an editor can trigger is one of these; there is no
/// recovery path other than correcting the field and saving again.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum FieldError {
    #[error("ce champ est obligatoire")]
    Missing,

    #[error("doit compter au moins {min} caractères (actuellement {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("doit compter au plus {max} caractères (actuellement {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("doit être compris entre {min} et {max} (actuellement {actual})")]
    OutOfRange { min: i64, max: i64, actual: i64 },

    #[error("adresse email invalide : {value}")]
    InvalidEmail { value: String },

    #[error("format invalide : {value}")]
    PatternMismatch { value: String },

    #[error("URL invalide : {value}")]
    InvalidUrl { value: String },

    #[error("le slug « {slug} » est déjà utilisé par un autre document « {doc_type} »")]
    SlugTaken { doc_type: String, slug: String },

    #[error("texte alternatif manquant sur l'image")]
    MissingAltText,

    #[error("doit contenir au moins {min} élément(s)")]
    TooFewItems { min: usize },

    #[error("doit contenir au plus {max} élément(s) (actuellement {actual})")]
    TooManyItems { max: usize, actual: usize },

    #[error("entrée en double : {value}")]
    Duplicate { value: String },

    #[error("un document ne peut pas se référencer lui-même")]
    SelfReference,
}

/// A [`FieldError`] anchored to the field path that produced it,
/// e.g. `coverImage.alt` or `content[3].markDefs[0].href`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    pub path: String,
    #[serde(flatten)]
    pub error: FieldError,
}

impl Violation {
    pub fn new(path: impl Into<String>, error: FieldError) -> Self {
        Self {
            path: path.into(),
            error,
        }
    }

    /// Human-readable message, `path: description`.
    #[must_use]
    pub fn message(&self) -> String {
        format!("{}: {}", self.path, self.error)
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}
