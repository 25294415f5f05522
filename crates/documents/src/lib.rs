//! Brazilian document validation and masking.
//!
//! This crate validates the two identifier formats collected on patient and staff forms:
//! - **CPF** (taxpayer ID): 11 digits, the last two being check digits
//! - **CEP** (postal code): 8 digits, no checksum
//!
//! All validators strip every non-digit character first, so masked input such as
//! `529.982.247-25` or `01310-100` is accepted as-is. An input that strips to nothing is
//! treated as *valid*: whether a field is required is the caller's concern, not ours.
//!
//! Validated newtypes ([`Cpf`], [`Cep`]) are provided for callers that want the guarantee
//! carried in the type system once a value has been accepted.

mod mask;
mod types;
mod validation;

pub use mask::{format_taxpayer_id, mask_postal_code, mask_taxpayer_id};
pub use types::{Cep, Cpf};
pub use validation::{strip_digits, validate_postal_code, validate_taxpayer_id};

/// Number of digits in a CPF.
pub const TAXPAYER_ID_LEN: usize = 11;

/// Number of digits in a CEP.
pub const POSTAL_CODE_LEN: usize = 8;

/// The kind of document a raw string claims to be.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// Brazilian individual taxpayer registry number (CPF).
    TaxpayerId,
    /// Brazilian postal code (CEP).
    PostalCode,
}

impl DocumentKind {
    /// Number of digits a well-formed document of this kind carries.
    pub fn expected_len(self) -> usize {
        match self {
            DocumentKind::TaxpayerId => TAXPAYER_ID_LEN,
            DocumentKind::PostalCode => POSTAL_CODE_LEN,
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentKind::TaxpayerId => write!(f, "CPF"),
            DocumentKind::PostalCode => write!(f, "CEP"),
        }
    }
}

/// A raw input string tagged with the document kind it should be validated as.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Document<'a> {
    pub kind: DocumentKind,
    pub raw: &'a str,
}

impl<'a> Document<'a> {
    pub fn taxpayer_id(raw: &'a str) -> Self {
        Self {
            kind: DocumentKind::TaxpayerId,
            raw,
        }
    }

    pub fn postal_code(raw: &'a str) -> Self {
        Self {
            kind: DocumentKind::PostalCode,
            raw,
        }
    }

    /// Validates this document according to its kind.
    pub fn validate(&self) -> DocumentResult<()> {
        match self.kind {
            DocumentKind::TaxpayerId => validate_taxpayer_id(self.raw),
            DocumentKind::PostalCode => validate_postal_code(self.raw),
        }
    }
}

/// Reasons a document fails validation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    /// The stripped input does not have the digit count required by its kind.
    #[error("{kind} must have {expected} digits, got {actual}")]
    WrongLength {
        kind: DocumentKind,
        expected: usize,
        actual: usize,
    },

    /// Every digit of the CPF is the same (for example `111.111.111-11`).
    #[error("CPF cannot consist of a single repeated digit")]
    RepeatedDigits,

    /// The first CPF check digit does not match the computed value.
    #[error("CPF first check digit mismatch: expected {expected}, found {found}")]
    CheckDigit1Mismatch { expected: u8, found: u8 },

    /// The second CPF check digit does not match the computed value.
    #[error("CPF second check digit mismatch: expected {expected}, found {found}")]
    CheckDigit2Mismatch { expected: u8, found: u8 },

    /// A validated newtype was asked to wrap an empty value.
    #[error("{0} cannot be empty")]
    Empty(DocumentKind),
}

impl DocumentError {
    /// Stable reason code reported to form controllers.
    pub fn reason_code(&self) -> &'static str {
        match self {
            DocumentError::WrongLength { .. } => "WRONG_LENGTH",
            DocumentError::RepeatedDigits => "REPEATED_DIGITS",
            DocumentError::CheckDigit1Mismatch { .. } => "CHECK_DIGIT_1_MISMATCH",
            DocumentError::CheckDigit2Mismatch { .. } => "CHECK_DIGIT_2_MISMATCH",
            DocumentError::Empty(_) => "EMPTY",
        }
    }
}

/// Result type for document validation.
pub type DocumentResult<T> = Result<T, DocumentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_dispatches_on_kind() {
        assert!(Document::taxpayer_id("529.982.247-25").validate().is_ok());
        assert!(Document::postal_code("01310-100").validate().is_ok());

        let err = Document::postal_code("529.982.247-25")
            .validate()
            .expect_err("11 digits is not a CEP");
        assert_eq!(
            err,
            DocumentError::WrongLength {
                kind: DocumentKind::PostalCode,
                expected: 8,
                actual: 11,
            }
        );
    }

    #[test]
    fn test_reason_codes_are_stable() {
        let err = DocumentError::WrongLength {
            kind: DocumentKind::TaxpayerId,
            expected: 11,
            actual: 3,
        };
        assert_eq!(err.reason_code(), "WRONG_LENGTH");
        assert_eq!(DocumentError::RepeatedDigits.reason_code(), "REPEATED_DIGITS");
        assert_eq!(
            DocumentError::CheckDigit1Mismatch {
                expected: 1,
                found: 2
            }
            .reason_code(),
            "CHECK_DIGIT_1_MISMATCH"
        );
        assert_eq!(
            DocumentError::CheckDigit2Mismatch {
                expected: 1,
                found: 2
            }
            .reason_code(),
            "CHECK_DIGIT_2_MISMATCH"
        );
    }

    #[test]
    fn test_wrong_length_message_names_the_kind() {
        let err = validate_taxpayer_id("123").expect_err("too short");
        assert_eq!(err.to_string(), "CPF must have 11 digits, got 3");
    }
}
