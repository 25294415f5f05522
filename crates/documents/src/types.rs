//! Validated document newtypes.

use crate::mask::{mask_postal_code, mask_taxpayer_id};
use crate::validation::{strip_digits, validate_postal_code, validate_taxpayer_id};
use crate::{DocumentError, DocumentKind, DocumentResult};

/// A CPF that is known to be present and checksum-valid.
///
/// This type stores the 11 digits without punctuation. [`Display`](std::fmt::Display)
/// renders the `###.###.###-##` mask.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cpf(String);

impl Cpf {
    /// Creates a new `Cpf` from masked or unmasked input.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Empty`] if `input` contains no digits, or the validation
    /// failure reported by [`validate_taxpayer_id`].
    pub fn new(input: impl AsRef<str>) -> DocumentResult<Self> {
        let digits = strip_digits(input.as_ref());
        if digits.is_empty() {
            return Err(DocumentError::Empty(DocumentKind::TaxpayerId));
        }
        validate_taxpayer_id(&digits)?;
        Ok(Self(digits))
    }

    /// Returns the 11 digits without punctuation.
    pub fn digits(&self) -> &str {
        &self.0
    }
}

/// A CEP that is known to be present and well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cep(String);

impl Cep {
    /// Creates a new `Cep` from masked or unmasked input.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Empty`] if `input` contains no digits, or
    /// [`DocumentError::WrongLength`] if it does not contain exactly 8.
    pub fn new(input: impl AsRef<str>) -> DocumentResult<Self> {
        let digits = strip_digits(input.as_ref());
        if digits.is_empty() {
            return Err(DocumentError::Empty(DocumentKind::PostalCode));
        }
        validate_postal_code(&digits)?;
        Ok(Self(digits))
    }

    /// Returns the 8 digits without punctuation.
    pub fn digits(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Cpf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", mask_taxpayer_id(&self.0))
    }
}

impl std::fmt::Display for Cep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", mask_postal_code(&self.0))
    }
}

impl std::str::FromStr for Cpf {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Cpf::new(s)
    }
}

impl std::str::FromStr for Cep {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Cep::new(s)
    }
}

impl serde::Serialize for Cpf {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Cpf {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Cpf::new(&s).map_err(serde::de::Error::custom)
    }
}

impl serde::Serialize for Cep {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Cep {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Cep::new(&s).map_err(serde::de::Error::custom)
    }
}
