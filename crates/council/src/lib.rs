//! Professional council requirements for staff roles.
//!
//! Some roles may only be filled by professionals registered with a regional council (CRM for
//! physicians, COREN for nursing, ...). When a staff form selects a role, the caller asks
//! [`CouncilResolver::resolve`] whether a registration number must be collected and under
//! which council.
//!
//! Resolution consults two sources in a fixed order, see [`RequirementSource::TIERS`]:
//! the role list the caller fetched from the remote system, then the built-in
//! [`RoleCouncilTable`].

mod resolver;
mod table;

pub use resolver::{CouncilRequirement, CouncilResolver, RequirementSource, Role};
pub use table::{RoleCouncilTable, RoleEntry};

use serde::{Deserialize, Serialize};

/// Errors produced while loading council tables or parsing council codes.
#[derive(Debug, thiserror::Error)]
pub enum CouncilError {
    #[error("unknown council code '{0}'")]
    UnknownCouncil(String),

    #[error("unknown sector id {0}")]
    UnknownSector(u32),

    #[error("role table schema mismatch at {path}: {message}")]
    Schema { path: String, message: String },

    #[error("role {0} is listed more than once")]
    DuplicateRole(u32),
}

/// Result type for council operations.
pub type CouncilResult<T> = Result<T, CouncilError>;

/// A regional professional council.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Council {
    Coren,
    Crm,
    Crefito,
    Crefono,
    Crn,
    Crp,
    Crf,
}

impl Council {
    pub const ALL: [Council; 7] = [
        Council::Coren,
        Council::Crm,
        Council::Crefito,
        Council::Crefono,
        Council::Crn,
        Council::Crp,
        Council::Crf,
    ];

    /// The acronym used on registration cards, e.g. `CRM`.
    pub fn code(self) -> &'static str {
        match self {
            Council::Coren => "COREN",
            Council::Crm => "CRM",
            Council::Crefito => "CREFITO",
            Council::Crefono => "CREFONO",
            Council::Crn => "CRN",
            Council::Crp => "CRP",
            Council::Crf => "CRF",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Council::Coren => "Conselho Regional de Enfermagem",
            Council::Crm => "Conselho Regional de Medicina",
            Council::Crefito => "Conselho Regional de Fisioterapia e Terapia Ocupacional",
            Council::Crefono => "Conselho Regional de Fonoaudiologia",
            Council::Crn => "Conselho Regional de Nutrição",
            Council::Crp => "Conselho Regional de Psicologia",
            Council::Crf => "Conselho Regional de Farmácia",
        }
    }

    /// Parses a council code, ignoring case and surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`CouncilError::UnknownCouncil`] if `code` is not one of the seven councils.
    pub fn parse(code: &str) -> CouncilResult<Self> {
        let wanted = code.trim();
        Council::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CouncilError::UnknownCouncil(code.to_owned()))
    }
}

impl std::fmt::Display for Council {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Council {
    type Err = CouncilError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Council::parse(s)
    }
}

/// A professional sector; every sector is regulated by exactly one council.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sector {
    Nursing = 1,
    Medicine = 2,
    Physiotherapy = 3,
    SpeechTherapy = 4,
    Nutrition = 5,
    Psychology = 6,
    Pharmacy = 7,
}

impl Sector {
    pub const ALL: [Sector; 7] = [
        Sector::Nursing,
        Sector::Medicine,
        Sector::Physiotherapy,
        Sector::SpeechTherapy,
        Sector::Nutrition,
        Sector::Psychology,
        Sector::Pharmacy,
    ];

    /// The numeric id used by the remote system.
    pub fn id(self) -> u32 {
        self as u32
    }

    pub fn from_id(id: u32) -> CouncilResult<Self> {
        Sector::ALL
            .into_iter()
            .find(|s| s.id() == id)
            .ok_or(CouncilError::UnknownSector(id))
    }

    pub fn name(self) -> &'static str {
        match self {
            Sector::Nursing => "Enfermagem",
            Sector::Medicine => "Médico",
            Sector::Physiotherapy => "Fisioterapia",
            Sector::SpeechTherapy => "Fonoaudiologia",
            Sector::Nutrition => "Nutrição",
            Sector::Psychology => "Psicologia",
            Sector::Pharmacy => "Farmácia",
        }
    }

    pub fn council(self) -> Council {
        match self {
            Sector::Nursing => Council::Coren,
            Sector::Medicine => Council::Crm,
            Sector::Physiotherapy => Council::Crefito,
            Sector::SpeechTherapy => Council::Crefono,
            Sector::Nutrition => Council::Crn,
            Sector::Psychology => Council::Crp,
            Sector::Pharmacy => Council::Crf,
        }
    }
}

impl Serialize for Sector {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u32(self.id())
    }
}

impl<'de> Deserialize<'de> for Sector {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let id = u32::deserialize(deserializer)?;
        Sector::from_id(id).map_err(serde::de::Error::custom)
    }
}
