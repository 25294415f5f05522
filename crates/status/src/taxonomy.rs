//! The closed patient and staff status taxonomies.

use serde::{Deserialize, Serialize};

use crate::resolve::resolve_index;

/// Which taxonomy a label belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Taxonomy {
    Patient,
    Staff,
}

impl Taxonomy {
    /// The canonical labels of this taxonomy, in declaration order.
    pub fn labels(self) -> &'static [&'static str] {
        match self {
            Taxonomy::Patient => &PatientStatus::LABELS,
            Taxonomy::Staff => &StaffStatus::LABELS,
        }
    }
}

impl std::fmt::Display for Taxonomy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Taxonomy::Patient => f.write_str("patient"),
            Taxonomy::Staff => f.write_str("staff"),
        }
    }
}

impl std::str::FromStr for Taxonomy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "patient" => Ok(Taxonomy::Patient),
            "staff" => Ok(Taxonomy::Staff),
            _ => Err(format!(
                "unknown taxonomy '{s}', expected 'patient' or 'staff'"
            )),
        }
    }
}

/// Patient record status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatientStatus {
    #[serde(rename = "Ativo")]
    Active,
    #[serde(rename = "Em Avaliação")]
    UnderAssessment,
    #[serde(rename = "Inativo")]
    Inactive,
    #[serde(rename = "Alta Administrativa")]
    AdministrativeDischarge,
    #[serde(rename = "Alta Médica")]
    MedicalDischarge,
    #[serde(rename = "Óbito")]
    Deceased,
}

impl PatientStatus {
    pub const ALL: [PatientStatus; 6] = [
        PatientStatus::Active,
        PatientStatus::UnderAssessment,
        PatientStatus::Inactive,
        PatientStatus::AdministrativeDischarge,
        PatientStatus::MedicalDischarge,
        PatientStatus::Deceased,
    ];

    /// Canonical labels, index-aligned with [`PatientStatus::ALL`].
    pub const LABELS: [&'static str; 6] = [
        "Ativo",
        "Em Avaliação",
        "Inativo",
        "Alta Administrativa",
        "Alta Médica",
        "Óbito",
    ];

    pub fn label(self) -> &'static str {
        Self::LABELS[self as usize]
    }

    /// Resolves free text to a patient status using [`resolve`](crate::resolve()) rules.
    pub fn parse(candidate: &str) -> Option<Self> {
        resolve_index(candidate, &Self::LABELS).map(|i| Self::ALL[i])
    }
}

impl std::fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Staff member employment status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StaffStatus {
    #[serde(rename = "Ativo")]
    Active,
    #[serde(rename = "Inativo")]
    Inactive,
    #[serde(rename = "Férias")]
    Vacation,
    #[serde(rename = "Licença Médica")]
    SickLeave,
    #[serde(rename = "Licença Maternidade")]
    MaternityLeave,
    #[serde(rename = "Licença Paternidade")]
    PaternityLeave,
    #[serde(rename = "Afastado por Acidente de Trabalho")]
    WorkAccidentLeave,
    #[serde(rename = "Afastamento Não Remunerado")]
    UnpaidLeave,
    #[serde(rename = "Suspensão Contratual")]
    ContractSuspended,
    #[serde(rename = "Aposentado")]
    Retired,
    #[serde(rename = "Afastado por Outros Motivos")]
    OtherLeave,
}

impl StaffStatus {
    pub const ALL: [StaffStatus; 11] = [
        StaffStatus::Active,
        StaffStatus::Inactive,
        StaffStatus::Vacation,
        StaffStatus::SickLeave,
        StaffStatus::MaternityLeave,
        StaffStatus::PaternityLeave,
        StaffStatus::WorkAccidentLeave,
        StaffStatus::UnpaidLeave,
        StaffStatus::ContractSuspended,
        StaffStatus::Retired,
        StaffStatus::OtherLeave,
    ];

    /// Canonical labels, index-aligned with [`StaffStatus::ALL`].
    pub const LABELS: [&'static str; 11] = [
        "Ativo",
        "Inativo",
        "Férias",
        "Licença Médica",
        "Licença Maternidade",
        "Licença Paternidade",
        "Afastado por Acidente de Trabalho",
        "Afastamento Não Remunerado",
        "Suspensão Contratual",
        "Aposentado",
        "Afastado por Outros Motivos",
    ];

    pub fn label(self) -> &'static str {
        Self::LABELS[self as usize]
    }

    /// Resolves free text to a staff status using [`resolve`](crate::resolve()) rules.
    pub fn parse(candidate: &str) -> Option<Self> {
        resolve_index(candidate, &Self::LABELS).map(|i| Self::ALL[i])
    }
}

impl std::fmt::Display for StaffStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_align_with_variants() {
        for (i, status) in PatientStatus::ALL.iter().enumerate() {
            assert_eq!(status.label(), PatientStatus::LABELS[i]);
        }
        for (i, status) in StaffStatus::ALL.iter().enumerate() {
            assert_eq!(status.label(), StaffStatus::LABELS[i]);
        }
    }

    #[test]
    fn test_serde_uses_labels() {
        for status in PatientStatus::ALL {
            let json = serde_json::to_string(&status).expect("serialise");
            assert_eq!(json, format!("\"{}\"", status.label()));
            let back: PatientStatus = serde_json::from_str(&json).expect("deserialise");
            assert_eq!(back, status);
        }

        let staff: StaffStatus =
            serde_json::from_str("\"Licença Paternidade\"").expect("staff label");
        assert_eq!(staff, StaffStatus::PaternityLeave);
    }

    #[test]
    fn test_parse_is_lenient() {
        assert_eq!(PatientStatus::parse("ativo"), Some(PatientStatus::Active));
        assert_eq!(
            PatientStatus::parse("EM_AVALIACAO"),
            Some(PatientStatus::UnderAssessment)
        );
        assert_eq!(
            StaffStatus::parse("licenca maternidade"),
            Some(StaffStatus::MaternityLeave)
        );
        assert_eq!(
            StaffStatus::parse("afastado por outros motivos"),
            Some(StaffStatus::OtherLeave)
        );
        assert_eq!(PatientStatus::parse("Férias"), None);
    }

    #[test]
    fn test_taxonomy_from_str() {
        assert_eq!("Patient".parse::<Taxonomy>(), Ok(Taxonomy::Patient));
        assert_eq!(" staff ".parse::<Taxonomy>(), Ok(Taxonomy::Staff));
        assert!("visitor".parse::<Taxonomy>().is_err());
        assert_eq!(Taxonomy::Staff.labels().len(), 11);
    }
}
