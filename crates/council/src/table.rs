//! The static role to council table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Council, CouncilError, CouncilResult, Sector};

/// A well-known role that always requires a council registration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RoleEntry {
    pub id: u32,
    pub name: String,
    pub sector: Sector,
    pub council: Council,
}

/// Immutable map from role id to its council requirement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoleCouncilTable {
    entries: BTreeMap<u32, RoleEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RoleTableWire {
    roles: Vec<RoleEntryWire>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RoleEntryWire {
    id: u32,
    name: String,
    sector: Sector,
    #[serde(default)]
    council: Option<Council>,
}

const BUILTIN_ROLES: &[(u32, &str, Sector)] = &[
    (101, "Escala de plantões", Sector::Nursing),
    (102, "Supervisão de enfermagem", Sector::Nursing),
    (103, "Treinamento técnico", Sector::Nursing),
    (104, "Avaliação de pacientes", Sector::Nursing),
    (201, "Avaliação clínica", Sector::Medicine),
    (202, "Prescrição de tratamentos", Sector::Medicine),
    (203, "Acompanhamento médico", Sector::Medicine),
    (204, "Emissão de laudos", Sector::Medicine),
    (301, "Avaliação motora", Sector::Physiotherapy),
    (302, "Planos terapêuticos", Sector::Physiotherapy),
    (303, "Sessões domiciliares", Sector::Physiotherapy),
    (304, "Reavaliação periódica", Sector::Physiotherapy),
    (401, "Avaliação fonoaudiológica", Sector::SpeechTherapy),
    (402, "Sessões de reabilitação", Sector::SpeechTherapy),
    (403, "Relatórios de evolução", Sector::SpeechTherapy),
    (404, "Orientação familiar", Sector::SpeechTherapy),
    (501, "Avaliação nutricional", Sector::Nutrition),
    (502, "Elaboração de dietas", Sector::Nutrition),
    (503, "Acompanhamento nutricional", Sector::Nutrition),
    (504, "Suporte ao cuidador", Sector::Nutrition),
    (601, "Avaliação psicológica", Sector::Psychology),
    (602, "Apoio ao paciente", Sector::Psychology),
    (603, "Apoio à família", Sector::Psychology),
    (604, "Relatórios de evolução", Sector::Psychology),
    (701, "Dispensação de medicamentos", Sector::Pharmacy),
    (702, "Conferência de prescrições", Sector::Pharmacy),
    (703, "Orientação farmacêutica", Sector::Pharmacy),
];

impl RoleCouncilTable {
    /// The table shipped with the application: four roles per sector (three for pharmacy),
    /// each requiring its sector's council.
    pub fn builtin() -> Self {
        let entries = BUILTIN_ROLES
            .iter()
            .map(|&(id, name, sector)| {
                let entry = RoleEntry {
                    id,
                    name: name.to_owned(),
                    sector,
                    council: sector.council(),
                };
                (id, entry)
            })
            .collect();
        Self { entries }
    }

    /// Builds a table from explicit entries.
    ///
    /// # Errors
    ///
    /// Returns [`CouncilError::DuplicateRole`] if two entries share an id.
    pub fn from_entries(entries: impl IntoIterator<Item = RoleEntry>) -> CouncilResult<Self> {
        let mut map = BTreeMap::new();
        for entry in entries {
            let id = entry.id;
            if map.insert(id, entry).is_some() {
                return Err(CouncilError::DuplicateRole(id));
            }
        }
        Ok(Self { entries: map })
    }

    /// Parses a role table from YAML.
    ///
    /// ```yaml
    /// roles:
    ///   - id: 201
    ///     name: Avaliação clínica
    ///     sector: 2
    ///     council: CRM   # optional, defaults to the sector's council
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`CouncilError::Schema`] with the failing field path if the YAML does not match,
    /// or [`CouncilError::DuplicateRole`] if an id repeats.
    pub fn from_yaml(yaml_text: &str) -> CouncilResult<Self> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);
        let wire = match serde_path_to_error::deserialize::<_, RoleTableWire>(deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let path = if path.is_empty() || path == "." {
                    "<root>".to_owned()
                } else {
                    path
                };
                return Err(CouncilError::Schema {
                    path,
                    message: err.into_inner().to_string(),
                });
            }
        };

        Self::from_entries(wire.roles.into_iter().map(|role| RoleEntry {
            id: role.id,
            name: role.name,
            council: role.council.unwrap_or_else(|| role.sector.council()),
            sector: role.sector,
        }))
    }

    pub fn get(&self, role_id: u32) -> Option<&RoleEntry> {
        self.entries.get(&role_id)
    }

    /// Entries in ascending id order.
    pub fn entries(&self) -> impl Iterator<Item = &RoleEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RoleCouncilTable {
    fn default() -> Self {
        Self::builtin()
    }
}
