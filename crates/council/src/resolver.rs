//! Two-tier council requirement resolution.

use serde::{Deserialize, Serialize};

use crate::{Council, RoleCouncilTable, RoleEntry, Sector};

/// A role as listed by the remote system.
///
/// Field names from the remote listing (`nome`, `conselho_profissional`, `setor_id`) are
/// accepted as aliases.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: u32,

    #[serde(alias = "nome")]
    pub name: String,

    #[serde(default, alias = "conselho_profissional")]
    pub council_code: Option<String>,

    #[serde(default, alias = "setor_id")]
    pub sector_id: Option<u32>,
}

impl Role {
    /// The council code, if present and not blank.
    pub fn council_code(&self) -> Option<&str> {
        self.council_code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
    }
}

/// Where a [`CouncilRequirement`] came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequirementSource {
    /// The role list supplied by the caller.
    Dynamic,
    /// The built-in or configured [`RoleCouncilTable`].
    Static,
}

impl RequirementSource {
    /// Sources in the order they are consulted.
    pub const TIERS: [RequirementSource; 2] =
        [RequirementSource::Dynamic, RequirementSource::Static];
}

/// A council registration number must be collected for the role.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CouncilRequirement {
    /// Council code as given by the source, e.g. `CRM`.
    pub council: String,
    /// Form label for the registration number field.
    pub label: String,
    pub source: RequirementSource,
}

impl CouncilRequirement {
    fn new(code: &str, source: RequirementSource) -> Self {
        Self {
            council: code.to_owned(),
            label: format!("Número do {code}"),
            source,
        }
    }

    /// The council as a known [`Council`], if the code is one of the seven.
    pub fn known_council(&self) -> Option<Council> {
        Council::parse(&self.council).ok()
    }
}

/// Decides whether a role needs a council registration number.
#[derive(Clone, Debug, Default)]
pub struct CouncilResolver {
    table: RoleCouncilTable,
}

impl CouncilResolver {
    pub fn new(table: RoleCouncilTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &RoleCouncilTable {
        &self.table
    }

    /// Resolves the council requirement for `role_id`.
    ///
    /// The caller's `roles` list is consulted first; an entry there only decides the outcome
    /// if it carries a non-blank council code. Otherwise the static table is used. `None`
    /// means no registration number is required.
    pub fn resolve(&self, role_id: u32, roles: Option<&[Role]>) -> Option<CouncilRequirement> {
        RequirementSource::TIERS
            .iter()
            .find_map(|tier| match tier {
                RequirementSource::Dynamic => Self::dynamic_tier(role_id, roles?),
                RequirementSource::Static => self.static_tier(role_id),
            })
    }

    fn dynamic_tier(role_id: u32, roles: &[Role]) -> Option<CouncilRequirement> {
        let role = roles.iter().find(|r| r.id == role_id)?;
        let code = role.council_code()?;
        Some(CouncilRequirement::new(code, RequirementSource::Dynamic))
    }

    fn static_tier(&self, role_id: u32) -> Option<CouncilRequirement> {
        let entry = self.table.get(role_id)?;
        tracing::debug!(role_id, council = %entry.council, "council requirement from static table");
        Some(CouncilRequirement::new(
            entry.council.code(),
            RequirementSource::Static,
        ))
    }

    /// The council regulating `sector_id`, or `None` for an unknown sector.
    pub fn council_for_sector(&self, sector_id: u32) -> Option<Council> {
        Sector::from_id(sector_id).ok().map(Sector::council)
    }

    /// Ids of every role in the static table, ascending.
    pub fn roles_requiring_council(&self) -> Vec<u32> {
        self.table.entries().map(|e| e.id).collect()
    }

    /// Static table entries belonging to `sector`, ascending by id.
    pub fn roles_for_sector(&self, sector: Sector) -> Vec<&RoleEntry> {
        self.table
            .entries()
            .filter(|e| e.sector == sector)
            .collect()
    }
}
