//! Style descriptors for status badges and cards.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::resolve::resolve_index;
use crate::{PatientStatus, StaffStatus, StatusError, StatusResult, Taxonomy};

/// CSS classes used to present one status.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleDescriptor {
    pub background: String,
    pub text: String,
    pub border: String,
    pub icon: String,
    pub badge: String,
}

impl StyleDescriptor {
    /// The descriptor returned for text that resolves to no known status.
    pub fn neutral() -> Self {
        tone("secondary", "bi bi-question-circle-fill")
    }

    /// Background, text and border classes joined for use on a single element.
    pub fn combined_classes(&self) -> String {
        format!("{} {} {}", self.background, self.text, self.border)
    }

    fn with_badge(mut self, badge: &str) -> Self {
        self.badge = badge.to_owned();
        self
    }
}

/// The full `<color>` family of classes for one status.
fn tone(color: &str, icon: &str) -> StyleDescriptor {
    StyleDescriptor {
        background: format!("bg-{color}-subtle"),
        text: format!("text-{color}"),
        border: format!("border-{color}"),
        icon: icon.to_owned(),
        badge: format!("bg-{color}"),
    }
}

/// An immutable descriptor for every patient and staff status.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleTable {
    // Index-aligned with `PatientStatus::ALL` and `StaffStatus::ALL`.
    patient: Vec<StyleDescriptor>,
    staff: Vec<StyleDescriptor>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct StyleTableWire {
    patient: BTreeMap<String, StyleDescriptor>,
    staff: BTreeMap<String, StyleDescriptor>,
}

impl StyleTable {
    /// The table shipped with the application.
    pub fn builtin() -> Self {
        let patient = vec![
            tone("success", "bi bi-check-circle-fill"),
            tone("warning", "bi bi-exclamation-triangle-fill"),
            tone("danger", "bi bi-x-circle-fill"),
            tone("info", "bi bi-clipboard-check-fill"),
            tone("primary", "bi bi-clipboard2-pulse-fill"),
            tone("dark", "bi bi-heart-fill"),
        ];

        let staff = vec![
            tone("success", "bi bi-check-circle-fill"),
            tone("danger", "bi bi-x-circle-fill").with_badge("bg-secondary"),
            tone("info", "bi bi-calendar2-check-fill"),
            tone("danger", "bi bi-hospital-fill"),
            tone("pink", "bi bi-heart-fill"),
            tone("primary", "bi bi-heart-fill"),
            tone("warning", "bi bi-exclamation-triangle-fill").with_badge("bg-warning text-dark"),
            tone("secondary", "bi bi-slash-circle-fill"),
            tone("dark", "bi bi-pause-circle-fill"),
            tone("success", "bi bi-award-fill"),
            tone("warning", "bi bi-exclamation-triangle-fill").with_badge("bg-warning text-dark"),
        ];

        Self { patient, staff }
    }

    /// Parses a style table from YAML.
    ///
    /// The document has two mappings, `patient` and `staff`, each keyed by canonical label.
    /// Every canonical label of both taxonomies must be present exactly as written.
    ///
    /// # Errors
    ///
    /// Returns [`StatusError`] if:
    /// - the YAML does not match the schema; the error carries the failing field path
    /// - a canonical label is missing
    /// - a key is not a canonical label
    pub fn from_yaml(yaml_text: &str) -> StatusResult<Self> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);
        let wire = match serde_path_to_error::deserialize::<_, StyleTableWire>(deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let path = if path.is_empty() || path == "." {
                    "<root>".to_owned()
                } else {
                    path
                };
                return Err(StatusError::Schema {
                    path,
                    message: err.into_inner().to_string(),
                });
            }
        };

        Ok(Self {
            patient: take_labels(wire.patient, Taxonomy::Patient)?,
            staff: take_labels(wire.staff, Taxonomy::Staff)?,
        })
    }

    /// Renders the table in the format accepted by [`StyleTable::from_yaml`].
    pub fn to_yaml(&self) -> StatusResult<String> {
        let collect = |taxonomy: Taxonomy, entries: &[StyleDescriptor]| {
            taxonomy
                .labels()
                .iter()
                .zip(entries)
                .map(|(label, style)| ((*label).to_owned(), style.clone()))
                .collect::<BTreeMap<_, _>>()
        };
        let wire = StyleTableWire {
            patient: collect(Taxonomy::Patient, &self.patient),
            staff: collect(Taxonomy::Staff, &self.staff),
        };
        serde_yaml::to_string(&wire).map_err(|e| StatusError::Render(e.to_string()))
    }

    pub fn patient(&self, status: PatientStatus) -> &StyleDescriptor {
        &self.patient[status as usize]
    }

    pub fn staff(&self, status: StaffStatus) -> &StyleDescriptor {
        &self.staff[status as usize]
    }
}

impl Default for StyleTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn take_labels(
    mut entries: BTreeMap<String, StyleDescriptor>,
    taxonomy: Taxonomy,
) -> StatusResult<Vec<StyleDescriptor>> {
    let mut out = Vec::with_capacity(taxonomy.labels().len());
    for &label in taxonomy.labels() {
        let style = entries
            .remove(label)
            .ok_or(StatusError::MissingLabel { taxonomy, label })?;
        out.push(style);
    }

    if let Some(label) = entries.into_keys().next() {
        return Err(StatusError::UnknownLabel { taxonomy, label });
    }

    Ok(out)
}

/// Resolves free-form status text and returns its presentation classes.
///
/// Lookups run against the union of both taxonomies, patient labels first, so shared labels
/// such as "Ativo" take the patient style.
#[derive(Clone, Debug)]
pub struct StatusStyler {
    table: StyleTable,
    union: Vec<&'static str>,
    neutral: StyleDescriptor,
}

impl StatusStyler {
    pub fn new(table: StyleTable) -> Self {
        let union = PatientStatus::LABELS
            .iter()
            .chain(StaffStatus::LABELS.iter())
            .copied()
            .collect();
        Self {
            table,
            union,
            neutral: StyleDescriptor::neutral(),
        }
    }

    pub fn table(&self) -> &StyleTable {
        &self.table
    }

    /// Returns the descriptor for `status`, or the neutral descriptor if it does not resolve.
    pub fn styling(&self, status: &str) -> &StyleDescriptor {
        match self.lookup(status, None) {
            Some((_, style)) => style,
            None => &self.neutral,
        }
    }

    /// Returns `true` if `status` resolves to a label in either taxonomy.
    pub fn has_status(&self, status: &str) -> bool {
        self.lookup(status, None).is_some()
    }

    /// Background, text and border classes of [`StatusStyler::styling`], space separated.
    pub fn all_classes(&self, status: &str) -> String {
        self.styling(status).combined_classes()
    }

    pub fn neutral(&self) -> &StyleDescriptor {
        &self.neutral
    }

    /// Resolves `status` to its canonical label and descriptor.
    ///
    /// With a `taxonomy` only that taxonomy is searched; otherwise the patient-first union is.
    pub fn lookup(
        &self,
        status: &str,
        taxonomy: Option<Taxonomy>,
    ) -> Option<(&'static str, &StyleDescriptor)> {
        let patient = |s: PatientStatus| (s.label(), self.table.patient(s));
        let staff = |s: StaffStatus| (s.label(), self.table.staff(s));

        match taxonomy {
            Some(Taxonomy::Patient) => PatientStatus::parse(status).map(patient),
            Some(Taxonomy::Staff) => StaffStatus::parse(status).map(staff),
            None => {
                let i = resolve_index(status, &self.union)?;
                let patient_len = PatientStatus::ALL.len();
                if i < patient_len {
                    Some(patient(PatientStatus::ALL[i]))
                } else {
                    Some(staff(StaffStatus::ALL[i - patient_len]))
                }
            }
        }
    }
}

impl Default for StatusStyler {
    fn default() -> Self {
        Self::new(StyleTable::builtin())
    }
}
