//! Status label resolution and styling.
//!
//! Records arriving from the remote system carry free-form status text ("ativo", "ALTA_MEDICA",
//! "Licenca Medica"). This crate maps such text onto the closed patient and staff taxonomies
//! and looks up the display classes for the resolved label.
//!
//! - [`resolve`] is the general matcher over any ordered label set
//! - [`PatientStatus`] and [`StaffStatus`] are the typed taxonomies
//! - [`StatusStyler`] resolves against both taxonomies and returns a [`StyleDescriptor`]
//!
//! Style tables are immutable values injected into [`StatusStyler`]; use
//! [`StyleTable::builtin`] or load one from YAML with [`StyleTable::from_yaml`].

mod resolve;
mod style;
mod taxonomy;

pub use resolve::{normalize, resolve, resolve_index};
pub use style::{StatusStyler, StyleDescriptor, StyleTable};
pub use taxonomy::{PatientStatus, StaffStatus, Taxonomy};

/// Errors produced while loading style tables.
#[derive(Debug, thiserror::Error)]
pub enum StatusError {
    #[error("style table schema mismatch at {path}: {message}")]
    Schema { path: String, message: String },

    #[error("style table is missing {taxonomy} status '{label}'")]
    MissingLabel {
        taxonomy: Taxonomy,
        label: &'static str,
    },

    #[error("style table has unknown {taxonomy} status '{label}'")]
    UnknownLabel { taxonomy: Taxonomy, label: String },

    #[error("failed to render style table: {0}")]
    Render(String),
}

/// Result type for status operations.
pub type StatusResult<T> = Result<T, StatusError>;
