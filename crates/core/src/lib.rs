//! # Cuida Core
//!
//! Wires the normalisation components together from configuration resolved at startup.
//!
//! The component crates are re-exported so callers depend on this crate only:
//! - [`documents`]: CPF and CEP validation and masks
//! - [`temporal`]: wire, display and UI date conversion
//! - [`status`]: status resolution and styling
//! - [`council`]: council registration requirements for staff roles
//!
//! **No I/O beyond startup**: tables are read once by [`Services::from_config`]; every
//! operation afterwards is pure.

pub mod config;
pub mod constants;
mod error;

pub use config::CoreConfig;
pub use error::{CoreError, CoreResult};

pub use cuida_council as council;
pub use cuida_documents as documents;
pub use cuida_status as status;
pub use cuida_temporal as temporal;

use cuida_council::CouncilResolver;
use cuida_documents::{Document, DocumentKind};
use cuida_status::StatusStyler;
use cuida_temporal::TemporalNormalizer;

/// The stateful components, built once and shared read-only.
///
/// `Services` is `Send + Sync`; wrap it in an `Arc` to share across threads.
#[derive(Clone, Debug, Default)]
pub struct Services {
    pub temporal: TemporalNormalizer,
    pub statuses: StatusStyler,
    pub councils: CouncilResolver,
}

impl Services {
    /// Builds every component from `config`, loading any configured tables.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError`] if a configured table cannot be read or parsed.
    pub fn from_config(config: &CoreConfig) -> CoreResult<Self> {
        let services = Self {
            temporal: TemporalNormalizer::new(config.home_offset()),
            statuses: StatusStyler::new(config.load_style_table()?),
            councils: CouncilResolver::new(config.load_role_table()?),
        };

        tracing::debug!(
            home_offset = %config.home_offset(),
            roles = services.councils.table().len(),
            "services initialised"
        );

        Ok(services)
    }

    /// Validates `raw` as a document of `kind`.
    ///
    /// Blank input is valid; whether a value is required is the caller's decision.
    pub fn validate_document(&self, kind: DocumentKind, raw: &str) -> CoreResult<()> {
        Document { kind, raw }.validate()?;
        Ok(())
    }
}
