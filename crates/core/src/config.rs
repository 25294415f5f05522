//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into [`Services`].
//! Nothing in the core reads environment variables; the binary reads them and hands the raw
//! values to [`CoreConfig::from_env_values`].
//!
//! [`Services`]: crate::Services

use std::path::{Path, PathBuf};

use chrono::FixedOffset;
use cuida_council::RoleCouncilTable;
use cuida_status::StyleTable;
use cuida_temporal::{parse_offset, TemporalNormalizer};

use crate::constants::{HOME_UTC_OFFSET_ENV, ROLE_TABLE_ENV, STYLE_TABLE_ENV};
use crate::{CoreError, CoreResult};

/// Core configuration resolved at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoreConfig {
    home_offset: FixedOffset,
    style_table_path: Option<PathBuf>,
    role_table_path: Option<PathBuf>,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// Table paths, when given, must name existing files.
    pub fn new(
        home_offset: FixedOffset,
        style_table_path: Option<PathBuf>,
        role_table_path: Option<PathBuf>,
    ) -> CoreResult<Self> {
        for (name, path) in [
            (STYLE_TABLE_ENV, &style_table_path),
            (ROLE_TABLE_ENV, &role_table_path),
        ] {
            if let Some(path) = path {
                if !path.is_file() {
                    return Err(CoreError::InvalidConfig(format!(
                        "{name} does not name a file: {}",
                        path.display()
                    )));
                }
            }
        }

        Ok(Self {
            home_offset,
            style_table_path,
            role_table_path,
        })
    }

    /// Build a configuration from raw environment values.
    ///
    /// Absent or blank values fall back to the defaults: `-03:00` and the built-in tables.
    pub fn from_env_values(
        home_offset: Option<String>,
        style_table: Option<String>,
        role_table: Option<String>,
    ) -> CoreResult<Self> {
        Self::new(
            home_offset_from_env_value(home_offset)?,
            path_from_env_value(style_table),
            path_from_env_value(role_table),
        )
    }

    pub fn home_offset(&self) -> FixedOffset {
        self.home_offset
    }

    pub fn style_table_path(&self) -> Option<&Path> {
        self.style_table_path.as_deref()
    }

    pub fn role_table_path(&self) -> Option<&Path> {
        self.role_table_path.as_deref()
    }

    /// Loads the configured style table, or the built-in one.
    pub fn load_style_table(&self) -> CoreResult<StyleTable> {
        match self.style_table_path() {
            Some(path) => {
                tracing::info!(path = %path.display(), "loading status style table");
                Ok(StyleTable::from_yaml(&read_table(path)?)?)
            }
            None => Ok(StyleTable::builtin()),
        }
    }

    /// Loads the configured role to council table, or the built-in one.
    pub fn load_role_table(&self) -> CoreResult<RoleCouncilTable> {
        match self.role_table_path() {
            Some(path) => {
                tracing::info!(path = %path.display(), "loading role council table");
                Ok(RoleCouncilTable::from_yaml(&read_table(path)?)?)
            }
            None => Ok(RoleCouncilTable::builtin()),
        }
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            home_offset: default_home_offset(),
            style_table_path: None,
            role_table_path: None,
        }
    }
}

/// Parse the home offset from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns `-03:00`.
pub fn home_offset_from_env_value(value: Option<String>) -> CoreResult<FixedOffset> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value {
        Some(v) => parse_offset(&v).map_err(|e| {
            CoreError::InvalidConfig(format!("{HOME_UTC_OFFSET_ENV}: {e}"))
        }),
        None => Ok(default_home_offset()),
    }
}

fn default_home_offset() -> FixedOffset {
    TemporalNormalizer::default().home_offset()
}

fn path_from_env_value(value: Option<String>) -> Option<PathBuf> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn read_table(path: &Path) -> CoreResult<String> {
    std::fs::read_to_string(path).map_err(|source| CoreError::TableRead {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_home_offset_defaults_when_blank() {
        let offset = home_offset_from_env_value(None).expect("default");
        assert_eq!(offset.local_minus_utc(), -3 * 3600);

        let offset = home_offset_from_env_value(Some("   ".into())).expect("default");
        assert_eq!(offset.local_minus_utc(), -3 * 3600);
    }

    #[test]
    fn test_home_offset_parses_value() {
        let offset = home_offset_from_env_value(Some(" +01:00 ".into())).expect("valid");
        assert_eq!(offset.local_minus_utc(), 3600);
    }

    #[test]
    fn test_home_offset_rejects_garbage() {
        let err = home_offset_from_env_value(Some("brasilia".into())).expect_err("invalid");
        assert!(matches!(err, CoreError::InvalidConfig(msg) if msg.contains(HOME_UTC_OFFSET_ENV)));
    }

    #[test]
    fn test_missing_table_file_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("styles.yaml");
        let err = CoreConfig::from_env_values(
            None,
            Some(missing.to_string_lossy().into_owned()),
            None,
        )
        .expect_err("missing file");
        assert!(matches!(err, CoreError::InvalidConfig(msg) if msg.contains(STYLE_TABLE_ENV)));
    }

    #[test]
    fn test_builtin_tables_when_unconfigured() {
        let config = CoreConfig::from_env_values(None, Some(String::new()), None).expect("config");
        assert_eq!(config.style_table_path(), None);
        assert_eq!(
            config.load_style_table().expect("builtin"),
            StyleTable::builtin()
        );
        assert_eq!(
            config.load_role_table().expect("builtin"),
            RoleCouncilTable::builtin()
        );
    }

    #[test]
    fn test_loads_role_table_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "roles:\n  - {{ id: 42, name: Triagem, sector: 1 }}").expect("write");

        let config = CoreConfig::new(
            FixedOffset::east_opt(0).expect("utc"),
            None,
            Some(file.path().to_path_buf()),
        )
        .expect("config");

        let table = config.load_role_table().expect("table");
        assert_eq!(table.len(), 1);
        assert!(table.get(42).is_some());
    }

    #[test]
    fn test_bad_style_table_surfaces_status_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "patient: {{}}\nstaff: {{}}").expect("write");

        let config =
            CoreConfig::new(FixedOffset::east_opt(0).expect("utc"), Some(file.path().into()), None)
                .expect("config");

        let err = config.load_style_table().expect_err("incomplete table");
        assert!(matches!(err, CoreError::Status(_)));
    }
}
