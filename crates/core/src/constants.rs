//! Constants used throughout the Cuida core crate.

/// Environment variable naming the home UTC offset, e.g. `-03:00`.
pub const HOME_UTC_OFFSET_ENV: &str = "CUIDA_HOME_UTC_OFFSET";

/// Environment variable naming an optional YAML status style table.
pub const STYLE_TABLE_ENV: &str = "CUIDA_STYLE_TABLE";

/// Environment variable naming an optional YAML role to council table.
pub const ROLE_TABLE_ENV: &str = "CUIDA_ROLE_TABLE";

