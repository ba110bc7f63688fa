#![forbid(unsafe_code)]

//! Drag-and-drop configuration.
//!
//! [`DndConfig`] carries every tunable the placement engine reads. Hosts
//! usually build it in code with the `with_*` builders; the `TREESNAP_*`
//! environment variables listed below override individual fields for quick
//! experiments without a rebuild.
//!
//! | Variable | Field | Format |
//! |---|---|---|
//! | `TREESNAP_AUTO_SNAP` | `auto_snap_enabled` | `1/0/true/false/on/off` |
//! | `TREESNAP_ROWS_BEFORE` | `auto_snap_rows_before` | integer |
//! | `TREESNAP_ROWS_AFTER` | `auto_snap_rows_after` | integer |
//! | `TREESNAP_MAX_DEPTH` | `max_depth` | integer, or `none` |
//! | `TREESNAP_BLOCK_WIDTH` | `block_width` | positive number |
//! | `TREESNAP_ROW_DIRECTION` | `row_direction` | `ltr` or `rtl` |

use std::env;
use std::fmt;

use serde::{Deserialize, Serialize};

pub const ENV_AUTO_SNAP: &str = "TREESNAP_AUTO_SNAP";
pub const ENV_ROWS_BEFORE: &str = "TREESNAP_ROWS_BEFORE";
pub const ENV_ROWS_AFTER: &str = "TREESNAP_ROWS_AFTER";
pub const ENV_MAX_DEPTH: &str = "TREESNAP_MAX_DEPTH";
pub const ENV_BLOCK_WIDTH: &str = "TREESNAP_BLOCK_WIDTH";
pub const ENV_ROW_DIRECTION: &str = "TREESNAP_ROW_DIRECTION";

/// Default width of one indentation block in host pixels.
pub const DEFAULT_BLOCK_WIDTH: f64 = 44.0;

/// Default pointer movement (per axis) below which a hover is coalesced.
pub const DEFAULT_HOVER_EPSILON: f64 = 0.1;

/// Default drag type accepted by a tree.
pub const DEFAULT_ACCEPTED_TYPE: &str = "application/x-tree-node";

/// Horizontal reading direction of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowDirection {
    #[default]
    Ltr,
    /// Indentation grows to the left; horizontal drag displacement is mirrored.
    Rtl,
}

impl RowDirection {
    /// Sign applied to horizontal displacement.
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Ltr => 1.0,
            Self::Rtl => -1.0,
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ltr" => Some(Self::Ltr),
            "rtl" => Some(Self::Rtl),
            _ => None,
        }
    }
}

/// Placement engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DndConfig {
    /// Search nearby rows/depths for a valid placement when the literal one
    /// is rejected.
    pub auto_snap_enabled: bool,
    /// Rows above the target index scanned by auto-snap.
    pub auto_snap_rows_before: usize,
    /// Rows below the target index scanned by auto-snap.
    pub auto_snap_rows_after: usize,
    /// Maximum tree depth (counting the dragged subtree), if limited.
    pub max_depth: Option<usize>,
    /// Width of one indentation block in host pixels.
    pub block_width: f64,
    pub row_direction: RowDirection,
    /// Per-axis pointer movement that counts as "moved" between hovers.
    pub hover_epsilon: f64,
    /// Drag-type pattern accepted by this tree (`"*"`, `"text/*"`, exact).
    pub accepted_type: String,
    /// Maximum number of memoized insertion simulations per drag.
    pub memo_capacity: usize,
}

impl Default for DndConfig {
    fn default() -> Self {
        Self {
            auto_snap_enabled: false,
            auto_snap_rows_before: 1,
            auto_snap_rows_after: 1,
            max_depth: None,
            block_width: DEFAULT_BLOCK_WIDTH,
            row_direction: RowDirection::Ltr,
            hover_epsilon: DEFAULT_HOVER_EPSILON,
            accepted_type: DEFAULT_ACCEPTED_TYPE.to_string(),
            memo_capacity: 256,
        }
    }
}

impl DndConfig {
    #[must_use]
    pub fn with_auto_snap(mut self, enabled: bool) -> Self {
        self.auto_snap_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_auto_snap_rows(mut self, before: usize, after: usize) -> Self {
        self.auto_snap_rows_before = before;
        self.auto_snap_rows_after = after;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: impl Into<Option<usize>>) -> Self {
        self.max_depth = max_depth.into();
        self
    }

    #[must_use]
    pub fn with_block_width(mut self, width: f64) -> Self {
        self.block_width = width;
        self
    }

    #[must_use]
    pub fn with_row_direction(mut self, direction: RowDirection) -> Self {
        self.row_direction = direction;
        self
    }

    #[must_use]
    pub fn with_hover_epsilon(mut self, epsilon: f64) -> Self {
        self.hover_epsilon = epsilon;
        self
    }

    #[must_use]
    pub fn with_accepted_type(mut self, pattern: impl Into<String>) -> Self {
        self.accepted_type = pattern.into();
        self
    }

    #[must_use]
    pub fn with_memo_capacity(mut self, capacity: usize) -> Self {
        self.memo_capacity = capacity;
        self
    }

    /// Defaults overridden by `TREESNAP_*` environment variables.
    ///
    /// Unparsable values are ignored; use [`from_env_with`](Self::from_env_with)
    /// to see them.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|key| env::var(key).ok()).config
    }

    /// Parse overrides through a custom lookup (for tests) and report every
    /// value that could not be parsed.
    pub fn from_env_with<F>(mut get: F) -> DndConfigParse
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let mut errors = Vec::new();

        if let Some(value) = get(ENV_AUTO_SNAP) {
            match parse_bool(&value) {
                Some(parsed) => config.auto_snap_enabled = parsed,
                None => errors.push(DndConfigError::new(
                    "auto_snap_enabled",
                    value,
                    "expected bool (1/0/true/false/on/off)",
                )),
            }
        }

        if let Some(value) = get(ENV_ROWS_BEFORE) {
            match value.trim().parse() {
                Ok(parsed) => config.auto_snap_rows_before = parsed,
                Err(_) => errors.push(DndConfigError::new(
                    "auto_snap_rows_before",
                    value,
                    "expected non-negative integer",
                )),
            }
        }

        if let Some(value) = get(ENV_ROWS_AFTER) {
            match value.trim().parse() {
                Ok(parsed) => config.auto_snap_rows_after = parsed,
                Err(_) => errors.push(DndConfigError::new(
                    "auto_snap_rows_after",
                    value,
                    "expected non-negative integer",
                )),
            }
        }

        if let Some(value) = get(ENV_MAX_DEPTH) {
            let trimmed = value.trim();
            if trimmed.eq_ignore_ascii_case("none") || trimmed.is_empty() {
                config.max_depth = None;
            } else {
                match trimmed.parse() {
                    Ok(parsed) => config.max_depth = Some(parsed),
                    Err(_) => errors.push(DndConfigError::new(
                        "max_depth",
                        value,
                        "expected non-negative integer or none",
                    )),
                }
            }
        }

        if let Some(value) = get(ENV_BLOCK_WIDTH) {
            match value.trim().parse::<f64>() {
                Ok(parsed) if parsed.is_finite() && parsed > 0.0 => config.block_width = parsed,
                _ => errors.push(DndConfigError::new(
                    "block_width",
                    value,
                    "expected positive number",
                )),
            }
        }

        if let Some(value) = get(ENV_ROW_DIRECTION) {
            match RowDirection::parse(&value) {
                Some(parsed) => config.row_direction = parsed,
                None => errors.push(DndConfigError::new(
                    "row_direction",
                    value,
                    "expected ltr|rtl",
                )),
            }
        }

        DndConfigParse { config, errors }
    }

    /// Validate constraints and return all violations.
    pub fn validate(&self) -> Result<(), Vec<DndConfigError>> {
        let mut errors = Vec::new();
        if !(self.block_width.is_finite() && self.block_width > 0.0) {
            errors.push(DndConfigError::new(
                "block_width",
                self.block_width.to_string(),
                "must be a positive finite number",
            ));
        }
        if !(self.hover_epsilon.is_finite() && self.hover_epsilon >= 0.0) {
            errors.push(DndConfigError::new(
                "hover_epsilon",
                self.hover_epsilon.to_string(),
                "must be a non-negative finite number",
            ));
        }
        if self.accepted_type.is_empty() {
            errors.push(DndConfigError::new(
                "accepted_type",
                "",
                "must not be empty (use \"*\" to accept any type)",
            ));
        }
        if self.memo_capacity == 0 {
            errors.push(DndConfigError::new(
                "memo_capacity",
                "0",
                "must be at least 1",
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Result of parsing environment overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct DndConfigParse {
    pub config: DndConfig,
    pub errors: Vec<DndConfigError>,
}

/// One invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DndConfigError {
    pub field: &'static str,
    pub value: String,
    pub message: String,
}

impl DndConfigError {
    fn new(field: &'static str, value: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for DndConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} ({})", self.field, self.value, self.message)
    }
}

impl std::error::Error for DndConfigError {}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl FnMut(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_are_valid() {
        let config = DndConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.auto_snap_enabled);
        assert_eq!(config.max_depth, None);
        assert_eq!(config.hover_epsilon, 0.1);
    }

    #[test]
    fn builders_set_fields() {
        let config = DndConfig::default()
            .with_auto_snap(true)
            .with_auto_snap_rows(2, 3)
            .with_max_depth(4)
            .with_block_width(40.0)
            .with_row_direction(RowDirection::Rtl)
            .with_accepted_type("*");
        assert!(config.auto_snap_enabled);
        assert_eq!(config.auto_snap_rows_before, 2);
        assert_eq!(config.auto_snap_rows_after, 3);
        assert_eq!(config.max_depth, Some(4));
        assert_eq!(config.block_width, 40.0);
        assert_eq!(config.row_direction.sign(), -1.0);
        assert_eq!(config.accepted_type, "*");
    }

    #[test]
    fn env_overrides_apply() {
        let parsed = DndConfig::from_env_with(lookup(&[
            (ENV_AUTO_SNAP, "on"),
            (ENV_ROWS_BEFORE, "3"),
            (ENV_ROWS_AFTER, " 2 "),
            (ENV_MAX_DEPTH, "5"),
            (ENV_BLOCK_WIDTH, "32.5"),
            (ENV_ROW_DIRECTION, "RTL"),
        ]));
        assert!(parsed.errors.is_empty(), "{:?}", parsed.errors);
        let config = parsed.config;
        assert!(config.auto_snap_enabled);
        assert_eq!(config.auto_snap_rows_before, 3);
        assert_eq!(config.auto_snap_rows_after, 2);
        assert_eq!(config.max_depth, Some(5));
        assert_eq!(config.block_width, 32.5);
        assert_eq!(config.row_direction, RowDirection::Rtl);
    }

    #[test]
    fn env_errors_are_reported_and_defaults_kept() {
        let parsed = DndConfig::from_env_with(lookup(&[
            (ENV_AUTO_SNAP, "maybe"),
            (ENV_BLOCK_WIDTH, "-4"),
            (ENV_MAX_DEPTH, "deep"),
        ]));
        let fields: Vec<_> = parsed.errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["auto_snap_enabled", "max_depth", "block_width"]);
        assert_eq!(parsed.config, DndConfig::default());
    }

    #[test]
    fn env_max_depth_none_clears_limit() {
        let parsed = DndConfig::from_env_with(lookup(&[(ENV_MAX_DEPTH, "none")]));
        assert!(parsed.errors.is_empty());
        assert_eq!(parsed.config.max_depth, None);
    }

    #[test]
    fn validate_collects_all_violations() {
        let config = DndConfig::default()
            .with_block_width(0.0)
            .with_hover_epsilon(f64::NAN)
            .with_accepted_type("")
            .with_memo_capacity(0);
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors[0].field, "block_width");
        assert!(errors[0].to_string().starts_with("block_width=0"));
    }

    #[test]
    fn serde_fills_missing_fields_with_defaults() {
        let config: DndConfig =
            serde_json::from_str(r#"{"auto_snap_enabled":true,"row_direction":"rtl"}"#).unwrap();
        assert!(config.auto_snap_enabled);
        assert_eq!(config.row_direction, RowDirection::Rtl);
        assert_eq!(config.block_width, DEFAULT_BLOCK_WIDTH);
    }
}
