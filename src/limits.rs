// Front-end safety limits
//
// Bounds the work a single compilation may do:
// - source size accepted by the lexer
// - statement/expression nesting depth in the parser
// - total AST nodes built for one program
//
// Defaults are permissive and can be overridden from the [limits] table of smlc.toml

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Name of the optional configuration file looked up by the CLI
pub const CONFIG_FILE_NAME: &str = "smlc.toml";

/// Front-end limits with permissive defaults
#[derive(Debug, Clone, PartialEq)]
pub struct CompilerLimits {
    // Lexer limits
    pub max_input_size: usize, // Maximum source size in bytes

    // Parser limits
    pub max_expr_depth: usize, // Maximum statement/expression nesting depth

    // AST limits
    pub max_ast_nodes: usize, // Maximum AST nodes per program
}

impl Default for CompilerLimits {
    fn default() -> Self {
        Self {
            max_input_size: 10_000_000, // 10 MB
            max_expr_depth: 256,
            max_ast_nodes: 1_000_000,
        }
    }
}

impl CompilerLimits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load limits from a TOML file, falling back to defaults
    ///
    /// Returns error only if the file is unreadable or malformed, not if it is missing
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, LimitError> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| LimitError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Self::from_toml_str(&content).map_err(|e| match e {
            LimitError::Parse { reason, .. } => LimitError::Parse {
                path: path.display().to_string(),
                reason,
            },
            other => other,
        })
    }

    /// Parse limits from TOML text; keys missing from [limits] keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, LimitError> {
        let config: ConfigFile = toml::from_str(content).map_err(|e| LimitError::Parse {
            path: "<string>".to_string(),
            reason: e.to_string(),
        })?;

        let mut limits = Self::default();

        if let Some(section) = config.limits {
            if let Some(v) = section.max_input_size {
                limits.max_input_size = v;
            }
            if let Some(v) = section.max_expr_depth {
                limits.max_expr_depth = v;
            }
            if let Some(v) = section.max_ast_nodes {
                limits.max_ast_nodes = v;
            }
        }

        limits.validate()?;
        Ok(limits)
    }

    /// Validate that all limits are positive and not absurdly large
    pub fn validate(&self) -> Result<(), LimitError> {
        const MAX_REASONABLE: usize = 100_000_000; // 100 MB

        if self.max_input_size == 0 || self.max_input_size > MAX_REASONABLE {
            return Err(LimitError::invalid("max_input_size", self.max_input_size));
        }

        if self.max_expr_depth == 0 || self.max_expr_depth > 10_000 {
            return Err(LimitError::invalid("max_expr_depth", self.max_expr_depth));
        }

        if self.max_ast_nodes == 0 || self.max_ast_nodes > 10_000_000 {
            return Err(LimitError::invalid("max_ast_nodes", self.max_ast_nodes));
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    limits: Option<LimitsSection>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LimitsSection {
    max_input_size: Option<usize>,
    max_expr_depth: Option<usize>,
    max_ast_nodes: Option<usize>,
}

/// Error type for limit loading and validation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LimitError {
    #[error("Limit error: failed to read {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Limit error: failed to parse {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("Limit error: invalid limit '{name}': {value} (must be positive and reasonable)")]
    Invalid { name: &'static str, value: usize },
}

impl LimitError {
    fn invalid(name: &'static str, value: usize) -> Self {
        LimitError::Invalid { name, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_limits_are_reasonable() {
        let limits = CompilerLimits::default();
        assert!(limits.validate().is_ok());
    }

    #[test]
    fn test_default_values() {
        let limits = CompilerLimits::default();
        assert_eq!(limits.max_input_size, 10_000_000);
        assert_eq!(limits.max_expr_depth, 256);
        assert_eq!(limits.max_ast_nodes, 1_000_000);
    }

    #[test]
    fn test_validation_catches_zero_values() {
        let mut limits = CompilerLimits::default();
        limits.max_input_size = 0;
        assert!(limits.validate().is_err());

        limits = CompilerLimits::default();
        limits.max_expr_depth = 0;
        assert!(limits.validate().is_err());

        limits = CompilerLimits::default();
        limits.max_ast_nodes = 0;
        assert!(limits.validate().is_err());
    }

    #[test]
    fn test_validation_catches_too_large_values() {
        let mut limits = CompilerLimits::default();
        limits.max_input_size = 200_000_000;
        assert_eq!(
            limits.validate(),
            Err(LimitError::Invalid {
                name: "max_input_size",
                value: 200_000_000
            })
        );

        limits = CompilerLimits::default();
        limits.max_expr_depth = 20_000;
        assert!(limits.validate().is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let limits = CompilerLimits::from_toml_file(dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(limits, CompilerLimits::default());
    }

    #[test]
    fn test_partial_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[limits]\nmax_input_size = 2000000\nmax_expr_depth = 128").unwrap();

        let limits = CompilerLimits::from_toml_file(file.path()).unwrap();
        assert_eq!(limits.max_input_size, 2_000_000); // Overridden
        assert_eq!(limits.max_expr_depth, 128); // Overridden
        assert_eq!(limits.max_ast_nodes, 1_000_000); // Default
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let limits = CompilerLimits::from_toml_str("").unwrap();
        assert_eq!(limits, CompilerLimits::default());
    }

    #[test]
    fn test_malformed_toml_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "this is not valid toml {{{{").unwrap();

        let result = CompilerLimits::from_toml_file(file.path());
        assert!(matches!(result, Err(LimitError::Parse { .. })));
    }

    #[test]
    fn test_unknown_key_returns_error() {
        let result = CompilerLimits::from_toml_str("[limits]\nmax_tokens = 5\n");
        assert!(matches!(result, Err(LimitError::Parse { .. })));
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let result = CompilerLimits::from_toml_str("[limits]\nmax_expr_depth = 0\n");
        assert_eq!(
            result,
            Err(LimitError::Invalid {
                name: "max_expr_depth",
                value: 0
            })
        );
    }
}
