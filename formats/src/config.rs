//! Conversion settings.
//!
//! Defines the YAML-serializable configuration shared by every conversion
//! direction. All keys are optional; omitted keys take their defaults.
//!
//! # Example YAML
//!
//! ```yaml
//! batch_size: 500
//! backup_suffix: "~"
//! json_indent: 2
//! ```

use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FormatError, Result};

/// Default number of rows per multi-row `INSERT` statement.
pub const DEFAULT_BATCH_SIZE: usize = 500;

/// Default suffix appended to CSV destinations that already exist.
pub const DEFAULT_BACKUP_SUFFIX: &str = "~";

/// Default number of spaces per indentation level in JSON output.
pub const DEFAULT_JSON_INDENT: usize = 2;

const MAX_JSON_INDENT: usize = 16;

/// Settings passed explicitly to every conversion.
///
/// # Examples
///
/// ```
/// use tabconv_formats::ConvertConfig;
///
/// let config: ConvertConfig = serde_yaml::from_str("batch_size: 100").unwrap();
/// assert_eq!(config.batch_size, 100);
/// assert_eq!(config.backup_suffix, "~");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertConfig {
    /// Rows per `INSERT` statement when importing into SQLite.
    pub batch_size: usize,
    /// Suffix for renaming an existing CSV destination before overwriting it.
    pub backup_suffix: String,
    /// Spaces per indentation level in JSON output.
    pub json_indent: usize,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            backup_suffix: DEFAULT_BACKUP_SUFFIX.to_string(),
            json_indent: DEFAULT_JSON_INDENT,
        }
    }
}

impl ConvertConfig {
    /// Loads and validates configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::FormatError::IoError) if the file cannot
    /// be read, [`YamlError`](crate::FormatError::YamlError) if parsing
    /// fails, or [`InvalidConfig`](crate::FormatError::InvalidConfig) if a
    /// value is out of range.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config: Self = serde_yaml::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidConfig`](crate::FormatError::InvalidConfig) when
    /// `batch_size` is zero, `backup_suffix` is empty or contains a path
    /// separator, or `json_indent` exceeds 16.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(FormatError::InvalidConfig(
                "batch_size must be at least 1".to_string(),
            ));
        }
        if self.backup_suffix.is_empty() {
            return Err(FormatError::InvalidConfig(
                "backup_suffix must not be empty".to_string(),
            ));
        }
        if self.backup_suffix.contains(['/', '\\']) {
            return Err(FormatError::InvalidConfig(format!(
                "backup_suffix '{}' must not contain a path separator",
                self.backup_suffix
            )));
        }
        if self.json_indent > MAX_JSON_INDENT {
            return Err(FormatError::InvalidConfig(format!(
                "json_indent must be between 0 and {MAX_JSON_INDENT}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConvertConfig::default();
        assert_eq!(config.batch_size, 500);
        assert_eq!(config.backup_suffix, "~");
        assert_eq!(config.json_indent, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_complete() {
        let yaml = r#"
batch_size: 250
backup_suffix: ".bak"
json_indent: 4
"#;
        let config: ConvertConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.batch_size, 250);
        assert_eq!(config.backup_suffix, ".bak");
        assert_eq!(config.json_indent, 4);
    }

    #[test]
    fn test_deserialize_partial_uses_defaults() {
        let config: ConvertConfig = serde_yaml::from_str("json_indent: 0").unwrap();
        assert_eq!(config.json_indent, 0);
        assert_eq!(config.batch_size, DEFAULT_BATCH_SIZE);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(serde_yaml::from_str::<ConvertConfig>("batch: 10").is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let zero_batch = ConvertConfig {
            batch_size: 0,
            ..ConvertConfig::default()
        };
        assert!(matches!(zero_batch.validate(), Err(FormatError::InvalidConfig(_))));

        let empty_suffix = ConvertConfig {
            backup_suffix: String::new(),
            ..ConvertConfig::default()
        };
        assert!(empty_suffix.validate().is_err());

        let nested_suffix = ConvertConfig {
            backup_suffix: "/old".to_string(),
            ..ConvertConfig::default()
        };
        assert!(nested_suffix.validate().is_err());

        let wide_indent = ConvertConfig {
            json_indent: 40,
            ..ConvertConfig::default()
        };
        assert!(wide_indent.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tabconv.yml");
        std::fs::write(&path, "batch_size: 10\n").unwrap();

        let config = ConvertConfig::load(&path).unwrap();
        assert_eq!(config.batch_size, 10);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tabconv.yml");
        std::fs::write(&path, "batch_size: 0\n").unwrap();

        assert!(matches!(
            ConvertConfig::load(&path),
            Err(FormatError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            ConvertConfig::load("/nonexistent/tabconv.yml"),
            Err(FormatError::IoError(_))
        ));
    }
}
