use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SelectionError;
use crate::preset::{PresetRange, default_presets};

/// Selector options, loadable from a JSON file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Reject picks strictly before today.
    pub disable_past_dates: bool,
    /// Rolling-window presets. The built-in defaults apply when empty.
    pub presets: Vec<PresetConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetConfig {
    pub label: String,
    pub days_back: u32,
}

impl SelectorConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SelectionError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Presets in configured order.
    pub fn preset_ranges(&self) -> Vec<PresetRange> {
        if self.presets.is_empty() {
            return default_presets();
        }
        self.presets
            .iter()
            .map(|p| PresetRange::days_back(p.label.clone(), p.days_back))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_when_fields_missing() {
        let config: SelectorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SelectorConfig::default());
        assert!(!config.disable_past_dates);

        let labels: Vec<_> = config
            .preset_ranges()
            .iter()
            .map(|p| p.label().to_string())
            .collect();
        assert_eq!(labels, vec!["Last 7 Days", "Last 30 Days"]);
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "disable_past_dates": true,
                "presets": [
                    {{ "label": "Last 14 Days", "days_back": 14 }},
                    {{ "label": "Today", "days_back": 0 }}
                ]
            }}"#
        )
        .unwrap();

        let config = SelectorConfig::from_json_file(file.path()).unwrap();
        assert!(config.disable_past_dates);

        let presets = config.preset_ranges();
        assert_eq!(presets.len(), 2);
        assert_eq!(presets[0].label(), "Last 14 Days");
        assert_eq!(presets[1].label(), "Today");
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SelectorConfig::from_json_file(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, SelectionError::Io(_)));
    }

    #[test]
    fn malformed_file_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ \"disable_past_dates\": \"yes\" }}").unwrap();
        let err = SelectorConfig::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, SelectionError::Config(_)));
    }
}
