//! Configuration for the constraint builder
//!
//! Holds the defaults applied when a caller does not spell them out: the
//! separation used between sequenced elements and the priority stamped on
//! new constraints. Named priority levels can be extended from TOML.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::attribute::Priority;
use crate::error::ConfigError;

/// Builder defaults
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Gap between sequenced siblings and from the container edges
    pub separation: f64,

    /// Priority stamped on constraints that do not name one
    pub priority: Option<Priority>,

    /// Named priority levels
    pub priorities: HashMap<String, f32>,
}

#[derive(Deserialize)]
struct TomlConfig {
    defaults: Option<TomlDefaults>,
    #[serde(default)]
    priorities: HashMap<String, f32>,
}

#[derive(Deserialize)]
struct TomlDefaults {
    separation: Option<f64>,
    priority: Option<TomlPriority>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TomlPriority {
    Value(f32),
    Named(String),
}

const DEFAULT_CONFIG: &str = r##"
[defaults]
separation = 8.0

[priorities]
required = 1000
high = 750
low = 250
fitting = 50
"##;

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    ///
    /// Missing keys keep their defaults; `[priorities]` entries are added to
    /// (or override) the built-in levels.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;
        let mut config = Self::builtin(parsed.priorities);

        if let Some(defaults) = parsed.defaults {
            if let Some(separation) = defaults.separation {
                config.separation = separation;
            }
            config.priority = match defaults.priority {
                None => None,
                Some(TomlPriority::Value(value)) => Some(Priority(value)),
                Some(TomlPriority::Named(name)) => Some(
                    config
                        .named_priority(&name)
                        .ok_or(ConfigError::UnknownPriority(name))?,
                ),
            };
        }

        Ok(config)
    }

    fn builtin(extra: HashMap<String, f32>) -> Self {
        let base: TomlConfig =
            toml::from_str(DEFAULT_CONFIG).expect("Default layout config should be valid TOML");
        let mut priorities = base.priorities;
        priorities.extend(extra);
        Self {
            separation: base
                .defaults
                .and_then(|d| d.separation)
                .unwrap_or_default(),
            priority: None,
            priorities,
        }
    }

    /// Look up a named priority level
    pub fn named_priority(&self, name: &str) -> Option<Priority> {
        self.priorities.get(name).copied().map(Priority)
    }

    /// Set the default separation
    pub fn with_separation(mut self, separation: f64) -> Self {
        self.separation = separation;
        self
    }

    /// Set the default priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::builtin(HashMap::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LayoutConfig::default();
        assert_eq!(config.separation, 8.0);
        assert_eq!(config.priority, None);
        assert_eq!(config.named_priority("high"), Some(Priority::HIGH));
        assert_eq!(config.named_priority("fitting"), Some(Priority::FITTING));
    }

    #[test]
    fn test_builder_pattern() {
        let config = LayoutConfig::new()
            .with_separation(16.0)
            .with_priority(Priority::LOW);
        assert_eq!(config.separation, 16.0);
        assert_eq!(config.priority, Some(Priority::LOW));
    }

    #[test]
    fn test_parse_named_priority() {
        let toml_str = r#"
[defaults]
separation = 12.0
priority = "hugging"

[priorities]
hugging = 251
"#;
        let config = LayoutConfig::from_str(toml_str).expect("Should parse");
        assert_eq!(config.separation, 12.0);
        assert_eq!(config.priority, Some(Priority(251.0)));
        assert_eq!(config.named_priority("required"), Some(Priority::REQUIRED));
    }

    #[test]
    fn test_parse_numeric_priority() {
        let config = LayoutConfig::from_str("[defaults]\npriority = 600\n").expect("Should parse");
        assert_eq!(config.priority, Some(Priority(600.0)));
        assert_eq!(config.separation, 8.0);
    }

    #[test]
    fn test_unknown_priority_error() {
        let result = LayoutConfig::from_str("[defaults]\npriority = \"urgent\"\n");
        assert!(matches!(result, Err(ConfigError::UnknownPriority(name)) if name == "urgent"));
    }

    #[test]
    fn test_invalid_toml_error() {
        let result = LayoutConfig::from_str("this is not valid toml {{{{");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}
