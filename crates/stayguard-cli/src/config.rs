use serde::{Deserialize, Serialize};
use stayguard_common::types::Severity;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Locale for period labels and alert messages (`fr` or `en`)
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default)]
    pub id: IdConfig,
    #[serde(default)]
    pub evaluation: EvaluationConfig,
    #[serde(default)]
    pub dispatch: DispatchConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            id: IdConfig::default(),
            evaluation: EvaluationConfig::default(),
            dispatch: DispatchConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdConfig {
    #[serde(default = "default_machine_id")]
    pub machine_id: i32,
    #[serde(default = "default_node_id")]
    pub node_id: i32,
}

impl Default for IdConfig {
    fn default() -> Self {
        Self {
            machine_id: default_machine_id(),
            node_id: default_node_id(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Report results whose outcome is `insufficient_data`
    #[serde(default = "default_true")]
    pub include_insufficient_data: bool,
    /// Report results that did not fire
    #[serde(default = "default_true")]
    pub include_not_triggered: bool,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            include_insufficient_data: true,
            include_not_triggered: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Alerts below this severity are dropped before delivery
    #[serde(default = "default_min_severity")]
    pub min_severity: Severity,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            min_severity: default_min_severity(),
        }
    }
}

fn default_locale() -> String {
    stayguard_common::i18n::DEFAULT_LOCALE.to_string()
}

fn default_machine_id() -> i32 {
    1
}

fn default_node_id() -> i32 {
    1
}

fn default_true() -> bool {
    true
}

fn default_min_severity() -> Severity {
    Severity::Info
}

impl CliConfig {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path, e))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file '{}': {}", path, e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, value) in [("machine_id", self.id.machine_id), ("node_id", self.id.node_id)] {
            if !(0..=31).contains(&value) {
                anyhow::bail!("id.{name} must be within 0..=31, got {value}");
            }
        }
        if !stayguard_common::i18n::is_supported_locale(&self.locale) {
            tracing::warn!(
                locale = %self.locale,
                fallback = stayguard_common::i18n::DEFAULT_LOCALE,
                "Unsupported locale, falling back to default"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config.locale, "fr");
        assert_eq!(config.id.machine_id, 1);
        assert!(config.evaluation.include_insufficient_data);
        assert_eq!(config.dispatch.min_severity, Severity::Info);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_sections_fill_defaults() {
        let config: CliConfig = toml::from_str(
            r#"
            locale = "en"

            [evaluation]
            include_not_triggered = false

            [dispatch]
            min_severity = "warning"
            "#,
        )
        .unwrap();
        assert_eq!(config.locale, "en");
        assert!(config.evaluation.include_insufficient_data);
        assert!(!config.evaluation.include_not_triggered);
        assert_eq!(config.dispatch.min_severity, Severity::Warning);
    }

    #[test]
    fn out_of_range_machine_id_is_rejected() {
        let config: CliConfig = toml::from_str("[id]\nmachine_id = 40\n").unwrap();
        assert!(config.validate().is_err());
    }
}
