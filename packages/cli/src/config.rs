use anyhow::{anyhow, Context, Result};
use jsonmodeler_writer::Language;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "jsonmodeler.config.json";

/// JSONModeler configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Class graph to render, relative to the config file
    #[serde(default = "default_model")]
    pub model: String,

    /// Output languages to render
    #[serde(default)]
    pub targets: Vec<TargetConfig>,
}

fn default_model() -> String {
    "model.json".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Language selector, e.g. `swift`, `objc` or `java`
    pub language: String,

    /// Writer options; values may be strings, booleans or numbers
    #[serde(default)]
    pub options: BTreeMap<String, serde_json::Value>,

    /// Optional output directory
    #[serde(rename = "outDir", skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<String>,
}

impl TargetConfig {
    /// Options flattened to the `key=value` form writers accept
    pub fn option_pairs(&self) -> Result<Vec<(String, String)>> {
        self.options
            .iter()
            .map(|(key, value)| {
                let value = match value {
                    serde_json::Value::String(s) => s.clone(),
                    serde_json::Value::Bool(b) => b.to_string(),
                    serde_json::Value::Number(n) => n.to_string(),
                    serde_json::Value::Null => String::new(),
                    other => {
                        return Err(anyhow!(
                            "Option '{}' of target '{}' must be a string, boolean or number, got {}",
                            key,
                            self.language,
                            other
                        ))
                    }
                };
                Ok((key.clone(), value))
            })
            .collect()
    }

    /// Output directory, defaulting to `generated/<language>`
    pub fn get_out_dir(&self, root: &Path, language: Language) -> PathBuf {
        match &self.out_dir {
            Some(dir) => root.join(dir),
            None => root.join("generated").join(language.key()),
        }
    }
}

impl Config {
    /// Load config from a directory
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(DEFAULT_CONFIG_NAME);
        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Cannot read {}", config_path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid {}", config_path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(content)?;
        if config.targets.is_empty() {
            return Err(anyhow!("No targets configured"));
        }
        Ok(config)
    }

    /// Get absolute path to the model file
    pub fn get_model_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "model": "schema/classes.json",
            "targets": [
                { "language": "swift", "options": { "class_prefix": "XY", "mutable_properties": true }, "outDir": "ios" },
                { "language": "java", "options": { "package": "com.example" } }
            ]
        }"#;

        let config = Config::parse(json).unwrap();
        assert_eq!(config.model, "schema/classes.json");
        assert_eq!(config.targets.len(), 2);
        assert_eq!(config.targets[0].out_dir, Some("ios".to_string()));
        assert_eq!(
            config.targets[0].option_pairs().unwrap(),
            vec![
                ("class_prefix".to_string(), "XY".to_string()),
                ("mutable_properties".to_string(), "true".to_string()),
            ]
        );
        assert_eq!(
            config.targets[1].get_out_dir(Path::new("/work"), Language::Java),
            PathBuf::from("/work/generated/java")
        );
    }

    #[test]
    fn test_default_model() {
        let config = Config::parse(r#"{ "targets": [{ "language": "objc" }] }"#).unwrap();
        assert_eq!(config.model, "model.json");
        assert!(config.targets[0].options.is_empty());
    }

    #[test]
    fn test_rejects_empty_targets() {
        assert!(Config::parse(r#"{ "model": "m.json" }"#).is_err());
    }

    #[test]
    fn test_rejects_structured_option_values() {
        let config = Config::parse(
            r#"{ "targets": [{ "language": "swift", "options": { "class_prefix": ["X"] } }] }"#,
        )
        .unwrap();
        let err = config.targets[0].option_pairs().unwrap_err();
        assert!(err.to_string().contains("class_prefix"));
    }
}
