//! Configuration file loading
//!
//! Supports TOML, JSON and YAML; the format is picked from the file extension.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Merge two JSON values (second overrides first)
fn merge_json_values(base: &mut serde_json::Value, override_value: serde_json::Value) {
    match (base, override_value) {
        (serde_json::Value::Object(base_obj), serde_json::Value::Object(override_obj)) => {
            for (key, value) in override_obj {
                match base_obj.get_mut(&key) {
                    Some(existing) => merge_json_values(existing, value),
                    None => {
                        base_obj.insert(key, value);
                    }
                }
            }
        }
        (base_value, override_value) => {
            *base_value = override_value;
        }
    }
}

/// Load configuration from file
pub fn load_config<T>(path: &Path) -> crate::Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let extension = path.extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();

    let content = std::fs::read_to_string(path)?;

    match extension.as_str() {
        "toml" => {
            toml::from_str(&content)
                .map_err(|e| crate::UtilError::Config(format!("TOML parse error: {}", e)))
        }
        "json" => {
            serde_json::from_str(&content)
                .map_err(|e| crate::UtilError::Config(format!("JSON parse error: {}", e)))
        }
        "yml" | "yaml" => {
            serde_yaml::from_str(&content)
                .map_err(|e| crate::UtilError::Config(format!("YAML parse error: {}", e)))
        }
        _ => Err(crate::UtilError::Config(
            format!("Unsupported config format: {}", extension)
        )),
    }
}

/// Merge two configurations (second overrides first)
///
/// Only keys present in `override_config`'s serialized form replace values in
/// `base`, so a partially-populated override (e.g. from `Option` fields skipped
/// during serialization) leaves the rest of `base` untouched.
pub fn merge_configs<T>(base: &mut T, override_config: serde_json::Value) -> crate::Result<()>
where
    T: Serialize + for<'de> Deserialize<'de>,
{
    let mut base_value = serde_json::to_value(&*base)
        .map_err(|e| crate::UtilError::Serialization(format!("Base serialization error: {}", e)))?;

    merge_json_values(&mut base_value, override_config);

    *base = serde_json::from_value(base_value)
        .map_err(|e| crate::UtilError::Serialization(format!("Result deserialization error: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
    struct TestConfig {
        name: String,
        port: u16,
        enabled: bool,
        items: Vec<String>,
    }

    #[test]
    fn test_load_json_config() -> crate::Result<()> {
        let temp_dir = tempdir()?;
        let config_path = temp_dir.path().join("test.json");

        std::fs::write(&config_path, r#"{
            "name": "test",
            "port": 8080,
            "enabled": true,
            "items": ["a", "b", "c"]
        }"#)?;

        let config: TestConfig = load_config(&config_path)?;
        assert_eq!(config.name, "test");
        assert_eq!(config.port, 8080);
        assert!(config.enabled);
        assert_eq!(config.items.len(), 3);

        Ok(())
    }

    #[test]
    fn test_load_toml_and_yaml_config() -> crate::Result<()> {
        let temp_dir = tempdir()?;

        let toml_path = temp_dir.path().join("test.toml");
        std::fs::write(&toml_path, "name = \"t\"\nport = 1\nenabled = false\nitems = []\n")?;
        let from_toml: TestConfig = load_config(&toml_path)?;
        assert_eq!(from_toml.port, 1);

        let yaml_path = temp_dir.path().join("test.yaml");
        std::fs::write(&yaml_path, "name: y\nport: 2\nenabled: true\nitems: [x]\n")?;
        let from_yaml: TestConfig = load_config(&yaml_path)?;
        assert_eq!(from_yaml.items, vec!["x".to_string()]);

        Ok(())
    }

    #[test]
    fn test_unsupported_format() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("test.ini");
        std::fs::write(&path, "name=x").unwrap();

        let result: crate::Result<TestConfig> = load_config(&path);
        assert!(matches!(result, Err(crate::UtilError::Config(_))));
    }

    #[test]
    fn test_merge_configs() -> crate::Result<()> {
        let mut base = TestConfig {
            name: "base".to_string(),
            port: 8080,
            enabled: false,
            items: vec!["a".to_string()],
        };

        merge_configs(&mut base, serde_json::json!({ "port": 9090, "enabled": true }))?;

        assert_eq!(base.name, "base");
        assert_eq!(base.port, 9090);
        assert!(base.enabled);
        assert_eq!(base.items, vec!["a".to_string()]);

        Ok(())
    }
}
