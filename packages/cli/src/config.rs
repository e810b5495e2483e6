use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "gallery.config.json";
pub const ENDPOINT_ENV: &str = "GALLERY_API_URL";
pub const DEFAULT_TOKEN_ENV: &str = "GALLERY_AUTH_TOKEN";

/// Gallery CLI configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// GraphQL endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Environment variable holding the auth token
    #[serde(default = "default_token_env")]
    pub auth_token_env: String,

    /// Gallery used when a command doesn't name one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gallery_id: Option<String>,
}

fn default_endpoint() -> String {
    "http://localhost:4000/graphql".to_string()
}

fn default_token_env() -> String {
    DEFAULT_TOKEN_ENV.to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Flag, then `GALLERY_API_URL`, then the config file
    pub fn endpoint(&self, flag: Option<&str>, env: impl Fn(&str) -> Option<String>) -> String {
        flag.map(str::to_string)
            .or_else(|| env(ENDPOINT_ENV).filter(|v| !v.is_empty()))
            .unwrap_or_else(|| self.endpoint.clone())
    }

    pub fn auth_token(&self, env: impl Fn(&str) -> Option<String>) -> Option<String> {
        env(&self.auth_token_env).filter(|v| !v.is_empty())
    }

    pub fn gallery_id(&self, arg: Option<&str>) -> Result<String> {
        arg.map(str::to_string)
            .or_else(|| self.gallery_id.clone())
            .ok_or_else(|| anyhow!("No gallery id given and none set in {}", DEFAULT_CONFIG_NAME))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            auth_token_env: default_token_env(),
            gallery_id: None,
        }
    }
}

/// Process environment lookup
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "endpoint": "https://api.example.com/graphql",
            "authTokenEnv": "MY_TOKEN",
            "galleryId": "g1"
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.endpoint, "https://api.example.com/graphql");
        assert_eq!(config.auth_token_env, "MY_TOKEN");
        assert_eq!(config.gallery_id, Some("g1".to_string()));
    }

    #[test]
    fn test_default_config() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.auth_token_env, DEFAULT_TOKEN_ENV);
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_CONFIG_NAME), r#"{ "galleryId": "g7" }"#).unwrap();

        let config = Config::load(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(config.gallery_id(None).unwrap(), "g7");
        assert_eq!(config.gallery_id(Some("g8")).unwrap(), "g8");
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();

        let config = Config::load(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.gallery_id(None).is_err());
    }

    #[test]
    fn test_endpoint_precedence() {
        let config = Config {
            endpoint: "http://file".to_string(),
            ..Config::default()
        };
        let env = env_of(&[(ENDPOINT_ENV, "http://env")]);

        assert_eq!(config.endpoint(Some("http://flag"), &env), "http://flag");
        assert_eq!(config.endpoint(None, &env), "http://env");
        assert_eq!(config.endpoint(None, env_of(&[])), "http://file");
    }

    #[test]
    fn test_auth_token_uses_configured_variable() {
        let config = Config {
            auth_token_env: "MY_TOKEN".to_string(),
            ..Config::default()
        };

        assert_eq!(config.auth_token(env_of(&[("MY_TOKEN", "abc")])), Some("abc".to_string()));
        assert_eq!(config.auth_token(env_of(&[(DEFAULT_TOKEN_ENV, "abc")])), None);
    }
}
