use crate::config::{Config, DEFAULT_CONFIG_NAME, DEFAULT_TOKEN_ENV};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// GraphQL endpoint
    #[arg(short, long)]
    pub endpoint: Option<String>,

    /// Default gallery for other commands
    #[arg(short, long)]
    pub gallery: Option<String>,

    /// Environment variable holding the auth token
    #[arg(long, default_value = DEFAULT_TOKEN_ENV)]
    pub token_env: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    let mut config = Config {
        auth_token_env: args.token_env,
        gallery_id: args.gallery,
        ..Config::default()
    };
    if let Some(endpoint) = args.endpoint {
        config.endpoint = endpoint;
    }

    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, format!("{}\n", config_json))?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("Set {} before talking to the API", config.auth_token_env.bright_white());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(force: bool) -> InitArgs {
        InitArgs {
            endpoint: Some("https://api.example.com/graphql".to_string()),
            gallery: Some("g1".to_string()),
            token_env: DEFAULT_TOKEN_ENV.to_string(),
            force,
        }
    }

    #[test]
    fn test_init_writes_loadable_config() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().to_str().unwrap();

        init(args(false), cwd).unwrap();

        let config = Config::load(cwd).unwrap();
        assert_eq!(config.endpoint, "https://api.example.com/graphql");
        assert_eq!(config.gallery_id, Some("g1".to_string()));
    }

    #[test]
    fn test_init_keeps_existing_config_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().to_str().unwrap();
        fs::write(dir.path().join(DEFAULT_CONFIG_NAME), r#"{ "galleryId": "kept" }"#).unwrap();

        init(args(false), cwd).unwrap();
        assert_eq!(Config::load(cwd).unwrap().gallery_id, Some("kept".to_string()));

        init(args(true), cwd).unwrap();
        assert_eq!(Config::load(cwd).unwrap().gallery_id, Some("g1".to_string()));
    }
}
