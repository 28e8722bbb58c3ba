use anyhow::Context;
use std::str::FromStr;
use std::time::Duration;

pub fn config_env_var(name: &str) -> anyhow::Result<String> {
    std::env::var(name).with_context(|| format!("{} must be set", name))
}

fn config_env_var_or<T: FromStr>(name: &str, default: T) -> anyhow::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(v) => v
            .parse()
            .with_context(|| format!("invalid value for {}: {}", name, v)),
        Err(_) => Ok(default),
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub project_id: String,
    pub host: String,
    pub port: u16,
    pub keep_alive: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Config {
            project_id: config_env_var("PROJECT_ID")?,
            host: config_env_var_or("HOST", "0.0.0.0".to_string())?,
            port: config_env_var_or("PORT", 8080)?,
            keep_alive: Duration::from_secs(config_env_var_or("KEEP_ALIVE_SECS", 75)?),
        })
    }
}
