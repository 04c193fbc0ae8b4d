use anyhow::{Context, Result, bail};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
    pub templates_dir: PathBuf,
    pub related_search_url: String,
    pub related_searches: bool,
    pub user_agent: String,
}

impl Config {
    /// Reads the process environment, loading a `.env` file first if present.
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; every key has a default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get_or_default =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let port = get_or_default("PORT", "5000");
        let port = port
            .trim()
            .parse::<u16>()
            .with_context(|| format!("Invalid PORT value: {port:?}"))?;

        Ok(Config {
            host: get_or_default("HOST", "0.0.0.0"),
            port,
            static_dir: PathBuf::from(get_or_default("STATIC_DIR", "static")),
            templates_dir: PathBuf::from(get_or_default("TEMPLATES_DIR", "templates")),
            related_search_url: get_or_default(
                "RELATED_SEARCH_URL",
                "https://www.google.com/search",
            ),
            related_searches: parse_bool(
                "RELATED_SEARCHES",
                &get_or_default("RELATED_SEARCHES", "true"),
            )?,
            user_agent: get_or_default("USER_AGENT", "Mozilla/5.0"),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("Invalid boolean for {key}: {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert_eq!(config.static_dir, PathBuf::from("static"));
        assert_eq!(config.templates_dir, PathBuf::from("templates"));
        assert_eq!(config.related_search_url, "https://www.google.com/search");
        assert!(config.related_searches);
        assert_eq!(config.user_agent, "Mozilla/5.0");
        assert_eq!(config.bind_addr(), "0.0.0.0:5000");
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("PORT", "8080"),
            ("HOST", "127.0.0.1"),
            ("RELATED_SEARCHES", "off"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert!(!config.related_searches);
    }

    #[test]
    fn test_invalid_values() {
        assert!(Config::from_lookup(lookup(&[("PORT", "eighty")])).is_err());
        assert!(Config::from_lookup(lookup(&[("PORT", "70000")])).is_err());
        assert!(Config::from_lookup(lookup(&[("RELATED_SEARCHES", "maybe")])).is_err());
    }
}
