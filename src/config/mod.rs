// stocksync/src/config/mod.rs
use anyhow::{Context, Result};
use std::fmt;
use std::path::PathBuf;
use url::Url;

pub const DEFAULT_INPUT_FILE: &str = "stock_input.json";
pub const DEFAULT_REPORT_FILE: &str = "stock_report.json";
pub const DEFAULT_EXPORT_FILE: &str = "catalog_export.json";

/// Connection settings for the Odoo backend.
#[derive(Clone)]
pub struct OdooConfig {
    pub url: Url,
    pub database: String,
    pub username: String,
    pub password: String,
}

// Keep the credential out of logs.
impl fmt::Debug for OdooConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OdooConfig")
            .field("url", &self.url.as_str())
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct FileConfig {
    pub stock_input: PathBuf,
    pub stock_report: PathBuf,
    pub catalog_export: PathBuf,
}

impl Default for FileConfig {
    fn default() -> Self {
        FileConfig {
            stock_input: PathBuf::from(DEFAULT_INPUT_FILE),
            stock_report: PathBuf::from(DEFAULT_REPORT_FILE),
            catalog_export: PathBuf::from(DEFAULT_EXPORT_FILE),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub odoo: OdooConfig,
    pub files: FileConfig,
}

impl AppConfig {
    /// Loads configuration from the process environment, reading `.env` first if present.
    pub fn load_from_env() -> Result<Self> {
        // A missing .env is fine, the variables may come from the shell.
        let _ = dotenv::dotenv();
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn load_with<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_url = required(&lookup, &["ODOO_URL"])?;
        let url = Url::parse(raw_url.trim_end_matches('/'))
            .with_context(|| format!("ODOO_URL is not a valid URL: {}", raw_url))?;

        let odoo = OdooConfig {
            url,
            // ODOO_BD is the name older deployments used.
            database: required(&lookup, &["ODOO_DB", "ODOO_BD"])?,
            username: required(&lookup, &["ODOO_USERNAME"])?,
            password: required(&lookup, &["ODOO_PASSWORD"])?,
        };

        Ok(AppConfig {
            odoo,
            files: FileConfig::default(),
        })
    }
}

/// Returns the first non-empty value among `keys`.
fn required<F>(lookup: &F, keys: &[&str]) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    keys.iter()
        .filter_map(|key| lookup(key))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
        .with_context(|| format!("{} must be set in the environment or .env", keys[0]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_load_with_complete_environment() -> anyhow::Result<()> {
        let vars = env(&[
            ("ODOO_URL", "https://erp.example.com/"),
            ("ODOO_DB", "prod"),
            ("ODOO_USERNAME", "sync@example.com"),
            ("ODOO_PASSWORD", "s3cret"),
        ]);
        let config = AppConfig::load_with(|k| vars.get(k).cloned())?;

        assert_eq!(config.odoo.url.as_str(), "https://erp.example.com/");
        assert_eq!(config.odoo.database, "prod");
        assert_eq!(config.odoo.username, "sync@example.com");
        assert_eq!(config.odoo.password, "s3cret");
        assert_eq!(config.files.stock_input, PathBuf::from(DEFAULT_INPUT_FILE));
        assert_eq!(config.files.stock_report, PathBuf::from(DEFAULT_REPORT_FILE));
        Ok(())
    }

    #[test]
    fn test_load_with_legacy_database_key() -> anyhow::Result<()> {
        let vars = env(&[
            ("ODOO_URL", "http://localhost:8069"),
            ("ODOO_BD", "legacy"),
            ("ODOO_USERNAME", "admin"),
            ("ODOO_PASSWORD", "admin"),
        ]);
        let config = AppConfig::load_with(|k| vars.get(k).cloned())?;
        assert_eq!(config.odoo.database, "legacy");
        Ok(())
    }

    #[test]
    fn test_load_with_missing_or_blank_values() {
        let vars = env(&[
            ("ODOO_URL", "http://localhost:8069"),
            ("ODOO_DB", "prod"),
            ("ODOO_USERNAME", "  "),
        ]);
        let err = AppConfig::load_with(|k| vars.get(k).cloned()).unwrap_err();
        assert!(err.to_string().contains("ODOO_USERNAME"));
    }

    #[test]
    fn test_load_with_invalid_url() {
        let vars = env(&[
            ("ODOO_URL", "not a url"),
            ("ODOO_DB", "prod"),
            ("ODOO_USERNAME", "admin"),
            ("ODOO_PASSWORD", "admin"),
        ]);
        assert!(AppConfig::load_with(|k| vars.get(k).cloned()).is_err());
    }

    #[test]
    fn test_debug_redacts_password() -> anyhow::Result<()> {
        let vars = env(&[
            ("ODOO_URL", "http://localhost:8069"),
            ("ODOO_DB", "prod"),
            ("ODOO_USERNAME", "admin"),
            ("ODOO_PASSWORD", "hunter2"),
        ]);
        let config = AppConfig::load_with(|k| vars.get(k).cloned())?;
        let printed = format!("{:?}", config);
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("***"));
        Ok(())
    }
}
