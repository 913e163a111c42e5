// ⚙️ Configuration - branding, project info and server address
// Every section is optional in the TOML file; missing keys fall back to the
// demo defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the web server binds to
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig { addr: "0.0.0.0:3000".to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalesConfig {
    pub business_name: String,
    pub tagline: String,
}

impl Default for SalesConfig {
    fn default() -> Self {
        SalesConfig {
            business_name: "Ferretería El Constructor".to_string(),
            tagline: "Sistema de análisis BI".to_string(),
        }
    }
}

/// Project information shown in the audit report sidebar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    pub client: String,
    pub date: String,
    pub auditor: String,
    pub systems: String,
}

impl Default for AuditConfig {
    fn default() -> Self {
        AuditConfig {
            client: "EmpresaTech SRL".to_string(),
            date: "27 Dic 2024".to_string(),
            auditor: "Kepler Labs".to_string(),
            systems: "3 aplicaciones web, 2 APIs, 1 base de datos".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterConfig {
    pub company: String,
    pub contact: String,
}

impl Default for FooterConfig {
    fn default() -> Self {
        FooterConfig {
            company: "Kepler Labs".to_string(),
            contact: "Email: info@keplerlabs.com | WhatsApp: +54 9 264 580 2870".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub server: ServerConfig,
    pub sales: SalesConfig,
    pub audit: AuditConfig,
    pub footer: FooterConfig,
}

impl DashboardConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config TOML")
    }

    /// Load from `path` when given, defaults otherwise
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.server.addr, "0.0.0.0:3000");
        assert_eq!(config.audit.client, "EmpresaTech SRL");
        assert_eq!(config.sales.business_name, "Ferretería El Constructor");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = DashboardConfig::from_toml(
            r#"
            [server]
            addr = "127.0.0.1:8080"

            [audit]
            client = "Acme SA"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.addr, "127.0.0.1:8080");
        assert_eq!(config.audit.client, "Acme SA");
        assert_eq!(config.audit.auditor, "Kepler Labs");
        assert_eq!(config.footer, FooterConfig::default());
    }

    #[test]
    fn test_empty_and_invalid_toml() {
        assert_eq!(DashboardConfig::from_toml("").unwrap(), DashboardConfig::default());
        assert!(DashboardConfig::from_toml("[server\naddr = 1").is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = DashboardConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
        assert_eq!(DashboardConfig::load(None).unwrap(), DashboardConfig::default());
    }
}
