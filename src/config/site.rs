//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // Directory
    pub source_dir: String,
    pub public_dir: String,

    // Content
    pub content_path: String,
    pub content_url: Option<String>,
    pub description_limit: usize,

    // Behaviors
    pub carousel_step: u32,
    #[serde(default)]
    pub reveal: RevealConfig,
    #[serde(default)]
    pub form_relay: FormRelayConfig,
    pub preferences_file: String,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            description: String::new(),
            author: "John Doe".to_string(),
            language: "en".to_string(),

            source_dir: "source".to_string(),
            public_dir: "public".to_string(),

            content_path: "data/data.json".to_string(),
            content_url: None,
            description_limit: 90,

            carousel_step: 380,
            reveal: RevealConfig::default(),
            form_relay: FormRelayConfig::default(),
            preferences_file: ".folio/preferences.json".to_string(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Reveal-on-scroll animation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Fraction of an element that must be visible before it is revealed
    pub threshold: f64,
    pub root_margin: String,
    /// Delay step between elements registered in the same batch
    pub stagger_ms: u64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".to_string(),
            stagger_ms: 100,
        }
    }
}

/// Contact form relay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormRelayConfig {
    pub endpoint: String,
    pub access_key: Option<String>,
}

impl Default for FormRelayConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.web3forms.com/submit".to_string(),
            access_key: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "Portfolio");
        assert_eq!(config.content_path, "data/data.json");
        assert_eq!(config.description_limit, 90);
        assert_eq!(config.reveal.stagger_ms, 100);
        assert!(config.content_url.is_none());
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Jane's Work
content_url: https://jane.example.com
reveal:
  threshold: 0.25
form_relay:
  access_key: abc123
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Jane's Work");
        assert_eq!(
            config.content_url.as_deref(),
            Some("https://jane.example.com")
        );
        assert_eq!(config.reveal.threshold, 0.25);
        assert_eq!(config.reveal.stagger_ms, 100);
        assert_eq!(config.form_relay.access_key.as_deref(), Some("abc123"));
        assert_eq!(
            config.form_relay.endpoint,
            "https://api.web3forms.com/submit"
        );
    }
}
