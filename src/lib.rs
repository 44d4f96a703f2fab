//! folio-rs: a data-driven personal portfolio page generator
//!
//! A JSON content document (hero, about, skills, projects) is rendered into
//! an embedded page shell. The crate also models the page's interactive
//! pieces: the project detail modal, theme preference, navigation,
//! reveal-on-scroll animation and the contact form relay.

pub mod commands;
pub mod config;
pub mod content;
pub mod context;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod modal;
pub mod page;
pub mod prefs;
pub mod render;
pub mod server;
pub mod templates;
pub mod ui;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// The main application
#[derive(Debug, Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Source directory (content document, images)
    pub source_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Folio {
    /// Create a new instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let source_dir = base_dir.join(&config.source_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            source_dir,
            public_dir,
        })
    }

    /// Where the content document is loaded from
    pub fn content_source(&self) -> content::ContentSource {
        content::ContentSource::for_site(self)
    }

    /// File holding persisted preferences
    pub fn preferences_path(&self) -> PathBuf {
        self.base_dir.join(&self.config.preferences_file)
    }

    /// Build the page
    pub async fn generate(&self) -> Result<generator::Build> {
        generator::Generator::new(self)?.generate().await
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
