//! Initialize a new portfolio site

use anyhow::Result;
use std::fs;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# Portfolio Configuration

# Site
title: Portfolio
description: ''
author: John Doe
language: en

# Directory
source_dir: source
public_dir: public

# Content
content_path: data/data.json
# Fetch content over HTTP instead of reading it from source_dir
# content_url: https://example.com
description_limit: 90

# Behaviors
carousel_step: 380
reveal:
  threshold: 0.1
  root_margin: 0px 0px -50px 0px
  stagger_ms: 100
form_relay:
  endpoint: https://api.web3forms.com/submit
  # access_key: your-access-key
preferences_file: .folio/preferences.json
"#;

const SAMPLE_DATA: &str = r#"{
  "settings": {
    "logo": ""
  },
  "hero": {
    "title": "Hi, I'm <span>John Doe</span>",
    "subtitle": "Software developer",
    "image": ""
  },
  "about": {
    "description": "I build fast and reliable software.\nMostly in Rust.",
    "image": ""
  },
  "skills": [
    { "name": "Rust", "icon": "fab fa-rust" },
    { "name": "Git", "icon": "fab fa-git-alt" }
  ],
  "projects": [
    {
      "title": "Portfolio",
      "description": "This very site, generated from a single JSON document.",
      "image": "images/portfolio.png",
      "code_link": "https://github.com/johndoe/portfolio",
      "demo_link": ""
    }
  ]
}
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir.join("source/data"))?;
    fs::create_dir_all(target_dir.join("source/images"))?;

    let config_path = target_dir.join("_config.yml");
    if !config_path.exists() {
        fs::write(&config_path, DEFAULT_CONFIG)?;
    }

    let data_path = target_dir.join("source/data/data.json");
    if !data_path.exists() {
        fs::write(&data_path, SAMPLE_DATA)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentDocument;
    use crate::Folio;

    #[test]
    fn test_init_site() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();

        let folio = Folio::new(dir.path()).unwrap();
        assert_eq!(folio.config.title, "Portfolio");
        assert_eq!(folio.config.reveal.root_margin, "0px 0px -50px 0px");

        let data = fs::read_to_string(dir.path().join("source/data/data.json")).unwrap();
        let doc = ContentDocument::from_json(&data).unwrap();
        assert_eq!(doc.projects().len(), 1);
        assert_eq!(doc.skills().len(), 2);
    }

    #[test]
    fn test_init_keeps_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("_config.yml"), "title: Mine\n").unwrap();
        init_site(dir.path()).unwrap();

        let folio = Folio::new(dir.path()).unwrap();
        assert_eq!(folio.config.title, "Mine");
    }
}
