//! Generator module - builds `public/index.html` from the content document

use anyhow::Result;
use std::fs;
use walkdir::WalkDir;

use crate::content::DataLoader;
use crate::context::Portfolio;
use crate::error::LoadError;
use crate::modal::{ModalView, ProjectModal};
use crate::page::Page;
use crate::prefs::FilePreferences;
use crate::render::render_page;
use crate::templates::{ModalFragment, PageData, TemplateRenderer};
use crate::ui::{NavMenu, SubmitControl, ThemeController};
use crate::Folio;

/// Result of one page build
#[derive(Debug)]
pub struct Build {
    /// The loaded portfolio; `None` when loading failed
    pub portfolio: Option<Portfolio>,
    /// Why the page was left in its placeholder state
    pub error: Option<LoadError>,
}

/// Static page generator
pub struct Generator {
    folio: Folio,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(folio: &Folio) -> Result<Self> {
        Ok(Self {
            folio: folio.clone(),
            renderer: TemplateRenderer::new()?,
        })
    }

    /// Build the page
    ///
    /// A load failure is not an error of the build: the page is written in
    /// its placeholder state and the failure is returned in [`Build::error`]
    /// for the caller to report.
    pub async fn generate(&self) -> Result<Build> {
        fs::create_dir_all(&self.folio.public_dir)?;
        self.copy_source_assets()?;

        let loader = DataLoader::new(self.folio.content_source());
        let mut page = Page::new(&self.folio.config.reveal);

        let build = match loader.load().await {
            Ok(document) => {
                let portfolio = Portfolio::new(document);
                render_page(&mut page, &portfolio, self.folio.config.description_limit);
                Build {
                    portfolio: Some(portfolio),
                    error: None,
                }
            }
            Err(e) => {
                tracing::error!("Error loading portfolio data: {}", e);
                Build {
                    portfolio: None,
                    error: Some(e),
                }
            }
        };

        let html = self.compose(&page, build.portfolio.as_ref())?;
        let index = self.folio.public_dir.join("index.html");
        fs::write(&index, html)?;
        tracing::debug!("Wrote {:?}", index);

        Ok(build)
    }

    /// Compose the final markup, applying the stored theme
    pub fn compose(&self, page: &Page, portfolio: Option<&Portfolio>) -> Result<String> {
        let theme =
            ThemeController::load(FilePreferences::load(self.folio.preferences_path())).theme();

        let modals = match portfolio {
            Some(portfolio) => self.project_modals(portfolio)?,
            None => Vec::new(),
        };

        let data = PageData::new(
            &self.folio.config,
            page,
            theme,
            &NavMenu::default(),
            &SubmitControl::default(),
            &ModalView::default(),
        )
        .with_project_modals(modals);
        self.renderer.render_page(&data)
    }

    /// Render the open modal of every project, closing it again in between
    fn project_modals(&self, portfolio: &Portfolio) -> Result<Vec<ModalFragment>> {
        let mut modal = ProjectModal::new(Some(portfolio.clone()));
        let mut fragments = Vec::with_capacity(portfolio.keys().len());

        for key in portfolio.keys() {
            if modal.open_key(key) {
                fragments.push(ModalFragment {
                    index: key.index,
                    id: key.id.clone(),
                    html: self.renderer.render_modal(modal.view())?,
                });
            }
            modal.close();
        }

        Ok(fragments)
    }

    /// Copy images and other static files from the source directory
    fn copy_source_assets(&self) -> Result<()> {
        let source_dir = &self.folio.source_dir;
        if !source_dir.exists() {
            return Ok(());
        }

        for entry in WalkDir::new(source_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            if path.is_file() {
                // Skip hidden files such as editor swap files
                if path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with('.'))
                {
                    continue;
                }

                let relative = path.strip_prefix(source_dir)?;
                let dest = self.folio.public_dir.join(relative);

                if let Some(parent) = dest.parent() {
                    fs::create_dir_all(parent)?;
                }

                fs::copy(path, &dest)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::PreferenceStore;

    fn site(data: Option<&str>) -> (tempfile::TempDir, Folio) {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("source/data");
        fs::create_dir_all(&data_dir).unwrap();
        fs::create_dir_all(dir.path().join("source/images")).unwrap();
        fs::write(dir.path().join("source/images/me.png"), b"png").unwrap();
        if let Some(data) = data {
            fs::write(data_dir.join("data.json"), data).unwrap();
        }
        let folio = Folio::new(dir.path()).unwrap();
        (dir, folio)
    }

    #[tokio::test]
    async fn test_generate_renders_content() {
        let (_dir, folio) = site(Some(
            r#"{"hero": {"subtitle": "Rustacean"},
                "projects": [{"title": "A", "description": "d", "image": "images/me.png"}]}"#,
        ));

        let build = Generator::new(&folio).unwrap().generate().await.unwrap();
        assert!(build.error.is_none());
        assert_eq!(build.portfolio.unwrap().projects().len(), 1);

        let html = fs::read_to_string(folio.public_dir.join("index.html")).unwrap();
        assert!(html.contains("Rustacean"));
        assert!(html.contains(r#"id="project-0""#));
        assert!(folio.public_dir.join("images/me.png").exists());
        assert!(folio.public_dir.join("data/data.json").exists());
    }

    #[tokio::test]
    async fn test_page_is_wired_for_the_browser() {
        let (_dir, folio) = site(Some(
            r#"{"hero": {"subtitle": "S"},
                "projects": [{"title": "A", "description": "line1\nline2", "code_link": "https://c"},
                             {"title": "B"}]}"#,
        ));

        Generator::new(&folio).unwrap().generate().await.unwrap();
        let html = fs::read_to_string(folio.public_dir.join("index.html")).unwrap();

        // Hidden elements are revealed by the observer the page carries
        assert!(html.contains(r#"class="hero-content hidden""#));
        assert!(html.contains(r#"<script id="folio-config" type="application/json">"#));
        assert!(html.contains(r#""threshold":0.1"#));
        assert!(html.contains("classList.add('show')"));

        // Read More opens the API modal, or the bundled copy when there is no API
        assert!(html.contains(r#"data-index="0" data-project-id="a""#));
        assert!(html.contains(r#""modal_endpoint":"api/projects/""#));
        assert!(html.contains("'?id=' + encodeURIComponent(id)"));
        assert!(html.contains(r#"<template class="project-modal-template" data-index="1" data-project-id="b">"#));
        assert!(html.contains("line1<br>line2"));
        assert!(html.contains(r#"id="project-modal" class="modal" style="display: block""#));
        assert!(html.contains(r#"id="project-modal" class="modal" style="display: none""#));

        for id in ["theme-toggle", "nav-toggle", "nav-links", "scroll-left", "scroll-right", "contact-form"] {
            assert!(html.contains(&format!("getElementById('{}')", id)), "{} not wired", id);
        }
        assert!(html.contains("closeModal()"));
    }

    #[tokio::test]
    async fn test_parse_failure_leaves_placeholders() {
        let (_dir, folio) = site(Some(r#"{"hero": {"subtitle": "#));

        let build = Generator::new(&folio).unwrap().generate().await.unwrap();
        assert!(matches!(build.error, Some(LoadError::Parse(_))));
        assert!(build.portfolio.is_none());

        let html = fs::read_to_string(folio.public_dir.join("index.html")).unwrap();
        assert!(html.contains("Your Name"));
        assert!(!html.contains("project-card"));
        assert!(!html.contains("<template"));
    }

    #[tokio::test]
    async fn test_missing_content_is_fetch_error() {
        let (_dir, folio) = site(None);

        let build = Generator::new(&folio).unwrap().generate().await.unwrap();
        assert!(build.error.unwrap().is_fetch());
    }

    #[tokio::test]
    async fn test_stored_theme_applied() {
        let (_dir, folio) = site(Some("{}"));
        let mut prefs = FilePreferences::load(folio.preferences_path());
        prefs.set("theme", "light").unwrap();

        Generator::new(&folio).unwrap().generate().await.unwrap();
        let html = fs::read_to_string(folio.public_dir.join("index.html")).unwrap();
        assert!(html.contains(r#"data-theme="light""#));
    }
}
