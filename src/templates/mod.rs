//! Built-in page templates using the Tera template engine
//!
//! The page shell, its placeholders and the modal markup are embedded in the
//! binary. Renderers never touch the shell directly; they fill [`Slot`]s and
//! the shell pulls them in by key.

use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::error::SubmissionError;
use crate::helpers::html_escape;
use crate::modal::ModalView;
use crate::page::{Page, RevealEntry, RevealOptions, Slot, STATIC_REVEAL};
use crate::ui::{NavMenu, SubmitControl, Theme, THEME_KEY};

/// Template renderer with the embedded page shell
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Slot contents are escaped by the renderers that produce them
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("folio/layout.html")),
            ("partials/nav.html", include_str!("folio/partials/nav.html")),
            (
                "partials/contact.html",
                include_str!("folio/partials/contact.html"),
            ),
            ("partials/modal.html", include_str!("folio/partials/modal.html")),
            (
                "partials/script.html",
                include_str!("folio/partials/script.html"),
            ),
        ])?;

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    /// Render the full page
    pub fn render_page(&self, data: &PageData) -> Result<String> {
        let mut context = Context::from_serialize(data)?;
        // Embedded in a <script> element, which must not see a closing tag
        let script_json = serde_json::to_string(&data.script)?.replace("</", "<\\/");
        context.insert("script_json", &script_json);
        self.render("layout.html", &context)
    }

    /// Render only the modal, for fetching a project's details on demand
    pub fn render_modal(&self, modal: &ModalView) -> Result<String> {
        let mut context = Context::new();
        context.insert("modal", modal);
        self.render("partials/modal.html", &context)
    }
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct PageData {
    pub site: SiteData,
    /// Filled slots only; a missing key means "show the placeholder"
    pub slots: BTreeMap<&'static str, String>,
    /// Ready-made `id`/`class`/`style` attributes for animated static elements
    pub reveal: BTreeMap<String, String>,
    pub theme: ThemeData,
    pub nav: NavData,
    pub form: FormData,
    pub modal: ModalView,
    /// Pre-rendered modal for every project, for pages served without the API
    pub project_modals: Vec<ModalFragment>,
    /// Pixels the project strip moves per scroll button press
    pub carousel_step: u32,
    /// Settings read by the page script
    pub script: ScriptConfig,
    pub generator: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThemeData {
    pub name: String,
    pub attribute: Option<String>,
    pub icon: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavData {
    pub links_class: String,
    pub toggle_class: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormData {
    pub label: String,
    pub disabled: bool,
}

/// Modal markup of one project, keyed like its card
#[derive(Debug, Clone, Serialize)]
pub struct ModalFragment {
    pub index: usize,
    pub id: String,
    pub html: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScriptConfig {
    pub reveal: RevealOptions,
    pub carousel_step: u32,
    pub theme: ThemeScript,
    pub nav: NavScript,
    pub form: FormScript,
    /// Prefix of `GET /api/projects/:index?id=`
    pub modal_endpoint: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThemeScript {
    pub key: &'static str,
    pub light_attribute: Option<&'static str>,
    pub dark_icon: &'static str,
    pub light_icon: &'static str,
}

/// Class lists of the links panel and menu affordance, per state
#[derive(Debug, Clone, Serialize)]
pub struct NavScript {
    pub closed: (&'static str, &'static str),
    pub open: (&'static str, &'static str),
}

#[derive(Debug, Clone, Serialize)]
pub struct FormScript {
    pub label: String,
    pub busy_label: String,
    pub error_message: &'static str,
}

impl ScriptConfig {
    pub fn new(config: &SiteConfig, page: &Page, control: &SubmitControl) -> Self {
        let mut opened = NavMenu::default();
        opened.toggle();

        let mut busy = control.clone();
        let label = busy.begin();

        Self {
            reveal: page.reveal.options(),
            carousel_step: config.carousel_step,
            theme: ThemeScript {
                key: THEME_KEY,
                light_attribute: Theme::Light.attribute(),
                dark_icon: Theme::Dark.icon(),
                light_icon: Theme::Light.icon(),
            },
            nav: NavScript {
                closed: NavMenu::default().classes(),
                open: opened.classes(),
            },
            form: FormScript {
                label,
                busy_label: busy.label,
                error_message: SubmissionError::TRANSPORT_MESSAGE,
            },
            modal_endpoint: "api/projects/",
        }
    }
}

impl PageData {
    /// Collect everything the shell needs from a built page
    pub fn new(
        config: &SiteConfig,
        page: &Page,
        theme: Theme,
        nav: &NavMenu,
        control: &SubmitControl,
        modal: &ModalView,
    ) -> Self {
        let slots = Slot::ALL
            .iter()
            .filter_map(|slot| page.slot_html(*slot).map(|html| (slot.key(), html)))
            .collect();

        let reveal = STATIC_REVEAL
            .iter()
            .map(|id| (id.replace('-', "_"), static_attrs(page, id)))
            .collect();

        let (links_class, toggle_class) = nav.classes();

        Self {
            site: SiteData {
                title: config.title.clone(),
                description: config.description.clone(),
                author: config.author.clone(),
                language: config.language.clone(),
            },
            slots,
            reveal,
            theme: ThemeData {
                name: theme.to_string(),
                attribute: theme.attribute().map(str::to_string),
                icon: theme.icon().to_string(),
            },
            nav: NavData {
                links_class: links_class.to_string(),
                toggle_class: toggle_class.to_string(),
            },
            form: FormData {
                label: control.label.clone(),
                disabled: control.disabled,
            },
            modal: modal.clone(),
            project_modals: Vec::new(),
            carousel_step: config.carousel_step,
            script: ScriptConfig::new(config, page, control),
            generator: format!("folio-rs {}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Attach the pre-rendered project modals
    pub fn with_project_modals(mut self, modals: Vec<ModalFragment>) -> Self {
        self.project_modals = modals;
        self
    }
}

/// Attributes of a static animated element; `section-title-*` share one class
fn static_attrs(page: &Page, id: &str) -> String {
    let base = if id.starts_with("section-title-") {
        "section-title"
    } else {
        id
    };

    let mut attrs = format!(r#"id="{}" class="{}"#, html_escape(id), base);
    if let Some(entry) = page.reveal.entry(id) {
        attrs.push(' ');
        attrs.push_str(RevealEntry::CLASS);
        attrs.push('"');
        if let Some(style) = entry.style() {
            attrs.push_str(&format!(r#" style="{}""#, style));
        }
    } else {
        attrs.push('"');
    }
    attrs
}
