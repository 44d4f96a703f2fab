//! Project detail modal
//!
//! The modal reads from the project list captured when the page was
//! rendered. At most one project is shown at a time.

use serde::Serialize;

use crate::content::{Project, ProjectKey};
use crate::context::Portfolio;
use crate::helpers::nl2br;

/// An optional action link in the modal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkView {
    pub href: String,
    pub visible: bool,
}

impl LinkView {
    fn update(&mut self, href: Option<&str>) {
        match href {
            Some(href) => {
                self.href = href.to_string();
                self.visible = true;
            }
            None => self.visible = false,
        }
    }
}

/// What the modal currently displays
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModalView {
    pub visible: bool,
    /// Background page scrolling is suspended while the modal is open
    pub scroll_locked: bool,
    pub image: String,
    /// Plain text; escaped when rendered
    pub title: String,
    /// Escaped description with newlines turned into `<br>`
    pub description_html: String,
    pub code_link: LinkView,
    pub demo_link: LinkView,
}

#[derive(Debug, Clone, Default)]
pub struct ProjectModal {
    portfolio: Option<Portfolio>,
    view: ModalView,
}

impl ProjectModal {
    /// Create a modal over the projects of a loaded portfolio, if any
    pub fn new(portfolio: Option<Portfolio>) -> Self {
        Self {
            portfolio,
            view: ModalView::default(),
        }
    }

    pub fn view(&self) -> &ModalView {
        &self.view
    }

    /// Show the project at a rendered position
    ///
    /// Does nothing when no projects were loaded or the index is out of
    /// range, negative indices included. Returns whether the modal opened.
    pub fn open(&mut self, index: i64) -> bool {
        let Ok(index) = usize::try_from(index) else {
            return false;
        };
        let Some(project) = self
            .portfolio
            .as_ref()
            .and_then(|p| p.project_at(index))
            .map(|(_, project)| project.clone())
        else {
            return false;
        };

        self.show(&project);
        true
    }

    /// Show a project by key, preferring its stable id when the position
    /// no longer matches
    pub fn open_key(&mut self, key: &ProjectKey) -> bool {
        let Some(portfolio) = self.portfolio.as_ref() else {
            return false;
        };

        let project = match portfolio.project_at(key.index) {
            Some((found, project)) if found.id == key.id => Some(project),
            _ => portfolio.project_by_id(&key.id).map(|(_, project)| project),
        };

        match project.cloned() {
            Some(project) => {
                self.show(&project);
                true
            }
            None => false,
        }
    }

    fn show(&mut self, project: &Project) {
        self.view.image = project.image().to_string();
        self.view.title = project.title().to_string();
        self.view.description_html = nl2br(project.description());
        self.view.code_link.update(project.code_link());
        self.view.demo_link.update(project.demo_link());

        self.view.visible = true;
        self.view.scroll_locked = true;
    }

    /// Hide the modal and restore page scrolling
    pub fn close(&mut self) {
        self.view.visible = false;
        self.view.scroll_locked = false;
    }
}
