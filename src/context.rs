//! Loaded portfolio context
//!
//! Created once a content document has been loaded successfully, then handed
//! to whoever needs the project list (renderers, the project modal, the
//! server). Cloning is cheap.

use std::sync::Arc;

use crate::content::{ContentDocument, Project, ProjectKey};

#[derive(Debug, Clone)]
pub struct Portfolio {
    document: Arc<ContentDocument>,
    projects: Arc<[Project]>,
    keys: Arc<[ProjectKey]>,
}

impl Portfolio {
    pub fn new(document: ContentDocument) -> Self {
        let projects: Arc<[Project]> = document.projects().into();
        let keys: Arc<[ProjectKey]> = ProjectKey::assign(&projects).into();

        Self {
            document: Arc::new(document),
            projects,
            keys,
        }
    }

    pub fn document(&self) -> &ContentDocument {
        &self.document
    }

    /// Projects in rendered order
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn keys(&self) -> &[ProjectKey] {
        &self.keys
    }

    /// Resolve a rendered position to its project
    pub fn project_at(&self, index: usize) -> Option<(&ProjectKey, &Project)> {
        Some((self.keys.get(index)?, self.projects.get(index)?))
    }

    /// Resolve a stable identifier to its project
    pub fn project_by_id(&self, id: &str) -> Option<(&ProjectKey, &Project)> {
        let key = self.keys.iter().find(|k| k.id == id)?;
        Some((key, &self.projects[key.index]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let doc = ContentDocument::from_json(
            r#"{"projects":[{"title":"Alpha"},{"title":"Beta"}]}"#,
        )
        .unwrap();
        let portfolio = Portfolio::new(doc);

        assert_eq!(portfolio.projects().len(), 2);
        let (key, project) = portfolio.project_at(1).unwrap();
        assert_eq!(key.id, "beta");
        assert_eq!(project.title(), "Beta");
        assert!(portfolio.project_at(2).is_none());

        let (key, _) = portfolio.project_by_id("alpha").unwrap();
        assert_eq!(key.index, 0);
        assert!(portfolio.project_by_id("gamma").is_none());
    }
}
