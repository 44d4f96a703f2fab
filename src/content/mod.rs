//! Content module - the portfolio content document and its loader

mod document;
pub mod loader;

pub use document::{
    About, ContentDocument, Hero, Project, ProjectKey, Settings, Skill, TrustedHtml,
};
pub use loader::{ContentSource, DataLoader};
