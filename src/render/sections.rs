//! Section renderers
//!
//! Each renderer takes its optional slice of the document and fills the
//! matching page slots. Blank values leave the slot's placeholder untouched.

use crate::content::{About, Hero, Project, ProjectKey, Settings, Skill};
use crate::helpers::{
    css_string_escape, external_link, html_escape, image_tag, non_blank, paragraphs,
    truncate_chars,
};
use crate::page::{Card, Page, Slot};

const ABOUT_IMAGE_STYLE: &str =
    "width:100%; border-radius:10px; box-shadow: 0 0 20px rgba(0,0,0,0.1);";

/// Site logo
pub fn render_logo(page: &mut Page, settings: Option<&Settings>) {
    if let Some(logo) = non_blank(settings.and_then(|s| s.logo.as_deref())) {
        page.set_inner_html(Slot::Logo, image_tag(logo, "Logo", None));
    }
}

/// Hero title, subtitle and image
pub fn render_hero(page: &mut Page, hero: Option<&Hero>) {
    let Some(hero) = hero else {
        return;
    };

    if let Some(title) = hero.title.as_ref().filter(|t| !t.as_str().is_empty()) {
        page.set_inner_html(Slot::HeroTitle, title.as_str());
    }
    if let Some(subtitle) = hero.subtitle.as_deref().filter(|s| !s.is_empty()) {
        page.set_text(Slot::HeroSubtitle, subtitle);
    }
    if let Some(image) = non_blank(hero.image.as_deref()) {
        page.set_inner_html(Slot::HeroImage, image_tag(image, "Hero Image", None));
    }
}

/// About text paragraphs and profile image
pub fn render_about(page: &mut Page, about: Option<&About>) {
    let Some(about) = about else {
        return;
    };

    if let Some(description) = about.description.as_deref().filter(|d| !d.is_empty()) {
        page.set_inner_html(Slot::AboutText, paragraphs(description));
    }
    if let Some(image) = non_blank(about.image.as_deref()) {
        page.set_inner_html(
            Slot::AboutImage,
            image_tag(image, "Profile Image", Some(ABOUT_IMAGE_STYLE)),
        );
    }
}

/// Skill cards
pub fn render_skills(page: &mut Page, skills: &[Skill]) {
    if skills.is_empty() {
        tracing::info!("No skills found in data.");
        return;
    }

    let cards = skills
        .iter()
        .enumerate()
        .map(|(i, skill)| Card {
            id: format!("skill-{}", i),
            class: "skill-card",
            inner_html: format!(
                r#"<i class="{}"></i><h3>{}</h3>"#,
                html_escape(skill.icon.as_deref().unwrap_or_default()),
                html_escape(skill.name.as_deref().unwrap_or_default())
            ),
        })
        .collect();

    page.set_cards(Slot::Skills, cards);
}

/// Project cards with a truncated description and optional action links
pub fn render_projects(
    page: &mut Page,
    projects: &[Project],
    keys: &[ProjectKey],
    description_limit: usize,
) {
    if projects.is_empty() {
        tracing::debug!("No projects found in data.");
        return;
    }

    let cards = projects
        .iter()
        .zip(keys)
        .map(|(project, key)| Card {
            id: format!("project-{}", key.index),
            class: "project-card",
            inner_html: project_card(project, key, description_limit),
        })
        .collect();

    page.set_cards(Slot::Projects, cards);
}

fn project_card(project: &Project, key: &ProjectKey, description_limit: usize) -> String {
    let background = format!(
        "background-image: url('{}'); background-size: cover; background-position: center;",
        css_string_escape(project.image())
    );
    let summary = truncate_chars(project.description(), description_limit);

    let links: Vec<String> = [
        project
            .code_link()
            .map(|href| external_link(href, "fab fa-github", "Code")),
        project
            .demo_link()
            .map(|href| external_link(href, "fas fa-external-link-alt", "Live Demo")),
    ]
    .into_iter()
    .flatten()
    .collect();

    format!(
        concat!(
            r#"<div class="project-img" style="{}"></div>"#,
            r#"<div class="project-info"><div><h3>{}</h3>"#,
            r#"<p>{} <span class="read-more-trigger" data-index="{}" data-project-id="{}">Read More</span></p></div>"#,
            r#"<div class="project-links">{}</div></div>"#
        ),
        html_escape(&background),
        html_escape(project.title()),
        html_escape(&summary),
        key.index,
        html_escape(&key.id),
        links.join("")
    )
}
