//! Render pipeline - maps a content document onto the page

mod sections;

pub use sections::{render_about, render_hero, render_logo, render_projects, render_skills};

use crate::context::Portfolio;
use crate::page::Page;

/// Render every section of a loaded portfolio into the page
///
/// Sections are rendered in a fixed order (logo, hero, about, skills,
/// projects). Once the skill and project cards exist, the reveal animation
/// is attached to them.
pub fn render_page(page: &mut Page, portfolio: &Portfolio, description_limit: usize) {
    let doc = portfolio.document();

    render_logo(page, doc.settings.as_ref());
    render_hero(page, doc.hero.as_ref());
    render_about(page, doc.about.as_ref());
    render_skills(page, doc.skills());
    render_projects(
        page,
        portfolio.projects(),
        portfolio.keys(),
        description_limit,
    );

    page.attach_reveal();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RevealConfig;
    use crate::content::ContentDocument;
    use crate::page::Slot;

    fn render(json: &str) -> Page {
        let doc = ContentDocument::from_json(json).unwrap();
        let portfolio = Portfolio::new(doc);
        let mut page = Page::new(&RevealConfig::default());
        render_page(&mut page, &portfolio, 90);
        page
    }

    #[test]
    fn test_empty_document_renders_nothing() {
        let page = render("{}");
        assert!(Slot::ALL.iter().all(|s| page.is_placeholder(*s)));
    }

    #[test]
    fn test_missing_sections_are_omitted_exactly() {
        let full = r#"{
            "settings": {"logo": "logo.png"},
            "hero": {"title": "T", "subtitle": "S", "image": "h.png"},
            "about": {"description": "D", "image": "a.png"},
            "skills": [{"name": "Rust", "icon": "fab fa-rust"}],
            "projects": [{"title": "P", "description": "d", "image": "p.png"}]
        }"#;
        let full_doc: serde_json::Value = serde_json::from_str(full).unwrap();

        let sections: [(&str, &[Slot]); 5] = [
            ("settings", &[Slot::Logo]),
            ("hero", &[Slot::HeroTitle, Slot::HeroSubtitle, Slot::HeroImage]),
            ("about", &[Slot::AboutText, Slot::AboutImage]),
            ("skills", &[Slot::Skills]),
            ("projects", &[Slot::Projects]),
        ];

        // Every subset of top-level sections
        for mask in 0u32..(1 << sections.len()) {
            let mut doc = full_doc.clone();
            let obj = doc.as_object_mut().unwrap();
            for (bit, (name, _)) in sections.iter().enumerate() {
                if mask & (1 << bit) != 0 {
                    obj.remove(*name);
                }
            }

            let page = render(&doc.to_string());
            for (bit, (_, slots)) in sections.iter().enumerate() {
                let removed = mask & (1 << bit) != 0;
                for slot in *slots {
                    assert_eq!(page.is_placeholder(*slot), removed, "mask {mask}, {slot:?}");
                }
            }
        }
    }

    #[test]
    fn test_cards_observed_after_render() {
        let page = render(
            r#"{"skills": [{"name": "a"}, {"name": "b"}],
                "projects": [{"title": "p"}]}"#,
        );
        assert!(page.reveal.entry("skill-0").is_some());
        assert!(page.reveal.entry("project-0").is_some());
        assert_eq!(page.reveal.entry("project-0").unwrap().delay_ms, Some(200));
    }

    #[test]
    fn test_truncation_scenario() {
        let page = render(&format!(
            r#"{{"projects":[{{"title":"A","description":"{}","image":"a.png"}}]}}"#,
            "x".repeat(95)
        ));
        let html = page.slot_html(Slot::Projects).unwrap();
        assert!(html.contains(&format!("{}...", "x".repeat(90))));
        assert!(!html.contains(&"x".repeat(91)));
    }
}
