//! Page model - the pre-built page and the containers renderers fill in
//!
//! The page markup lives in the embedded templates. Each dynamic container is
//! a [`Slot`]; a slot nobody filled keeps the template's placeholder content.

mod reveal;

pub use reveal::{RevealEntry, RevealObserver, RevealOptions, RootMargin};

use indexmap::IndexMap;

use crate::config::RevealConfig;
use crate::helpers::html_escape;

/// Dynamic containers of the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Logo,
    HeroTitle,
    HeroSubtitle,
    HeroImage,
    AboutText,
    AboutImage,
    Skills,
    Projects,
}

impl Slot {
    pub const ALL: [Slot; 8] = [
        Slot::Logo,
        Slot::HeroTitle,
        Slot::HeroSubtitle,
        Slot::HeroImage,
        Slot::AboutText,
        Slot::AboutImage,
        Slot::Skills,
        Slot::Projects,
    ];

    /// Key under which the slot is exposed to templates
    pub fn key(self) -> &'static str {
        match self {
            Slot::Logo => "logo",
            Slot::HeroTitle => "hero_title",
            Slot::HeroSubtitle => "hero_subtitle",
            Slot::HeroImage => "hero_image",
            Slot::AboutText => "about_text",
            Slot::AboutImage => "about_image",
            Slot::Skills => "skills",
            Slot::Projects => "projects",
        }
    }
}

/// Static elements animated on scroll, in page order
pub const STATIC_REVEAL: &[&str] = &[
    "hero-content",
    "section-title-about",
    "about-content",
    "section-title-skills",
    "section-title-projects",
    "section-title-contact",
    "contact-container",
];

/// A node created by a renderer inside a container
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub id: String,
    pub class: &'static str,
    pub inner_html: String,
}

/// What a renderer put into a slot
#[derive(Debug, Clone, PartialEq)]
pub enum SlotContent {
    Html(String),
    Cards(Vec<Card>),
}

/// The page being built
#[derive(Debug, Clone)]
pub struct Page {
    slots: IndexMap<Slot, SlotContent>,
    pub reveal: RevealObserver,
}

impl Page {
    /// A page in its placeholder state, with static elements observed
    pub fn new(reveal: &RevealConfig) -> Self {
        let mut reveal = RevealObserver::new(reveal);
        reveal.observe(STATIC_REVEAL.iter().copied());
        Self {
            slots: IndexMap::new(),
            reveal,
        }
    }

    /// Replace the container's contents with markup
    pub fn set_inner_html(&mut self, slot: Slot, html: impl Into<String>) {
        self.slots.insert(slot, SlotContent::Html(html.into()));
    }

    /// Replace the container's contents with escaped text
    pub fn set_text(&mut self, slot: Slot, text: &str) {
        self.set_inner_html(slot, html_escape(text));
    }

    /// Replace the container's contents with cards
    pub fn set_cards(&mut self, slot: Slot, cards: Vec<Card>) {
        self.slots.insert(slot, SlotContent::Cards(cards));
    }

    pub fn content(&self, slot: Slot) -> Option<&SlotContent> {
        self.slots.get(&slot)
    }

    /// Whether the slot still shows its placeholder
    pub fn is_placeholder(&self, slot: Slot) -> bool {
        !self.slots.contains_key(&slot)
    }

    /// Ids of all cards carrying one of the given classes, in page order
    pub fn query_cards(&self, classes: &[&str]) -> Vec<String> {
        Slot::ALL
            .iter()
            .filter_map(|slot| match self.slots.get(slot) {
                Some(SlotContent::Cards(cards)) => Some(cards),
                _ => None,
            })
            .flatten()
            .filter(|card| classes.contains(&card.class))
            .map(|card| card.id.clone())
            .collect()
    }

    /// Attach the reveal animation to freshly rendered skill and project cards
    pub fn attach_reveal(&mut self) {
        let cards = self.query_cards(&["skill-card", "project-card"]);
        self.reveal.observe(cards);
    }

    /// Final markup of a filled slot, or `None` for a placeholder
    pub fn slot_html(&self, slot: Slot) -> Option<String> {
        match self.slots.get(&slot)? {
            SlotContent::Html(html) => Some(html.clone()),
            SlotContent::Cards(cards) => Some(
                cards
                    .iter()
                    .map(|card| self.card_html(card))
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
        }
    }

    fn card_html(&self, card: &Card) -> String {
        let entry = self.reveal.entry(&card.id);
        let class = match entry {
            Some(_) => format!("{} {}", card.class, RevealEntry::CLASS),
            None => card.class.to_string(),
        };
        let style = entry
            .and_then(|e| e.style())
            .map(|s| format!(r#" style="{}""#, s))
            .unwrap_or_default();

        format!(
            r#"<div id="{}" class="{}"{}>{}</div>"#,
            html_escape(&card.id),
            class,
            style,
            card.inner_html
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str, class: &'static str) -> Card {
        Card {
            id: id.to_string(),
            class,
            inner_html: format!("<h3>{}</h3>", id),
        }
    }

    #[test]
    fn test_placeholder_until_filled() {
        let mut page = Page::new(&RevealConfig::default());
        assert!(Slot::ALL.iter().all(|s| page.is_placeholder(*s)));
        assert_eq!(page.slot_html(Slot::HeroTitle), None);

        page.set_text(Slot::HeroSubtitle, "<b>hi</b>");
        assert_eq!(
            page.slot_html(Slot::HeroSubtitle).unwrap(),
            "&lt;b&gt;hi&lt;/b&gt;"
        );
        assert!(!page.is_placeholder(Slot::HeroSubtitle));
    }

    #[test]
    fn test_static_elements_observed() {
        let page = Page::new(&RevealConfig::default());
        assert!(page.reveal.entry("hero-content").is_some());
        assert!(page.reveal.entry("contact-container").is_some());
    }

    #[test]
    fn test_attach_reveal_to_cards() {
        let mut page = Page::new(&RevealConfig::default());
        page.set_cards(Slot::Projects, vec![card("project-0", "project-card")]);
        page.set_cards(
            Slot::Skills,
            vec![card("skill-0", "skill-card"), card("skill-1", "skill-card")],
        );

        assert_eq!(
            page.query_cards(&["skill-card", "project-card"]),
            vec!["skill-0", "skill-1", "project-0"]
        );

        page.attach_reveal();
        assert_eq!(page.reveal.entry("project-0").unwrap().delay_ms, Some(200));

        let html = page.slot_html(Slot::Projects).unwrap();
        assert_eq!(
            html,
            r#"<div id="project-0" class="project-card hidden" style="transition-delay: 200ms"><h3>project-0</h3></div>"#
        );
    }
}
