//! Reveal-on-scroll animation state
//!
//! Elements are registered here at build time and start hidden. The page
//! script reveals each one the first time enough of it enters the viewport
//! and never observes it again.

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

use crate::config::RevealConfig;

/// Margins applied to the viewport before intersection is computed, in px
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RootMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl RootMargin {
    /// Parse a CSS-style margin list (`"0px 0px -50px 0px"`, `"10px"`, ...)
    ///
    /// Unparseable components count as zero.
    pub fn parse(s: &str) -> Self {
        let values: Vec<f64> = s
            .split_whitespace()
            .map(|part| part.trim_end_matches("px").parse().unwrap_or(0.0))
            .collect();

        match values.as_slice() {
            [all] => Self {
                top: *all,
                right: *all,
                bottom: *all,
                left: *all,
            },
            [vertical, horizontal] => Self {
                top: *vertical,
                right: *horizontal,
                bottom: *vertical,
                left: *horizontal,
            },
            [top, horizontal, bottom] => Self {
                top: *top,
                right: *horizontal,
                bottom: *bottom,
                left: *horizontal,
            },
            [top, right, bottom, left, ..] => Self {
                top: *top,
                right: *right,
                bottom: *bottom,
                left: *left,
            },
            [] => Self::default(),
        }
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}px {}px {}px {}px",
            self.top, self.right, self.bottom, self.left
        )
    }
}

/// Registration of one animated element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevealEntry {
    /// Transition delay, only set for elements registered in a batch
    pub delay_ms: Option<u64>,
}

impl RevealEntry {
    /// Class every observed element starts with; the page script adds `show`
    pub const CLASS: &'static str = "hidden";

    /// Inline style for the element, if any
    pub fn style(&self) -> Option<String> {
        self.delay_ms.map(|ms| format!("transition-delay: {}ms", ms))
    }
}

/// One-shot intersection observer
#[derive(Debug, Clone)]
pub struct RevealObserver {
    threshold: f64,
    root_margin: RootMargin,
    stagger_ms: u64,
    entries: IndexMap<String, RevealEntry>,
}

impl RevealObserver {
    pub fn new(config: &RevealConfig) -> Self {
        Self {
            threshold: config.threshold,
            root_margin: RootMargin::parse(&config.root_margin),
            stagger_ms: config.stagger_ms,
            entries: IndexMap::new(),
        }
    }

    /// Register a batch of elements
    ///
    /// Each element is hidden; when the batch holds more than one element,
    /// element `i` gets a delay of `i * stagger_ms`. Elements that are
    /// already registered keep their current delay.
    pub fn observe<I, S>(&mut self, batch: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let batch: Vec<String> = batch.into_iter().map(Into::into).collect();
        let staggered = batch.len() > 1;

        for (position, id) in batch.into_iter().enumerate() {
            if self.entries.contains_key(&id) {
                continue;
            }
            let delay_ms = staggered.then(|| position as u64 * self.stagger_ms);
            self.entries.insert(id, RevealEntry { delay_ms });
        }
    }

    pub fn entry(&self, id: &str) -> Option<&RevealEntry> {
        self.entries.get(id)
    }

    /// Observer options handed to the page script
    pub fn options(&self) -> RevealOptions {
        RevealOptions {
            threshold: self.threshold,
            root_margin: self.root_margin.to_string(),
            stagger_ms: self.stagger_ms,
        }
    }
}

/// `IntersectionObserver` options as the page script reads them
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevealOptions {
    pub threshold: f64,
    pub root_margin: String,
    pub stagger_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observer() -> RevealObserver {
        RevealObserver::new(&RevealConfig::default())
    }

    #[test]
    fn test_root_margin_parse() {
        assert_eq!(
            RootMargin::parse("0px 0px -50px 0px"),
            RootMargin {
                top: 0.0,
                right: 0.0,
                bottom: -50.0,
                left: 0.0
            }
        );
        assert_eq!(RootMargin::parse("10px").bottom, 10.0);
        assert_eq!(RootMargin::parse("5px 7px").right, 7.0);
        assert_eq!(RootMargin::parse(""), RootMargin::default());
    }

    #[test]
    fn test_root_margin_display() {
        assert_eq!(RootMargin::parse("0px 0px -50px 0px").to_string(), "0px 0px -50px 0px");
        assert_eq!(RootMargin::parse("10").to_string(), "10px 10px 10px 10px");
        assert_eq!(RootMargin::parse("1.5px junk").to_string(), "1.5px 0px 1.5px 0px");
    }

    #[test]
    fn test_batch_stagger() {
        let mut obs = observer();
        obs.observe(["a", "b", "c"]);
        assert_eq!(obs.entry("a").unwrap().delay_ms, Some(0));
        assert_eq!(obs.entry("b").unwrap().delay_ms, Some(100));
        assert_eq!(obs.entry("c").unwrap().style().unwrap(), "transition-delay: 200ms");

        obs.observe(["solo"]);
        assert_eq!(obs.entry("solo").unwrap().delay_ms, None);
        assert_eq!(obs.entry("solo").unwrap().style(), None);
    }

    #[test]
    fn test_reobserve_is_noop() {
        let mut obs = observer();
        obs.observe(["a", "b"]);
        obs.observe(["b", "a"]);
        assert_eq!(obs.entry("a").unwrap().delay_ms, Some(0));
        assert_eq!(obs.entry("b").unwrap().delay_ms, Some(100));
        assert!(obs.entry("unknown").is_none());
    }

    #[test]
    fn test_options() {
        let obs = RevealObserver::new(&RevealConfig {
            threshold: 0.25,
            root_margin: "-20px".to_string(),
            stagger_ms: 50,
        });
        assert_eq!(
            obs.options(),
            RevealOptions {
                threshold: 0.25,
                root_margin: "-20px -20px -20px -20px".to_string(),
                stagger_ms: 50,
            }
        );
    }
}
