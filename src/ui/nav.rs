//! Mobile navigation menu

/// Open/closed state of the collapsible links panel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    /// The menu affordance was pressed
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Class lists for the links panel and the menu affordance
    pub fn classes(&self) -> (&'static str, &'static str) {
        if self.open {
            ("nav-links active", "hamburger toggle")
        } else {
            ("nav-links", "hamburger")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let mut nav = NavMenu::default();
        assert_eq!(nav.classes(), ("nav-links", "hamburger"));

        nav.toggle();
        assert_eq!(nav.classes(), ("nav-links active", "hamburger toggle"));

        nav.toggle();
        assert_eq!(nav, NavMenu::default());
    }
}
