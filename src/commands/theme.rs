//! Show or change the stored theme preference

use anyhow::Result;

use crate::prefs::FilePreferences;
use crate::ui::{Theme, ThemeController};
use crate::Folio;

/// What to do with the theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeAction {
    Show,
    Toggle,
    Set(Theme),
}

/// Apply the action and return the resulting theme
pub fn run(folio: &Folio, action: ThemeAction) -> Result<Theme> {
    let mut controller = ThemeController::load(FilePreferences::load(folio.preferences_path()));

    let theme = match action {
        ThemeAction::Show => controller.theme(),
        ThemeAction::Toggle => controller.toggle()?,
        ThemeAction::Set(theme) => controller.set(theme)?,
    };

    if action != ThemeAction::Show {
        tracing::info!("Theme set to {}", theme);
    }
    Ok(theme)
}
