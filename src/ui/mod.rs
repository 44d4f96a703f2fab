//! Page behaviors that are not part of the render pipeline

pub mod contact;
mod nav;
mod theme;

pub use contact::{ContactForm, Notification, NotificationKind, RelayClient, SubmitControl};
pub use nav::NavMenu;
pub use theme::{Theme, ThemeController, THEME_KEY};
