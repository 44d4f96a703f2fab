//! Helper functions shared by the renderers, the modal and the loader

mod html;
mod url;

pub use html::*;
pub use url::*;
