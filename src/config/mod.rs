//! Configuration module

mod site;

pub use site::FormRelayConfig;
pub use site::RevealConfig;
pub use site::SiteConfig;
