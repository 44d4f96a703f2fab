//! Send a contact form message through the configured relay

use crate::ui::{ContactForm, Notification, RelayClient};
use crate::Folio;

/// Submit name, email and message; the returned notification is for the user
pub async fn run(folio: &Folio, name: &str, email: &str, message: &str) -> Notification {
    let relay = RelayClient::new(&folio.config.form_relay);
    let mut form = ContactForm::new([("name", name), ("email", email), ("message", message)]);
    form.submit(&relay).await
}
