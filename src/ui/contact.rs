//! Contact form submission through an external form relay

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::FormRelayConfig;
use crate::error::SubmissionError;

/// Kind of message shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

/// A message the user must see (and acknowledge)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}

/// Reply body of the relay
#[derive(Debug, Default, Deserialize)]
struct RelayReply {
    #[serde(default)]
    message: Option<String>,
}

/// HTTP client for the form relay endpoint
#[derive(Debug, Clone)]
pub struct RelayClient {
    client: reqwest::Client,
    endpoint: String,
    access_key: Option<String>,
}

impl RelayClient {
    pub fn new(config: &FormRelayConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.clone(),
            access_key: config.access_key.clone(),
        }
    }

    /// Post the fields as multipart form data
    pub async fn submit(&self, fields: &IndexMap<String, String>) -> Result<(), SubmissionError> {
        let mut form = reqwest::multipart::Form::new();
        if let Some(key) = &self.access_key {
            form = form.text("access_key", key.clone());
        }
        for (name, value) in fields {
            form = form.text(name.clone(), value.clone());
        }

        tracing::debug!("Submitting contact form to {}", self.endpoint);
        let response = self.client.post(&self.endpoint).multipart(form).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let reply: RelayReply = response.json().await.unwrap_or_default();
        Err(SubmissionError::Rejected {
            status: status.as_u16(),
            message: reply.message,
        })
    }
}

/// The form's submit button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    pub label: String,
    pub disabled: bool,
}

impl Default for SubmitControl {
    fn default() -> Self {
        Self {
            label: "Send Message".to_string(),
            disabled: false,
        }
    }
}

impl SubmitControl {
    const BUSY_LABEL: &'static str = "Sending...";

    /// Disable the control and show the busy label; returns the label to restore
    pub fn begin(&mut self) -> String {
        self.disabled = true;
        std::mem::replace(&mut self.label, Self::BUSY_LABEL.to_string())
    }

    pub fn restore(&mut self, label: String) {
        self.label = label;
        self.disabled = false;
    }
}

/// Contact form fields plus its submit control
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub fields: IndexMap<String, String>,
    pub control: SubmitControl,
}

impl ContactForm {
    pub fn new<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            control: SubmitControl::default(),
        }
    }

    /// Submit through the relay
    ///
    /// The control is disabled for the duration of the request and always
    /// restored afterwards. On success the fields are cleared.
    pub async fn submit(&mut self, relay: &RelayClient) -> Notification {
        let label = self.control.begin();
        let result = relay.submit(&self.fields).await;
        self.control.restore(label);

        match result {
            Ok(()) => {
                self.fields.values_mut().for_each(String::clear);
                Notification::success("Message sent successfully!")
            }
            Err(e) => {
                tracing::error!("Contact form submission failed: {}", e);
                Notification::error(e.user_message())
            }
        }
    }
}
