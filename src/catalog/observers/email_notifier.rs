use catalog_core::core::{bits::Title, functional::NotificationHandler};
use eyre::{OptionExt, Result};
use parking_lot::RwLock;

use crate::catalog::catalog::Catalog;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmailMessage {
    pub recipient: String,
    pub title: Title,
    pub subject: String,
}

/// Tells subscribers about new movies by e-mail
///
/// Sending is simulated. Messages are kept in the outbox for inspection.
pub struct EmailNotifier {
    recipient: String,
    outbox: RwLock<Vec<EmailMessage>>,
}

impl EmailNotifier {
    pub fn new(recipient: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            outbox: RwLock::new(Vec::new()),
        }
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn sent(&self) -> Vec<EmailMessage> {
        self.outbox.read().clone()
    }
}

impl NotificationHandler<Catalog> for EmailNotifier {
    fn handle_notification(&self, catalog: &Catalog) -> Result<()> {
        let title = catalog
            .last_added()
            .ok_or_eyre("EmailNotifier: catalog has no movies yet")?;

        tracing::info!(
            recipient = %self.recipient,
            "EmailNotifier: sending e-mail about '{}'...",
            title
        );

        self.outbox.write().push(EmailMessage {
            recipient: self.recipient.clone(),
            title: title.clone(),
            subject: format!("New in the catalog: {}", title),
        });

        Ok(())
    }

    fn handler_name(&self) -> &str {
        "EmailNotifier"
    }
}
