use catalog_core::core::{bits::Title, functional::NotificationHandler};
use chrono::{DateTime, Utc};
use eyre::{OptionExt, Result};
use parking_lot::RwLock;

use crate::catalog::catalog::Catalog;

#[derive(Clone, Debug)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub title: Title,
    pub message: String,
}

/// Keeps an audit log of movies added to the catalog
pub struct LoggerService {
    entries: RwLock<Vec<LogEntry>>,
}

impl LoggerService {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.read().clone()
    }
}

impl Default for LoggerService {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationHandler<Catalog> for LoggerService {
    fn handle_notification(&self, catalog: &Catalog) -> Result<()> {
        let title = catalog
            .last_added()
            .ok_or_eyre("LoggerService: catalog has no movies yet")?;

        let entry = LogEntry {
            timestamp: Utc::now(),
            title: title.clone(),
            message: format!("new movie: '{}'", title),
        };

        tracing::info!("LoggerService: log recorded -> {}", entry.message);

        self.entries.write().push(entry);
        Ok(())
    }

    fn handler_name(&self) -> &str {
        "LoggerService"
    }
}

#[cfg(test)]
mod tests {
    use catalog_core::core::{
        functional::NotificationHandler,
        test_util::{get_mock_title_1, get_mock_title_2},
    };
    use chrono::Utc;

    use crate::catalog::catalog::Catalog;

    use super::LoggerService;

    #[test]
    fn test_logger_service_records_in_order() {
        let logger = LoggerService::new();
        let started = Utc::now();

        let mut catalog = Catalog::new();
        catalog.add_item(get_mock_title_1()).unwrap();
        logger.handle_notification(&catalog).unwrap();
        catalog.add_item(get_mock_title_2()).unwrap();
        logger.handle_notification(&catalog).unwrap();

        let entries = logger.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, get_mock_title_1());
        assert_eq!(entries[1].message, "new movie: 'Interestelar'");
        assert!(entries[0].timestamp >= started);
        assert!(entries[0].timestamp <= entries[1].timestamp);
    }
}
