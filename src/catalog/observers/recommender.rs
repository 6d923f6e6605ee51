use catalog_core::core::{bits::Title, functional::NotificationHandler};
use eyre::{OptionExt, Result};
use itertools::Itertools;
use parking_lot::RwLock;

use crate::catalog::catalog::Catalog;

#[derive(Default)]
struct RecommenderState {
    seen: Vec<Title>,
    recommendations: Vec<Title>,
}

/// Recalculates recommendations whenever a movie is added
///
/// Newest movies are recommended first, each title at most once.
pub struct Recommender {
    max_recommendations: usize,
    state: RwLock<RecommenderState>,
}

impl Recommender {
    pub fn new(max_recommendations: usize) -> Self {
        Self {
            max_recommendations,
            state: RwLock::new(RecommenderState::default()),
        }
    }

    pub fn max_recommendations(&self) -> usize {
        self.max_recommendations
    }

    pub fn recommendations(&self) -> Vec<Title> {
        self.state.read().recommendations.clone()
    }

    pub fn notification_count(&self) -> usize {
        self.state.read().seen.len()
    }
}

impl NotificationHandler<Catalog> for Recommender {
    fn handle_notification(&self, catalog: &Catalog) -> Result<()> {
        let title = catalog
            .last_added()
            .ok_or_eyre("Recommender: catalog has no movies yet")?;

        tracing::info!(
            "Recommender: recalculating recommendations including '{}'...",
            title
        );

        let mut state = self.state.write();
        state.seen.push(title.clone());
        state.recommendations = state
            .seen
            .iter()
            .rev()
            .unique()
            .take(self.max_recommendations)
            .cloned()
            .collect();

        tracing::debug!(
            recommendations = %state.recommendations.iter().join(", "),
            "Recommender: updated"
        );

        Ok(())
    }

    fn handler_name(&self) -> &str {
        "Recommender"
    }
}
