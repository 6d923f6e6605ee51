use std::fmt;

use catalog_core::core::{
    bits::{DispatchPolicy, Title},
    functional::{
        DispatchError, IntoObservableMany, MultiObserver, ObserverHandle,
        PublishMany, SubscriptionError,
    },
};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatalogState {
    /// No movie was ever added
    Empty,
    /// At least one movie was added
    Populated,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Subscription(#[from] SubscriptionError),
    #[error("Movie '{title}' was added, but dispatch failed: {source}")]
    Dispatch {
        title: Title,
        #[source]
        source: DispatchError,
    },
}

/// Movie catalog that observers can subscribe to
///
/// Adding a movie is the only mutation. The catalog is updated first and
/// then every attached observer is notified synchronously, in the order
/// they were attached. Observers read the catalog they are handed,
/// usually through [`Catalog::last_added`].
pub struct Catalog {
    items: Vec<Title>,
    last_added: Option<Title>,
    observers: MultiObserver<Catalog>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::new_with_policy(DispatchPolicy::default())
    }

    pub fn new_with_policy(policy: DispatchPolicy) -> Self {
        Self {
            items: Vec::new(),
            last_added: None,
            observers: MultiObserver::new_with_policy(policy),
        }
    }

    pub fn attach(&mut self, observer: &ObserverHandle<Catalog>) {
        tracing::info!("Catalog: observer registered: {}", observer.handler_name());
        self.observers.attach(observer);
    }

    pub fn detach(&mut self, observer: &ObserverHandle<Catalog>) -> Result<(), CatalogError> {
        self.observers.detach(observer)?;
        tracing::info!("Catalog: observer removed: {}", observer.handler_name());
        Ok(())
    }

    /// Append movie and notify observers
    ///
    /// The movie stays in the catalog even if some observer fails.
    pub fn add_item(&mut self, title: impl Into<Title>) -> Result<(), CatalogError> {
        let title = title.into();
        tracing::info!("Catalog: adding movie '{}'", title);
        self.observers.prune();

        self.items.push(title.clone());
        self.last_added = Some(title.clone());

        let catalog: &Catalog = self;
        tracing::info!(
            "Catalog: notifying {} service(s)",
            catalog.observers.len()
        );

        catalog
            .observers
            .publish_many(catalog)
            .map_err(|source| CatalogError::Dispatch { title, source })
    }

    pub fn last_added(&self) -> Option<&Title> {
        self.last_added.as_ref()
    }

    pub fn items(&self) -> &[Title] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn state(&self) -> CatalogState {
        match self.last_added {
            None => CatalogState::Empty,
            Some(_) => CatalogState::Populated,
        }
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub fn get_policy(&self) -> DispatchPolicy {
        self.observers.get_policy()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("items", &self.items)
            .field("last_added", &self.last_added)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl IntoObservableMany<Catalog> for Catalog {
    fn get_multi_observer_mut(&mut self) -> &mut MultiObserver<Catalog> {
        &mut self.observers
    }
}
