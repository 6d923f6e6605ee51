use std::{
    any::type_name,
    fmt,
    sync::{Arc, Weak},
};

use eyre::Result;
use itertools::Itertools;
use thiserror::Error;

use super::bits::DispatchPolicy;

/// Notifications can be handled by multiple handlers, and so they must be passed
/// by reference
pub trait NotificationHandler<T>: Send + Sync {
    fn handle_notification(&self, notification: &T) -> Result<()>;

    /// Name shown in the dispatch transcript and in failure reports
    fn handler_name(&self) -> &str {
        type_name::<Self>()
    }
}

impl<F, T> NotificationHandler<T> for F
where
    F: Fn(&T) -> Result<()> + Send + Sync,
{
    fn handle_notification(&self, notification: &T) -> Result<()> {
        (self)(notification)
    }
}

/// Handle owned by the client. Observables only ever keep a weak reference
/// to it, so dropping the handle also ends the subscription.
pub type ObserverHandle<T> = Arc<dyn NotificationHandler<T>>;

pub fn observer_handle<T>(observer: impl NotificationHandler<T> + 'static) -> ObserverHandle<T> {
    Arc::new(observer)
}

#[derive(Clone, Debug)]
pub struct ObserverFailure {
    /// Position of the failing observer within the dispatch snapshot
    pub position: usize,
    pub observer: String,
    pub reason: String,
}

impl fmt::Display for ObserverFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}: {}", self.position, self.observer, self.reason)
    }
}

#[derive(Debug, Error)]
pub enum SubscriptionError {
    #[error("Observer is not attached: {0}")]
    NotFound(String),
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("{} observer(s) failed: {}", .failures.len(), .failures.iter().join("; "))]
    Failed { failures: Vec<ObserverFailure> },
    #[error("Dispatch aborted at {failure}, {skipped} observer(s) not notified")]
    Aborted {
        failure: ObserverFailure,
        skipped: usize,
    },
}

impl DispatchError {
    pub fn failures(&self) -> Vec<&ObserverFailure> {
        match self {
            Self::Failed { failures } => failures.iter().collect(),
            Self::Aborted { failure, .. } => vec![failure],
        }
    }
}

pub trait PublishMany<T> {
    fn publish_many(&self, notification: &T) -> Result<(), DispatchError>;
}

fn is_same_observer<T>(
    attached: &Weak<dyn NotificationHandler<T>>,
    observer: &ObserverHandle<T>,
) -> bool {
    std::ptr::addr_eq(attached.as_ptr(), Arc::as_ptr(observer))
}

/// Ordered registry of observers.
///
/// Observers are notified in attachment order. The same handle may be
/// attached more than once and is then notified once per attachment.
pub struct MultiObserver<T> {
    observers: Vec<Weak<dyn NotificationHandler<T>>>,
    policy: DispatchPolicy,
}

impl<T> MultiObserver<T> {
    pub fn new() -> Self {
        Self::new_with_policy(DispatchPolicy::default())
    }

    pub fn new_with_policy(policy: DispatchPolicy) -> Self {
        Self {
            observers: vec![],
            policy,
        }
    }

    pub fn get_policy(&self) -> DispatchPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: DispatchPolicy) {
        self.policy = policy;
    }

    /// Number of attachments whose observer is still alive
    pub fn len(&self) -> usize {
        self.observers
            .iter()
            .filter(|observer| observer.strong_count() > 0)
            .count()
    }

    pub fn has_observers(&self) -> bool {
        self.len() > 0
    }

    /// There can be multiple observers, and so we call it 'attach' and not 'set'
    ///
    /// Attachments of observers dropped since the last change are forgotten.
    pub fn attach(&mut self, observer: &ObserverHandle<T>) {
        self.prune();
        tracing::debug!(
            observer = %observer.handler_name(),
            position = self.observers.len(),
            "Attaching observer"
        );
        self.observers.push(Arc::downgrade(observer));
    }

    /// Removes the first attachment of the observer
    pub fn detach(&mut self, observer: &ObserverHandle<T>) -> Result<(), SubscriptionError> {
        let position = self
            .observers
            .iter()
            .position(|attached| is_same_observer(attached, observer))
            .ok_or_else(|| SubscriptionError::NotFound(observer.handler_name().to_owned()))?;

        tracing::debug!(
            observer = %observer.handler_name(),
            position,
            "Detaching observer"
        );
        self.observers.remove(position);
        Ok(())
    }

    /// Forget attachments whose observer has been dropped by its owner
    pub fn prune(&mut self) -> usize {
        let before = self.observers.len();
        self.observers
            .retain(|observer| observer.strong_count() > 0);
        let removed = before - self.observers.len();
        if removed > 0 {
            tracing::debug!(removed, "Pruned dropped observers");
        }
        removed
    }

    /// Live observers at this moment, in attachment order
    pub fn snapshot(&self) -> Vec<ObserverHandle<T>> {
        self.observers.iter().filter_map(Weak::upgrade).collect()
    }
}

impl<T> Default for MultiObserver<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PublishMany<T> for MultiObserver<T> {
    /// Dispatch walks a snapshot taken up front, so changing the registry
    /// while observers run does not affect this dispatch.
    fn publish_many(&self, notification: &T) -> Result<(), DispatchError> {
        let observers = self.snapshot();
        let total = observers.len();
        let mut failures = Vec::new();

        for (position, observer) in observers.iter().enumerate() {
            if let Err(err) = observer.handle_notification(notification) {
                let failure = ObserverFailure {
                    position,
                    observer: observer.handler_name().to_owned(),
                    reason: format!("{:#}", err),
                };
                tracing::warn!(%failure, policy = %self.policy, "Observer failed");

                match self.policy {
                    DispatchPolicy::Isolate => failures.push(failure),
                    DispatchPolicy::FailFast => {
                        return Err(DispatchError::Aborted {
                            failure,
                            skipped: total - position - 1,
                        })
                    }
                }
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(DispatchError::Failed { failures })
        }
    }
}

pub trait IntoObservableMany<T>: Send + Sync {
    fn get_multi_observer_mut(&mut self) -> &mut MultiObserver<T>;
}

pub mod crossbeam {
    use std::any::type_name;

    use crossbeam::channel::Sender;
    use eyre::{eyre, Result};

    use crate::core::functional::NotificationHandler;

    /// Forwards a copy of every notification, e.g. to a worker thread
    impl<T> NotificationHandler<T> for Sender<T>
    where
        T: Clone + Send + Sync,
    {
        fn handle_notification(&self, notification: &T) -> Result<()> {
            self.send(notification.clone())
                .map_err(|err| eyre!("Failed to send {}: {:?}", type_name::<T>(), err))
        }

        fn handler_name(&self) -> &str {
            "ChannelForwarder"
        }
    }
}
