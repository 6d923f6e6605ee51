use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use parking_lot::RwLock;

use super::bits::Title;

pub fn get_mock_title_1() -> Title {
    "Matrix".into()
}

pub fn get_mock_title_2() -> Title {
    "Interestelar".into()
}

pub fn get_mock_title_3() -> Title {
    "O Senhor dos Anéis".into()
}

/// Shared queue used by tests to collect notifications in the order they arrive
pub type MockNotifications<T> = Arc<RwLock<VecDeque<T>>>;

pub fn get_mock_notifications<T>() -> (MockNotifications<T>, MockNotifications<T>) {
    let notifications = Arc::new(RwLock::new(VecDeque::new()));
    let notifications_2 = notifications.clone();
    (notifications, notifications_2)
}

pub fn get_mock_counter_pair() -> (Arc<AtomicUsize>, Arc<AtomicUsize>) {
    let counter_1 = Arc::new(AtomicUsize::new(0));
    let counter_2 = counter_1.clone();
    (counter_1, counter_2)
}

pub fn bump_mock_counter(value: &AtomicUsize) {
    value.fetch_add(1, Ordering::Relaxed);
}

pub fn read_mock_counter(value: &AtomicUsize) -> usize {
    value.load(Ordering::Relaxed)
}
