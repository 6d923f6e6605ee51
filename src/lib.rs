pub mod app {
    pub mod application;
    pub mod catalog;
    pub mod config;
    pub mod config_loader;
    pub mod observers;
}

pub mod catalog {
    pub mod catalog;
    pub mod shared_catalog;

    pub mod observers {
        pub mod email_notifier;
        pub mod logger_service;
        pub mod recommender;
    }
}

pub mod cli;

pub mod lookup {
    pub mod adapter;
    pub mod lookup;
}

pub use cli::{Cli, Commands};
