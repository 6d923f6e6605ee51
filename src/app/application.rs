use std::sync::Arc;

use catalog_core::{
    core::{bits::DispatchPolicy, logging::log_init},
    init_log,
};
use eyre::{Result, WrapErr};
use itertools::Itertools;
use parking_lot::RwLock;

use crate::{
    app::{
        catalog::CatalogConfig,
        config::{ApplicationConfig, ConfigBuildError, ObserverKind},
        observers::{CatalogObservers, ObserversConfig},
    },
    catalog::{catalog::Catalog, shared_catalog::shared_shelf},
    lookup::{
        adapter::{ExternalLookupAdapter, ExternalMovieService},
        lookup::{describe_lookup, InternalLookup},
    },
    Commands,
};

/// Main application holding the catalog and the observers attached to it
pub struct Application {
    observers: CatalogObservers,
    catalog: Arc<RwLock<Catalog>>,
}

/// Application builder that provides a fluent interface for configuring the application
pub struct ApplicationBuilder {
    config: ApplicationConfig,
    init_logging: bool,
}

/// What each lookup path answered in the adapter demonstration
#[derive(Debug)]
pub struct AdapterReport {
    pub internal: String,
    pub external_raw: String,
    pub adapted: String,
}

impl ApplicationBuilder {
    pub fn new(config: ApplicationConfig) -> Self {
        Self {
            config,
            init_logging: true,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(ApplicationConfig::default())
    }

    pub fn with_dispatch_policy(mut self, policy: DispatchPolicy) -> Self {
        self.config.catalog.dispatch_policy = policy;
        self
    }

    pub fn with_observers(mut self, observers: Vec<ObserverKind>) -> Self {
        self.config.catalog.observers = observers;
        self
    }

    /// Leave the global tracing subscriber alone, e.g. when embedding
    pub fn without_logging(mut self) -> Self {
        self.init_logging = false;
        self
    }

    pub fn build(self) -> Result<Application, ConfigBuildError> {
        if self.init_logging {
            self.init_logging();
        }

        tracing::debug!("Building application with configuration: {:?}", self.config);

        let observers = ObserversConfig::from_config(&self.config)?.make()?;
        let catalog = CatalogConfig::from_settings(&self.config.catalog)?.make(&observers)?;

        tracing::info!(
            policy = %self.config.catalog.dispatch_policy,
            observers = %observers.enabled().iter().join(", "),
            "Catalog ready"
        );

        Ok(Application {
            observers,
            catalog,
        })
    }

    fn init_logging(&self) {
        let log_filter = self.config.logging.filter.clone().unwrap_or_else(|| {
            format!("{}=info,catalog_core=info", env!("CARGO_CRATE_NAME"))
        });

        init_log!(log_filter, self.config.logging.log_path.clone());
    }
}

impl Application {
    pub fn run(&self, command: &Commands) -> Result<()> {
        match command {
            Commands::Observer {
                titles,
                detach,
                detach_after,
            } => self.run_observer_demo(titles, *detach, *detach_after),
            Commands::Singleton {} => self.run_singleton_demo().map(|_| ()),
            Commands::Adapter { title } => self.run_adapter_demo(title).map(|_| ()),
        }
    }

    /// Add movies one by one, detaching one observer after `detach_after` movies
    pub fn run_observer_demo(
        &self,
        titles: &[String],
        detach: ObserverKind,
        detach_after: usize,
    ) -> Result<()> {
        for (added, title) in titles.iter().enumerate() {
            if added == detach_after {
                self.detach_observer(detach);
            }

            self.catalog
                .write()
                .add_item(title.as_str())
                .wrap_err_with(|| format!("Failed to add movie '{}'", title))?;
        }

        // Detach point lies past the last movie
        if titles.len() <= detach_after {
            self.detach_observer(detach);
        }

        let catalog = self.catalog.read();
        tracing::info!(
            "Catalog: {} movie(s), last added: {}",
            catalog.len(),
            catalog
                .last_added()
                .map(|title| title.to_string())
                .unwrap_or_else(|| String::from("<none>"))
        );

        Ok(())
    }

    fn detach_observer(&self, kind: ObserverKind) {
        if let Err(err) = self.catalog.write().detach(&self.observers.handle(kind)) {
            tracing::warn!("Catalog: cannot remove {}: {}", kind, err);
        }
    }

    /// Returns whether both accessors handed out the same shelf
    pub fn run_singleton_demo(&self) -> Result<bool> {
        let shelf_1 = shared_shelf();
        let shelf_2 = shared_shelf();

        {
            let mut shelf = shelf_1.write();
            shelf.add_movie("O Senhor dos Anéis", 2001);
            shelf.add_movie("Matrix", 1999);
        }

        let listing = shelf_2
            .read()
            .list_movies()
            .iter()
            .map(|movie| format!("{} ({})", movie.title, movie.year))
            .join(", ");
        tracing::info!("Movies on the shelf: {}", listing);

        let same_instance = Arc::ptr_eq(&shelf_1, &shelf_2);
        if same_instance {
            tracing::info!("OK! The movie shelf is a single shared instance");
        } else {
            tracing::error!("Failed: got different shelf instances");
        }

        Ok(same_instance)
    }

    pub fn run_adapter_demo(&self, title: &str) -> Result<AdapterReport> {
        tracing::info!("Client: using the internal catalog");
        let internal = describe_lookup(&InternalLookup, title)?;
        tracing::info!("{}", internal);

        tracing::info!("Client: the external service answers in its own format");
        let service = ExternalMovieService;
        let external_raw = service.find_specific(title);
        tracing::info!("Raw answer from the external service: {}", external_raw);

        tracing::info!("Client: using the external service through the adapter");
        let adapted = describe_lookup(&ExternalLookupAdapter::new(service), title)?;
        tracing::info!("{}", adapted);

        Ok(AdapterReport {
            internal,
            external_raw,
            adapted,
        })
    }

    pub fn catalog(&self) -> &Arc<RwLock<Catalog>> {
        &self.catalog
    }

    pub fn observers(&self) -> &CatalogObservers {
        &self.observers
    }
}
