use super::lookup::{CatalogLookup, LookupResult, LookupStatus};

/// Third party movie service with its own answer format
pub struct ExternalMovieService;

impl ExternalMovieService {
    /// Answers with the title reversed
    pub fn find_specific(&self, title: &str) -> String {
        title.chars().rev().collect()
    }
}

/// Makes [`ExternalMovieService`] usable wherever a [`CatalogLookup`] is expected
pub struct ExternalLookupAdapter {
    service: ExternalMovieService,
}

impl ExternalLookupAdapter {
    pub fn new(service: ExternalMovieService) -> Self {
        Self { service }
    }
}

impl CatalogLookup for ExternalLookupAdapter {
    fn find_movie(&self, title: &str) -> LookupResult {
        let raw = self.service.find_specific(title);
        tracing::debug!(%raw, "Adapter: translating external answer");

        LookupResult {
            title: raw.chars().rev().collect(),
            status: LookupStatus::ExternalService,
        }
    }
}
