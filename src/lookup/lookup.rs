use std::fmt;

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupStatus {
    InternalCatalog,
    ExternalService,
}

impl fmt::Display for LookupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InternalCatalog => f.write_str("found in the internal catalog"),
            Self::ExternalService => f.write_str("found using the external service (via adapter)"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LookupResult {
    pub title: String,
    pub status: LookupStatus,
}

/// The way the application looks movies up
pub trait CatalogLookup {
    fn find_movie(&self, title: &str) -> LookupResult;
}

pub struct InternalLookup;

impl CatalogLookup for InternalLookup {
    fn find_movie(&self, title: &str) -> LookupResult {
        LookupResult {
            title: title.to_owned(),
            status: LookupStatus::InternalCatalog,
        }
    }
}

/// Render result the way the client prints it
pub fn describe_lookup(lookup: &dyn CatalogLookup, title: &str) -> eyre::Result<String> {
    let result = lookup.find_movie(title);
    Ok(serde_json::to_string(&result)?)
}
