use std::{fmt, str::FromStr};

use eyre::{eyre, Report};
use serde::{Deserialize, Serialize};

pub type Title = string_cache::DefaultAtom; // movie title as shown in the catalog

/// What to do when one observer fails while a notification is being dispatched
#[derive(Default, Hash, Eq, PartialEq, Clone, Copy, Serialize, Deserialize, Debug)]
#[serde(rename_all = "snake_case")]
pub enum DispatchPolicy {
    /// Keep notifying the remaining observers and report every failure at the end
    #[default]
    Isolate,
    /// Stop at the first failure, remaining observers are not notified
    FailFast,
}

impl fmt::Display for DispatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Isolate => f.write_str("isolate"),
            Self::FailFast => f.write_str("fail_fast"),
        }
    }
}

impl FromStr for DispatchPolicy {
    type Err = Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "isolate" => Ok(Self::Isolate),
            "fail_fast" | "failfast" => Ok(Self::FailFast),
            other => Err(eyre!("Unknown dispatch policy: {}", other)),
        }
    }
}
