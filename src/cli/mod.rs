use catalog_core::core::bits::DispatchPolicy;
use clap::{Parser, Subcommand};

use crate::app::config::ObserverKind;

/// Command line interface definition
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Demonstration to run
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(long, short, global = true)]
    pub config_path: Option<String>,

    /// Log directory override
    #[arg(long, short, global = true)]
    pub log_path: Option<String>,

    /// Dispatch policy override (isolate, fail_fast)
    #[arg(long, short, global = true)]
    pub dispatch_policy: Option<DispatchPolicy>,

    /// E-mail recipient override
    #[arg(long, short, global = true)]
    pub email_recipient: Option<String>,
}

/// Available demonstrations
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add movies to an observed catalog
    Observer {
        /// Movies to add, in order
        #[arg(long, num_args = 1.., default_values_t = Commands::default_titles())]
        titles: Vec<String>,
        /// Observer to detach part way through
        #[arg(long, value_enum, default_value_t = ObserverKind::LoggerService)]
        detach: ObserverKind,
        /// Number of movies added before detaching
        #[arg(long, default_value_t = 2)]
        detach_after: usize,
    },
    /// Show that the shared shelf is a single instance
    Singleton {},
    /// Look a movie up internally and through the external service adapter
    Adapter {
        /// Movie to look up
        #[arg(long, default_value = "Matrix")]
        title: String,
    },
}

impl Commands {
    pub fn default_titles() -> Vec<String> {
        ["Matrix", "Interestelar", "O Senhor dos Anéis"]
            .into_iter()
            .map(String::from)
            .collect()
    }
}
