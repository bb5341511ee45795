use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for
/// non-release builds.
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "encore")]
#[command(version = get_version())]
#[command(about = "Browse, filter and curate a catalog of classical concerts", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to the concert catalog JSON (overrides ENCORE_CATALOG)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List concerts in a view
    #[command(alias = "ls")]
    List {
        /// Free-text search over title, subtitle, venue and performers
        #[arg(short, long)]
        search: Option<String>,

        /// Require a boolean tag; repeat for several tags
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// View to list (defaults to the full catalog)
        #[arg(short, long)]
        view: Option<String>,
    },

    /// Show full details for one concert
    Show {
        /// Concert id as printed by `list`
        id: String,
    },

    /// List the saved views
    #[command(alias = "vs")]
    Views,

    /// Save a named view, from explicit concert ids or from filters
    Save {
        /// Name of the view
        name: String,

        /// Concert ids to include, in order
        #[arg(num_args = 0..)]
        ids: Vec<String>,

        /// Save the concerts matching this search term instead
        #[arg(short, long)]
        search: Option<String>,

        /// Save the concerts matching this tag instead; repeatable
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },

    /// Delete a saved view
    #[command(alias = "rm")]
    Remove {
        /// Name of the view
        name: String,
    },

    /// Rename a saved view
    Rename {
        /// Current name
        old: String,

        /// New name
        new: String,
    },

    /// List the available boolean tags
    Tags,
}
