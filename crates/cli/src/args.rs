//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// verse-rank: rank poetry feeds and canonicalize tags
#[derive(Parser, Debug)]
#[command(name = "verse-rank")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rank a feed snapshot
    Rank(RankArgs),

    /// Tag utilities
    Tags(TagsArgs),

    /// Configuration management
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
pub struct RankArgs {
    /// Feed snapshot file (use - for stdin); defaults to general.feed_path
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Ordering strategy (hot, new, top, rising); unknown values rank as hot
    #[arg(long)]
    pub strategy: Option<String>,

    /// Only include items carrying this tag
    #[arg(long)]
    pub tag: Option<String>,

    /// Maximum number of items to show
    #[arg(long)]
    pub limit: Option<usize>,

    /// Rank as of this RFC 3339 instant instead of the current time
    #[arg(long)]
    pub now: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Show the score breakdown for each item
    #[arg(long)]
    pub explain: bool,
}

#[derive(Args, Debug)]
pub struct TagsArgs {
    #[command(subcommand)]
    pub command: TagsCommands,
}

#[derive(Subcommand, Debug)]
pub enum TagsCommands {
    /// Print the canonical form of each tag
    Normalize {
        #[arg(required = true)]
        tags: Vec<String>,
    },

    /// Split free text into a deduplicated canonical tag list
    Parse {
        input: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Encode a tag as a URL slug (the tag is normalized first)
    Slug { tag: String },

    /// Decode a URL slug back into a tag
    Unslug { slug: String },

    /// Add a tag to a comma-separated tag list
    Add {
        /// Existing tags
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,

        tag: String,
    },

    /// Remove a tag from a comma-separated tag list
    Remove {
        /// Existing tags
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,

        tag: String,
    },

    /// Count tags across a feed snapshot
    Popular {
        /// Feed snapshot file (use - for stdin); defaults to general.feed_path
        #[arg(long)]
        input: Option<PathBuf>,

        /// Maximum number of tags to show
        #[arg(long)]
        limit: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Init {
        /// Path to write config file
        #[arg(long, default_value = "./config.toml")]
        path: PathBuf,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}
