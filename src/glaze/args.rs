use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "glaze")]
#[command(about = "Browse, filter and preview a pottery portfolio", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory of <slug>.json piece files (overrides config)
    #[arg(long, global = true, value_name = "DIR")]
    pub catalog: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Gallery selections shared by `list` and `query encode`.
#[derive(Args, Debug, Clone, Default)]
pub struct StateArgs {
    /// Technique tag to require (repeatable)
    #[arg(short = 't', long = "technique", value_name = "TAG")]
    pub techniques: Vec<String>,

    /// Color tag to require (repeatable)
    #[arg(short = 'c', long = "color", value_name = "TAG")]
    pub colors: Vec<String>,

    /// Only featured pieces
    #[arg(short, long)]
    pub featured: bool,

    /// date-desc, date-asc, title-asc, title-desc or featured
    #[arg(short, long, value_name = "KEY")]
    pub sort: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List pieces, optionally filtered by a gallery query string
    #[command(alias = "ls")]
    List {
        /// Query string as it appears in a gallery URL
        query: Option<String>,

        #[command(flatten)]
        state: StateArgs,
    },

    /// Show every technique and color tag in the catalog
    Tags,

    /// Show one piece and its images
    Show {
        /// Piece slug (file name without .json)
        slug: String,
    },

    /// Encode or decode gallery query strings
    Query {
        #[command(subcommand)]
        action: QueryCommands,
    },

    /// Get, set or toggle the light/dark theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeCommands>,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (catalog-dir, default-sort, stagger-ms)
        key: Option<String>,

        /// Value to set
        value: Option<String>,
    },

    /// Render a page preview as HTML
    Render {
        /// Gallery query string
        query: Option<String>,

        /// Render this piece's page instead of the gallery
        #[arg(long, value_name = "SLUG")]
        piece: Option<String>,

        /// Open the lightbox at this image index
        #[arg(long, value_name = "INDEX", requires = "piece")]
        open: Option<usize>,
    },
}

#[derive(Subcommand, Debug)]
pub enum QueryCommands {
    /// Build a query string from selections
    Encode {
        #[command(flatten)]
        state: StateArgs,
    },
    /// Parse a query string and print its normalized form
    Decode {
        query: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ThemeCommands {
    /// Print the stored theme
    Get,
    /// Store a theme (light or dark)
    Set { theme: String },
    /// Switch between light and dark
    Toggle,
}
