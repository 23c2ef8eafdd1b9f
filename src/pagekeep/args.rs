use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pagekeep")]
#[command(about = "Hierarchical pages with a local-first content API", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the page data (defaults to the platform data dir)
    #[arg(long, global = true, env = "PAGEKEEP_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List pages
    #[command(alias = "ls")]
    List {
        /// Only pages carrying this tag
        #[arg(short, long)]
        tag: Option<String>,

        /// Only favorite pages
        #[arg(short, long)]
        favorites: bool,
    },

    /// Show the page hierarchy
    Tree,

    /// Show a page (the current page if none is given)
    #[command(alias = "v")]
    Show {
        /// Page id or title
        page: Option<String>,
    },

    /// Create a new page
    #[command(alias = "n")]
    Create {
        title: String,

        /// Emoji or short icon shown before the title
        #[arg(short, long)]
        icon: Option<String>,

        /// Parent page id or title
        #[arg(short, long)]
        parent: Option<String>,

        /// Template to start from (see `pagekeep templates`)
        #[arg(long)]
        template: Option<String>,

        /// Tag to attach, may be repeated
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Rename a page
    Rename { page: String, title: String },

    /// Set or remove a page icon
    Icon {
        page: String,

        /// New icon; omit to remove the icon
        icon: Option<String>,
    },

    /// Move a page under another page
    Move {
        page: String,

        /// New parent id or title
        #[arg(required_unless_present = "root", conflicts_with = "root")]
        parent: Option<String>,

        /// Move to the top level
        #[arg(long)]
        root: bool,
    },

    /// Replace a page's tags (no tags clears them)
    Tag { page: String, tags: Vec<String> },

    /// Delete one or more pages
    #[command(alias = "rm")]
    Delete {
        #[arg(required = true, num_args = 1..)]
        pages: Vec<String>,
    },

    /// Select the current page
    Select {
        /// Page id or title
        #[arg(required_unless_present = "clear", conflicts_with = "clear")]
        page: Option<String>,

        /// Clear the selection
        #[arg(long)]
        clear: bool,
    },

    /// Toggle a page's favorite flag
    #[command(alias = "fav")]
    Favorite { page: String },

    /// List favorite pages
    Favorites,

    /// Search page titles and tags
    Search { term: String },

    /// Recently visited pages
    Recent,

    /// List page templates
    Templates,

    /// Show, open or close the sidebar
    Sidebar {
        #[arg(value_enum)]
        state: Option<SidebarState>,
    },

    /// Print a page as markdown, HTML or JSON
    Export {
        page: String,

        #[arg(short, long, value_enum, default_value_t = ExportKind::Markdown)]
        format: ExportKind,
    },

    /// Replace a page's content with plain text, saved through the editor bridge
    Write {
        /// Page id or title
        page: String,

        /// Read the text from this file instead of stdin
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (debounce_ms, server_addr, remote_url)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Run the HTTP content API
    Serve {
        /// Listen address, overrides `server_addr` from the config
        #[arg(long)]
        addr: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SidebarState {
    Open,
    Closed,
    Toggle,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportKind {
    Markdown,
    Html,
    Json,
}
