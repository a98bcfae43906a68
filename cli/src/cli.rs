use crate::commands::{
    auth::{LoginCommand, LogoutCommand},
    bookmark::BookmarkCommand,
    category::CategoryCommand,
    misc::{HealthCommand, MetadataCommand, StatsCommand},
    topic::TopicCommand,
    CommandEnum,
};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

pub fn get_exe_name() -> &'static str {
    static EXE_NAME: OnceLock<String> = OnceLock::new();
    EXE_NAME.get_or_init(|| {
        std::env::args()
            .next()
            .as_ref()
            .map(std::path::Path::new)
            .and_then(|path| path.file_name())
            .and_then(|name| name.to_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| "lnova".to_string())
    })
}

#[derive(Parser)]
#[command(author, version, about, long_about = None, disable_version_flag = true)]
pub struct Cli {
    /// Show the program version and exit
    #[arg(short = 'v', long = "version")]
    pub version: bool,

    /// Optional custom configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Server address, overrides the configured base_url
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Output format: json, yaml, toml or plain
    #[arg(long, global = true)]
    pub format: Option<String>,

    /// Disable color output
    #[arg(long, global = true)]
    pub nc: bool,

    /// Show debug information
    #[arg(short = 'g', long = "debug", global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage topics
    Topic {
        #[command(subcommand)]
        action: TopicAction,
    },

    /// Manage categories
    #[command(alias = "cat")]
    Category {
        #[command(subcommand)]
        action: CategoryAction,
    },

    /// Manage bookmarks
    #[command(alias = "bm")]
    Bookmark {
        #[command(subcommand)]
        action: BookmarkAction,
    },

    /// Log in and remember the user id
    Login {
        /// Username (prompted when omitted)
        #[arg(short, long)]
        username: Option<String>,

        /// Ask the server for a long-lived session
        #[arg(long)]
        remember: bool,
    },

    /// Forget the saved user id
    Logout,

    /// Show server-side counters
    Stats,

    /// Show title and description for a URL
    Metadata {
        url: String,

        /// Fetch the page directly instead of asking the server
        #[arg(long)]
        local: bool,
    },

    /// Check that the server is up
    Health,
}

/// Filtering and ordering shared by topic and category listings
#[derive(Args, Debug, Clone, Default)]
pub struct GroupListArgs {
    /// Only show entries matching this text
    #[arg(short, long)]
    pub query: Option<String>,

    /// Sort by name, priority, created_on or updated_on
    #[arg(long)]
    pub sort: Option<String>,

    /// asc or desc
    #[arg(long)]
    pub order: Option<String>,

    /// Show at most N entries
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

/// Editable fields shared by topics and categories
#[derive(Args, Debug, Clone, Default)]
pub struct GroupFields {
    /// Human readable name
    #[arg(long)]
    pub display_name: Option<String>,

    /// Short description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Longer free text
    #[arg(long)]
    pub about: Option<String>,

    /// Ordering weight
    #[arg(short, long, allow_negative_numbers = true)]
    pub priority: Option<i32>,

    /// Make it visible to everyone
    #[arg(long, conflicts_with = "private")]
    pub public: bool,

    /// Make it visible to the owner only
    #[arg(long)]
    pub private: bool,
}

impl GroupFields {
    /// `Some` only when one of --public/--private was given
    pub fn visibility(&self) -> Option<bool> {
        if self.public {
            Some(true)
        } else if self.private {
            Some(false)
        } else {
            None
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum TopicAction {
    /// List topics
    #[command(alias = "ls")]
    List(GroupListArgs),

    /// Show one topic
    Show { name: String },

    /// Create a topic
    Create {
        name: String,
        #[command(flatten)]
        fields: GroupFields,
    },

    /// Change a topic's fields
    Update {
        name: String,
        #[command(flatten)]
        fields: GroupFields,
    },

    /// Delete a topic
    #[command(alias = "rm")]
    Delete {
        name: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Add (+cat) or remove (-cat) categories
    Cats {
        name: String,
        #[arg(allow_hyphen_values = true, num_args = 1.., required = true)]
        ops: Vec<String>,
    },

    /// Edit categories interactively
    EditCats { name: String },
}

#[derive(Subcommand, Debug, Clone)]
pub enum CategoryAction {
    /// List categories
    #[command(alias = "ls")]
    List(GroupListArgs),

    /// Show one category
    Show { name: String },

    /// Create a category
    Create {
        name: String,
        #[command(flatten)]
        fields: GroupFields,
    },

    /// Change a category's fields
    Update {
        name: String,
        #[command(flatten)]
        fields: GroupFields,
    },

    /// Delete a category
    #[command(alias = "rm")]
    Delete {
        name: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Search categories by name or description
    Search { query: String },

    /// List topics containing a category
    Topics { name: String },
}

#[derive(Subcommand, Debug, Clone)]
pub enum BookmarkAction {
    /// List bookmarks
    #[command(alias = "ls")]
    List {
        /// Only show bookmarks matching this text
        #[arg(short, long)]
        query: Option<String>,

        /// Only bookmarks in this category
        #[arg(short, long)]
        category: Option<String>,

        /// Only bookmarks in one of this topic's categories
        #[arg(short, long)]
        topic: Option<String>,

        /// unread, read or archived
        #[arg(short, long)]
        status: Option<String>,

        /// Sort by title, url, created_on, updated_on or status
        #[arg(long)]
        sort: Option<String>,

        /// asc or desc
        #[arg(long)]
        order: Option<String>,

        /// Show at most N entries
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Show one bookmark
    Show { id: i64 },

    /// Add a bookmark
    Add {
        url: String,

        #[arg(long)]
        title: Option<String>,

        /// Notes or description
        #[arg(long)]
        content: Option<String>,

        #[arg(long)]
        referrer: Option<String>,

        /// unread, read or archived
        #[arg(short, long)]
        status: Option<String>,

        /// Comma-separated categories
        #[arg(short, long = "category")]
        categories: Vec<String>,

        /// Add without looking up the page title
        #[arg(long)]
        offline: bool,
    },

    /// Change a bookmark's fields
    Update {
        id: i64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        content: Option<String>,

        #[arg(long)]
        referrer: Option<String>,

        #[arg(short, long)]
        status: Option<String>,
    },

    /// Delete a bookmark
    #[command(alias = "rm")]
    Delete {
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Add (+cat) or remove (-cat) categories
    Cats {
        id: i64,
        #[arg(allow_hyphen_values = true, num_args = 1.., required = true)]
        ops: Vec<String>,
    },

    /// Edit categories interactively
    EditCats { id: i64 },

    /// Open a bookmark in the browser
    Open { id: i64 },
}

impl Commands {
    pub fn into_command(self) -> CommandEnum {
        match self {
            Commands::Topic { action } => CommandEnum::Topic(TopicCommand { action }),
            Commands::Category { action } => CommandEnum::Category(CategoryCommand { action }),
            Commands::Bookmark { action } => CommandEnum::Bookmark(BookmarkCommand { action }),
            Commands::Login { username, remember } => {
                CommandEnum::Login(LoginCommand { username, remember })
            }
            Commands::Logout => CommandEnum::Logout(LogoutCommand),
            Commands::Stats => CommandEnum::Stats(StatsCommand),
            Commands::Metadata { url, local } => {
                CommandEnum::Metadata(MetadataCommand { url, local })
            }
            Commands::Health => CommandEnum::Health(HealthCommand),
        }
    }
}
