use crate::format::OutputFormat;
use crate::output::notify::Notifier;
use linknova::config::Config;
use linknova::error::Result;
use linknova::ApiClient;
use std::path::Path;

pub struct AppContext<'a> {
    pub client: &'a ApiClient,
    pub config: &'a Config,
    pub config_path: &'a Path,
    pub format: OutputFormat,
    pub no_color: bool,
}

impl AppContext<'_> {
    pub fn notifier(&self) -> Notifier {
        Notifier::new(!self.no_color)
    }
}

pub mod auth;
pub mod bookmark;
pub mod category;
pub mod helpers;
pub mod misc;
pub mod topic;

pub trait LinkNovaCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()>;
}

/// Enum-based dispatch for commands (avoids Box<dyn LinkNovaCommand>)
pub enum CommandEnum {
    Topic(topic::TopicCommand),
    Category(category::CategoryCommand),
    Bookmark(bookmark::BookmarkCommand),
    Login(auth::LoginCommand),
    Logout(auth::LogoutCommand),
    Stats(misc::StatsCommand),
    Metadata(misc::MetadataCommand),
    Health(misc::HealthCommand),
}

impl CommandEnum {
    pub fn execute(&self, ctx: &AppContext) -> Result<()> {
        match self {
            Self::Topic(cmd) => cmd.execute(ctx),
            Self::Category(cmd) => cmd.execute(ctx),
            Self::Bookmark(cmd) => cmd.execute(ctx),
            Self::Login(cmd) => cmd.execute(ctx),
            Self::Logout(cmd) => cmd.execute(ctx),
            Self::Stats(cmd) => cmd.execute(ctx),
            Self::Metadata(cmd) => cmd.execute(ctx),
            Self::Health(cmd) => cmd.execute(ctx),
        }
    }
}
