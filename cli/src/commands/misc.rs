use super::{AppContext, LinkNovaCommand};
use crate::fetch_ui::{fetch_local, lookup_metadata, with_spinner};
use linknova::error::{LinkNovaError, Result};
use linknova::utils::is_valid_url;

pub struct StatsCommand;

pub struct MetadataCommand {
    pub url: String,
    pub local: bool,
}

pub struct HealthCommand;

impl LinkNovaCommand for StatsCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let stats = with_spinner("Loading stats", || ctx.client.stats())?;
        if stats.is_empty() && !ctx.format.is_structured() {
            ctx.notifier().info("The server reported no stats");
            return Ok(());
        }
        ctx.format.print_map(&stats)
    }
}

impl LinkNovaCommand for MetadataCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let url = self.url.trim();
        if !is_valid_url(url) {
            return Err(LinkNovaError::InvalidInput(format!(
                "'{}' is not an http(s) URL",
                url
            )));
        }

        let meta = if self.local {
            fetch_local(ctx.config, url)?
        } else {
            lookup_metadata(ctx.client, ctx.config, url)?
        };

        if ctx.format.is_structured() {
            if let serde_json::Value::Object(mut map) = serde_json::to_value(&meta)? {
                // TOML has no null
                map.retain(|_, v| !v.is_null());
                return ctx.format.print_map(&map);
            }
        }

        println!("URL:         {}", meta.url);
        println!("Title:       {}", meta.title.as_deref().unwrap_or("-"));
        println!("Description: {}", meta.description.as_deref().unwrap_or("-"));
        Ok(())
    }
}

impl LinkNovaCommand for HealthCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let body = with_spinner("Checking server", || ctx.client.health())?;
        let body = body.trim();
        if body.is_empty() {
            ctx.notifier().success(format!("{} is up", ctx.config.base_url));
        } else {
            ctx.notifier()
                .success(format!("{} is up: {}", ctx.config.base_url, body));
        }
        Ok(())
    }
}
