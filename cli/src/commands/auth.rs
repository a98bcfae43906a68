use super::{AppContext, LinkNovaCommand};
use crate::fetch_ui::with_spinner;
use linknova::api::Credentials;
use linknova::config::Config;
use linknova::error::{LinkNovaError, Result};
use std::io::{self, Write};
use std::path::Path;

pub struct LoginCommand {
    pub username: Option<String>,
    pub remember: bool,
}

pub struct LogoutCommand;

/// Rewrite the saved user id without touching other settings in the file
///
/// Environment overrides are not written back.
fn save_user_id(path: &Path, user_id: Option<String>) -> Result<()> {
    let mut config = if path.exists() {
        Config::load_from_path(path)?
    } else {
        Config::default()
    };
    config.user_id = user_id;
    config.save_to_path(path)
}

fn prompt_username() -> Result<String> {
    eprint!("Username: ");
    io::stderr().flush()?;
    let mut username = String::new();
    io::stdin().read_line(&mut username)?;
    Ok(username.trim().to_string())
}

impl LinkNovaCommand for LoginCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let notifier = ctx.notifier();

        let username = match &self.username {
            Some(username) => username.clone(),
            None => prompt_username()?,
        };
        let password = rpassword::prompt_password("Password: ")?;

        let mut credentials = Credentials::new(username, password);
        credentials.remember_me = self.remember;

        let problems = credentials.validate();
        if !problems.is_empty() {
            for problem in &problems {
                notifier.warning(format!("{}: {}", problem.field, problem.message));
            }
            return Err(LinkNovaError::InvalidInput(
                "Login details are incomplete".to_string(),
            ));
        }

        let user_id = with_spinner("Logging in", || ctx.client.auth().login(&credentials))?;
        save_user_id(ctx.config_path, Some(user_id.clone()))?;
        log::debug!("Saved user id to {:?}", ctx.config_path);
        notifier.success(format!("Logged in as {}", user_id));
        Ok(())
    }
}

impl LinkNovaCommand for LogoutCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let notifier = ctx.notifier();
        if ctx.config.user_id.is_none() {
            notifier.info("Not logged in");
            return Ok(());
        }
        save_user_id(ctx.config_path, None)?;
        notifier.success("Logged out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_user_id_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.yml");

        save_user_id(&path, Some("ana".to_string())).unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.user_id.as_deref(), Some("ana"));
        assert_eq!(config.base_url, Config::default().base_url);
    }

    #[test]
    fn test_save_user_id_keeps_other_settings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yml");
        std::fs::write(
            &path,
            "base_url: https://links.example.com\nuser_id: ana\nsecrets: s3cret\n",
        )
        .unwrap();

        save_user_id(&path, None).unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert!(config.user_id.is_none());
        assert_eq!(config.base_url, "https://links.example.com");
        assert_eq!(config.secrets.as_deref(), Some("s3cret"));
    }
}
