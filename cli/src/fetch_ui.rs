use indicatif::{ProgressBar, ProgressStyle};
use linknova::api::UrlMetadata;
use linknova::config::Config;
use linknova::error::Result;
use linknova::{fetch, ApiClient};
use std::time::Duration;

fn spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Run a request behind a spinner that disappears once it is done
pub fn with_spinner<T, F>(message: &str, f: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    let spinner = spinner(message.to_string());
    let result = f();
    spinner.finish_and_clear();
    result
}

/// Ask the server for page metadata, then fall back to fetching the page here
pub fn lookup_metadata(client: &ApiClient, config: &Config, url: &str) -> Result<UrlMetadata> {
    let url_display = truncate_url(url, 60);
    let spinner = spinner(format!("Fetching: {}", url_display));

    let result = client.metadata(url).or_else(|e| {
        log::warn!("Server metadata lookup failed ({}), fetching page directly", e);
        fetch::fetch_metadata(url, &config.user_agent, config.timeout_secs)
    });

    match &result {
        Ok(_) => spinner.finish_with_message(format!("✓ {}", url_display)),
        Err(e) => spinner.finish_with_message(format!("✗ {} ({})", url_display, e.category())),
    }

    result
}

/// Fetch page metadata locally only
pub fn fetch_local(config: &Config, url: &str) -> Result<UrlMetadata> {
    let url_display = truncate_url(url, 60);
    with_spinner(&format!("Fetching: {}", url_display), || {
        fetch::fetch_metadata(url, &config.user_agent, config.timeout_secs)
    })
}

/// Truncate URL to specified length with ellipsis
pub fn truncate_url(url: &str, max_len: usize) -> String {
    if url.chars().count() > max_len {
        let keep = max_len.saturating_sub(3); // Reserve 3 chars for "..."
        let head: String = url.chars().take(keep).collect();
        format!("{}...", head)
    } else {
        url.to_string()
    }
}
