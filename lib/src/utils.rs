use chrono::{DateTime, Utc};
use reqwest::Url;
use std::path::PathBuf;

pub fn get_config_dir() -> PathBuf {
    if let Ok(path) = std::env::var("LINKNOVA_CONFIG_DIR") {
        return PathBuf::from(path);
    }

    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(path).join("linknova");
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".config/linknova");
    }

    #[cfg(target_os = "windows")]
    if let Ok(appdata) = std::env::var("APPDATA") {
        return PathBuf::from(appdata).join("linknova");
    }

    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Host part of a URL, empty when the URL doesn't parse
pub fn extract_domain(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_string()))
        .unwrap_or_default()
}

/// Only absolute http(s) URLs are accepted as bookmarks
pub fn is_valid_url(url: &str) -> bool {
    match Url::parse(url) {
        Ok(u) => matches!(u.scheme(), "http" | "https") && u.host_str().is_some(),
        Err(_) => false,
    }
}

/// Cut `text` to `max_chars` characters and append `...` if anything was dropped
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars).collect();
    format!("{}...", kept)
}

/// Human readable age of a timestamp relative to `now`
pub fn format_relative_time(time: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - time).num_seconds();
    if secs < 60 {
        return "just now".to_string();
    }

    let (value, unit) = match secs {
        s if s < 3_600 => (s / 60, "minute"),
        s if s < 86_400 => (s / 3_600, "hour"),
        s if s < 2_592_000 => (s / 86_400, "day"),
        s if s < 31_536_000 => (s / 2_592_000, "month"),
        s => (s / 31_536_000, "year"),
    };

    if value == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", value, unit)
    }
}
