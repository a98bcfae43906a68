use crate::api::UrlMetadata;
use crate::error::{LinkNovaError, Result};
use reqwest::blocking::Client;
use std::time::Duration;
use tl::ParserOptions;

/// Fetch a page directly and scrape its title and description
///
/// Used when the server's `utils/metadata` endpoint is unavailable.
pub fn fetch_metadata(url: &str, user_agent: &str, timeout_secs: u64) -> Result<UrlMetadata> {
    let client = Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(timeout_secs.max(1)))
        .build()
        .map_err(|e| LinkNovaError::Config(format!("Failed to build HTTP client: {}", e)))?;
    let resp = client.get(url).send()?;

    let status = resp.status();
    if !status.is_success() {
        let error_msg = match status.as_u16() {
            401 | 403 => "The website refused the request",
            404 => "The URL does not exist",
            429 => "Rate limited by the website",
            500..=599 => "The website is experiencing issues",
            _ => "Request failed with non-success status",
        };
        return Err(LinkNovaError::api(status.as_u16(), error_msg));
    }

    let final_url = resp.url().to_string();
    let body = resp.text()?;

    let mut meta = parse_html(&body)?;
    meta.url = final_url;
    Ok(meta)
}

/// Parse HTML content and extract title and meta description
pub fn parse_html(html: &str) -> Result<UrlMetadata> {
    let dom = tl::parse(html, ParserOptions::default())?;
    let parser = dom.parser();

    let title = dom
        .query_selector("title")
        .and_then(|mut iter| iter.next())
        .and_then(|handle| handle.get(parser))
        .map(|node| node.inner_text(parser).trim().to_string())
        .filter(|t| !t.is_empty());

    let description = extract_meta_content(&dom, parser, "description")
        .or_else(|| extract_meta_property(&dom, parser, "og:description"));

    Ok(UrlMetadata {
        url: String::new(),
        title,
        description,
    })
}

fn extract_meta_content(dom: &tl::VDom, parser: &tl::Parser, name: &str) -> Option<String> {
    meta_attr(dom, parser, &format!("meta[name='{}']", name))
}

fn extract_meta_property(dom: &tl::VDom, parser: &tl::Parser, property: &str) -> Option<String> {
    meta_attr(dom, parser, &format!("meta[property='{}']", property))
}

fn meta_attr(dom: &tl::VDom, parser: &tl::Parser, selector: &str) -> Option<String> {
    dom.query_selector(selector)
        .and_then(|mut iter| iter.next())
        .and_then(|handle| handle.get(parser))
        .and_then(|node| node.as_tag())
        .and_then(|tag| {
            tag.attributes()
                .get("content")
                .flatten()
                .map(|v| v.as_utf8_str().trim().to_string())
        })
        .filter(|v| !v.is_empty())
}
