use linknova::error::Result;
use serde::Serialize;

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use linknova::models::Bookmark;

    #[test]
    fn test_bookmark_list_is_an_array() {
        let bookmarks = vec![Bookmark::new(1, "https://a.com"), Bookmark::new(2, "https://b.com")];
        let out = to_json(&bookmarks).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed.as_array().map(Vec::len), Some(2));
        assert_eq!(parsed[1]["url"], "https://b.com");
    }
}
