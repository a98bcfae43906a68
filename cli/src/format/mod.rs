use crate::output::colorize::Render;
use linknova::error::Result;
use serde::Serialize;
use serde_json::{Map, Value};

pub mod json;
pub mod toml;
pub mod yaml;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Toml,
    Plain,
    Colored,
}

impl OutputFormat {
    pub fn from_string(format: &str) -> Self {
        match format.trim().to_ascii_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "yaml" | "yml" => OutputFormat::Yaml,
            "toml" => OutputFormat::Toml,
            "plain" | "text" => OutputFormat::Plain,
            _ => OutputFormat::Colored,
        }
    }

    /// Whether this format is meant for scripts rather than people
    pub fn is_structured(self) -> bool {
        matches!(self, Self::Json | Self::Yaml | Self::Toml)
    }

    pub fn render_records<T: Serialize + Render>(self, records: &[T], no_color: bool) -> Result<String> {
        match self {
            OutputFormat::Json => json::to_json(records),
            OutputFormat::Yaml => yaml::to_yaml(records),
            OutputFormat::Toml => toml::to_toml_list(T::COLLECTION, records),
            OutputFormat::Plain | OutputFormat::Colored => {
                let color = self == OutputFormat::Colored && !no_color;
                let blocks: Vec<String> = records.iter().map(|r| r.render(color)).collect();
                Ok(blocks.join("\n"))
            }
        }
    }

    pub fn render_record<T: Serialize + Render>(self, record: &T, no_color: bool) -> Result<String> {
        match self {
            OutputFormat::Json => json::to_json(record),
            OutputFormat::Yaml => yaml::to_yaml(record),
            OutputFormat::Toml => toml::to_toml(record),
            OutputFormat::Plain | OutputFormat::Colored => {
                Ok(record.render(self == OutputFormat::Colored && !no_color))
            }
        }
    }

    /// Free-form key/value data such as server stats
    pub fn render_map(self, map: &Map<String, Value>) -> Result<String> {
        match self {
            OutputFormat::Json => json::to_json(map),
            OutputFormat::Yaml => yaml::to_yaml(map),
            OutputFormat::Toml => toml::to_toml(map),
            OutputFormat::Plain | OutputFormat::Colored => {
                let width = map.keys().map(|k| k.chars().count()).max().unwrap_or(0);
                let lines: Vec<String> = map
                    .iter()
                    .map(|(key, value)| {
                        let value = match value {
                            Value::String(s) => s.clone(),
                            other => other.to_string(),
                        };
                        format!("{:<width$}  {}", key, value)
                    })
                    .collect();
                Ok(lines.join("\n"))
            }
        }
    }

    pub fn print_records<T: Serialize + Render>(self, records: &[T], no_color: bool) -> Result<()> {
        let out = self.render_records(records, no_color)?;
        print_output(&out);
        Ok(())
    }

    pub fn print_record<T: Serialize + Render>(self, record: &T, no_color: bool) -> Result<()> {
        let out = self.render_record(record, no_color)?;
        print_output(&out);
        Ok(())
    }

    pub fn print_map(self, map: &Map<String, Value>) -> Result<()> {
        let out = self.render_map(map)?;
        print_output(&out);
        Ok(())
    }
}

fn print_output(out: &str) {
    // renderers differ on trailing newlines
    println!("{}", out.trim_end_matches('\n'));
}

#[cfg(test)]
mod tests {
    use super::*;
    use linknova::models::{Bookmark, Topic};
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("json", OutputFormat::Json)]
    #[case("YAML", OutputFormat::Yaml)]
    #[case("yml", OutputFormat::Yaml)]
    #[case("toml", OutputFormat::Toml)]
    #[case("plain", OutputFormat::Plain)]
    #[case("anything", OutputFormat::Colored)]
    fn test_from_string(#[case] input: &str, #[case] expected: OutputFormat) {
        assert_eq!(OutputFormat::from_string(input), expected);
    }

    #[test]
    fn test_plain_records_are_separated() {
        let bookmarks = vec![Bookmark::new(1, "https://a.com"), Bookmark::new(2, "https://b.com")];
        let out = OutputFormat::Plain.render_records(&bookmarks, false).unwrap();
        assert!(out.contains("1. https://a.com"));
        assert!(out.contains("\n\n2. https://b.com"));
        assert!(!out.contains('\u{1b}'));
    }

    #[test]
    fn test_colored_respects_no_color() {
        let topics = vec![Topic::new("rust")];
        let out = OutputFormat::Colored.render_records(&topics, true).unwrap();
        assert!(!out.contains('\u{1b}'));
    }

    #[test]
    fn test_toml_list_uses_collection_key() {
        let topics = vec![Topic::new("rust"), Topic::new("go")];
        let out = OutputFormat::Toml.render_records(&topics, false).unwrap();
        assert_eq!(out.matches("[[topics]]").count(), 2);
    }

    #[test]
    fn test_plain_map_is_aligned() {
        let value = json!({"topics": 4, "bookmarks": 230, "owner": "ana"});
        let map = value.as_object().unwrap();
        let out = OutputFormat::Plain.render_map(map).unwrap();
        assert!(out.contains("topics     4"));
        assert!(out.contains("bookmarks  230"));
        assert!(out.contains("owner      ana"));
    }

    #[test]
    fn test_structured() {
        assert!(OutputFormat::Json.is_structured());
        assert!(!OutputFormat::Plain.is_structured());
    }
}
