//! Page front matter as seen by the build core.

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::config::MenuEntryConfig;
use crate::utils::date::DateTimeUtc;

/// Front matter fields the core reads. Everything else lands in `extra`
/// (taxonomy terms included).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PageMeta {
    pub title: Option<String>,
    pub link_title: Option<String>,
    pub weight: i32,
    pub date: Option<DateTimeUtc>,
    pub publish_date: Option<DateTimeUtc>,
    pub expiry_date: Option<DateTimeUtc>,
    pub draft: bool,
    /// Headless pages are never rendered and never contribute menu entries.
    pub headless: bool,
    #[serde(alias = "menu")]
    pub menus: Option<PageMenus>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl PageMeta {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    /// `link_title`, falling back to `title`.
    pub fn link_title(&self) -> &str {
        self.link_title
            .as_deref()
            .or(self.title.as_deref())
            .unwrap_or("")
    }

    /// `publish_date`, falling back to `date`.
    pub fn publish_date(&self) -> Option<DateTimeUtc> {
        self.publish_date.or(self.date)
    }

    /// Date used for ordering: `date`, falling back to `publish_date`.
    pub fn sort_date(&self) -> Option<DateTimeUtc> {
        self.date.or(self.publish_date)
    }

    /// Raw terms for a taxonomy (`tags = ["a", "b"]` or `tags = "a"`).
    pub fn terms(&self, plural: &str) -> Vec<String> {
        match self.extra.get(plural) {
            Some(Value::String(term)) => vec![term.clone()],
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// The `menus` front matter field, in any of its shapes:
///
/// ```toml
/// menus = "main"
/// menus = ["main", "footer"]
/// [menus.main]
/// parent = "docs"
/// weight = 3
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PageMenus {
    Name(String),
    Names(Vec<String>),
    Entries(BTreeMap<String, MenuEntryConfig>),
}

impl PageMenus {
    /// `(menu name, entry config)` pairs, sorted by menu name.
    pub fn entries(&self) -> Vec<(String, MenuEntryConfig)> {
        match self {
            Self::Name(name) => vec![(name.clone(), MenuEntryConfig::default())],
            Self::Names(names) => {
                let mut names = names.clone();
                names.sort();
                names.dedup();
                names
                    .into_iter()
                    .map(|name| (name, MenuEntryConfig::default()))
                    .collect()
            }
            Self::Entries(map) => map
                .iter()
                .map(|(name, cfg)| (name.clone(), cfg.clone()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_front_matter() {
        let meta: PageMeta = toml::from_str(
            r#"
            title = "Hello"
            date = "2024-06-15"
            weight = 5
            draft = true
            tags = ["Rust", "SSG"]
            series = "intro"
            "#,
        )
        .unwrap();
        assert_eq!(meta.link_title(), "Hello");
        assert_eq!(meta.publish_date(), Some(DateTimeUtc::from_ymd(2024, 6, 15)));
        assert_eq!(meta.weight, 5);
        assert!(meta.draft);
        assert_eq!(meta.terms("tags"), vec!["Rust", "SSG"]);
        assert_eq!(meta.terms("series"), vec!["intro"]);
        assert!(meta.terms("categories").is_empty());
    }

    #[test]
    fn test_front_matter_datetimes_normalize_to_utc() {
        let meta: PageMeta = toml::from_str(
            r#"
            date = 2024-06-15T10:00:00+02:00
            publish_date = 2024-06-15T10:00:00
            expiry_date = "2025-01-01T00:30:00.250+01:00"
            "#,
        )
        .unwrap();
        assert_eq!(meta.date, Some(DateTimeUtc::new(2024, 6, 15, 8, 0, 0)));
        assert_eq!(meta.publish_date, Some(DateTimeUtc::new(2024, 6, 15, 10, 0, 0)));
        assert_eq!(meta.expiry_date, Some(DateTimeUtc::new(2024, 12, 31, 23, 30, 0)));
        assert_eq!(meta.publish_date(), meta.date);
    }

    #[test]
    fn test_link_title_preferred() {
        let meta = PageMeta {
            title: Some("A long title".into()),
            link_title: Some("Short".into()),
            ..Default::default()
        };
        assert_eq!(meta.link_title(), "Short");
        assert_eq!(meta.title(), "A long title");
    }

    #[test]
    fn test_menus_shapes() {
        let single: PageMeta = toml::from_str(r#"menu = "main""#).unwrap();
        assert_eq!(single.menus.unwrap().entries()[0].0, "main");

        let list: PageMeta = toml::from_str(r#"menus = ["main", "footer", "main"]"#).unwrap();
        let names: Vec<_> = list.menus.unwrap().entries().into_iter().map(|e| e.0).collect();
        assert_eq!(names, vec!["footer", "main"]);

        let map: PageMeta = toml::from_str(
            r#"
            [menus.main]
            parent = "docs"
            weight = 3
            "#,
        )
        .unwrap();
        let entries = map.menus.unwrap().entries();
        assert_eq!(entries[0].1.parent.as_deref(), Some("docs"));
        assert_eq!(entries[0].1.weight, 3);
    }
}
