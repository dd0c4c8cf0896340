//! `[taxonomies]` section: singular name -> plural name.
//!
//! ```toml
//! [taxonomies]
//! tag = "tags"
//! category = "categories"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxonomiesConfig(BTreeMap<String, String>);

/// One configured taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewName {
    pub singular: String,
    pub plural: String,
}

impl Default for TaxonomiesConfig {
    fn default() -> Self {
        Self(BTreeMap::from([
            ("tag".to_string(), "tags".to_string()),
            ("category".to_string(), "categories".to_string()),
        ]))
    }
}

impl TaxonomiesConfig {
    pub fn new(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        Self(entries.into_iter().collect())
    }

    /// Configured taxonomies, sorted by plural name.
    pub fn values(&self) -> Vec<ViewName> {
        let mut views: Vec<_> = self
            .0
            .iter()
            .map(|(singular, plural)| ViewName {
                singular: singular.clone(),
                plural: plural.clone(),
            })
            .collect();
        views.sort_by(|a, b| a.plural.cmp(&b.plural));
        views
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn singular_to_plural(&self) -> &BTreeMap<String, String> {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_sorted_by_plural() {
        let config = TaxonomiesConfig::new([
            ("tag".into(), "tags".into()),
            ("series".into(), "a-series".into()),
            ("category".into(), "categories".into()),
        ]);
        let plurals: Vec<_> = config.values().into_iter().map(|v| v.plural).collect();
        assert_eq!(plurals, vec!["a-series", "categories", "tags"]);
    }

    #[test]
    fn test_parse_transparent() {
        let config: TaxonomiesConfig = toml::from_str(r#"author = "authors""#).unwrap();
        assert_eq!(config.values()[0].singular, "author");
        assert_eq!(config.values().len(), 1);
    }
}
