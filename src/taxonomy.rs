//! Taxonomy assembly: pages grouped by the terms in their front matter.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::config::TaxonomiesConfig;
use crate::content::ContentTree;
use crate::utils::slug::slugify;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaxonomyError {
    #[error("{page}: {taxonomy} term {term:?} has no usable characters")]
    EmptyTerm {
        page: String,
        taxonomy: String,
        term: String,
    },
}

/// Pages sharing one term.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Term {
    /// The term as first written in front matter.
    pub name: String,
    /// Page keys in default page order.
    pub pages: Vec<String>,
}

/// Term key -> term, for one taxonomy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Taxonomy(BTreeMap<String, Term>);

impl Taxonomy {
    pub fn get(&self, key: &str) -> Option<&Term> {
        self.0.get(key)
    }

    /// Terms in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Term)> {
        self.0.iter().map(|(key, term)| (key.as_str(), term))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Terms by page count, largest first; ties by key.
    pub fn by_count(&self) -> Vec<(&str, &Term)> {
        let mut terms: Vec<_> = self.iter().collect();
        terms.sort_by(|a, b| b.1.pages.len().cmp(&a.1.pages.len()).then(a.0.cmp(b.0)));
        terms
    }
}

/// Plural taxonomy name -> taxonomy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxonomyList(BTreeMap<String, Taxonomy>);

impl TaxonomyList {
    pub fn get(&self, plural: &str) -> Option<&Taxonomy> {
        self.0.get(plural)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Taxonomy)> {
        self.0.iter().map(|(plural, taxonomy)| (plural.as_str(), taxonomy))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Group the tree's regular pages under every configured taxonomy.
///
/// Every configured taxonomy is present in the result, even without terms.
/// Terms are keyed by their slug, so `Rust` and `rust` are one term; a term
/// whose slug is empty fails the whole assembly.
pub fn assemble_taxonomies(
    tree: &ContentTree,
    config: &TaxonomiesConfig,
) -> Result<TaxonomyList, TaxonomyError> {
    let pages = tree.regular_pages();
    let mut list = BTreeMap::new();

    for view in config.values() {
        let mut taxonomy = Taxonomy::default();
        for page in &pages {
            for raw in page.meta().terms(&view.plural) {
                let key = slugify(&raw);
                if key.is_empty() {
                    return Err(TaxonomyError::EmptyTerm {
                        page: page.key().to_string(),
                        taxonomy: view.plural.clone(),
                        term: raw,
                    });
                }
                let term = taxonomy.0.entry(key).or_insert_with(|| Term {
                    name: raw.clone(),
                    pages: Vec::new(),
                });
                if term.pages.last().map(String::as_str) != Some(page.key()) {
                    term.pages.push(page.key().to_string());
                }
            }
        }
        crate::debug!("taxonomy"; "{}: {} term(s)", view.plural, taxonomy.len());
        list.insert(view.plural, taxonomy);
    }

    Ok(TaxonomyList(list))
}
