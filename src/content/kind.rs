use crate::config::TaxonomiesConfig;

/// Kind of a content node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    Home,
    Section,
    Page,
    /// Taxonomy list page, e.g. `/tags`
    Taxonomy,
    /// One term of a taxonomy, e.g. `/tags/rust`
    Term,
}

impl PageKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Section => "section",
            Self::Page => "page",
            Self::Taxonomy => "taxonomy",
            Self::Term => "term",
        }
    }

    /// Branch nodes own child pages; `Page` is the only leaf kind.
    #[inline]
    pub fn is_branch(self) -> bool {
        !matches!(self, Self::Page)
    }
}

/// Kind of a branch node from its section path segments.
///
/// No segments is home; a path equal to a taxonomy plural is that
/// taxonomy; a path below a plural is a term; anything else is a section.
pub fn kind_from_sections(sections: &[&str], taxonomies: &TaxonomiesConfig) -> PageKind {
    if sections.is_empty() {
        return PageKind::Home;
    }

    let path = sections.join("/");
    for view in taxonomies.values() {
        if path == view.plural {
            return PageKind::Taxonomy;
        }
        if path
            .strip_prefix(view.plural.as_str())
            .is_some_and(|rest| rest.starts_with('/'))
        {
            return PageKind::Term;
        }
    }
    PageKind::Section
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_sections() {
        let taxonomies = TaxonomiesConfig::default();
        assert_eq!(kind_from_sections(&[], &taxonomies), PageKind::Home);
        assert_eq!(kind_from_sections(&["tags"], &taxonomies), PageKind::Taxonomy);
        assert_eq!(kind_from_sections(&["tags", "rust"], &taxonomies), PageKind::Term);
        assert_eq!(kind_from_sections(&["posts"], &taxonomies), PageKind::Section);
        assert_eq!(kind_from_sections(&["tagsfoo"], &taxonomies), PageKind::Section);
    }

    #[test]
    fn test_is_branch() {
        assert!(PageKind::Home.is_branch());
        assert!(PageKind::Term.is_branch());
        assert!(!PageKind::Page.is_branch());
    }
}
