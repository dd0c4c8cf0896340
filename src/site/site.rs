use std::sync::Arc;

use parking_lot::{Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{BuildError, TemplateEngine};
use crate::config::{SiteConfig, SiteSnapshot};
use crate::content::{ContentTree, Neighbors, PageMeta};
use crate::core::{BaseUrl, UrlPath};
use crate::lazy::{InitNode, LazyError, SiteInit};
use crate::menu::{MenuInputs, Menus, assemble_menus};
use crate::policy;
use crate::refs::RefLinker;
use crate::taxonomy::TaxonomyList;

/// One language of the project.
///
/// Owns the content tree, the lazy graph of derived views and the
/// reference resolver. Configuration is read through an immutable
/// [`SiteSnapshot`] replaced wholesale on reload.
pub struct Site {
    lang: String,
    config: Arc<SiteConfig>,
    snapshot: SiteSnapshot,
    base_url: BaseUrl,
    content: RwLock<ContentTree>,
    init: SiteInit,
    ref_linker: RefLinker,
    templates: Arc<dyn TemplateEngine>,
    fatal: Mutex<Vec<BuildError>>,
}

impl Site {
    pub fn new(lang: &str, config: Arc<SiteConfig>, templates: Arc<dyn TemplateEngine>) -> Self {
        let base_url = language_base_url(&config, lang);
        Self {
            lang: lang.to_string(),
            snapshot: SiteSnapshot::new(&config, lang),
            ref_linker: RefLinker::new(lang, &config.refs, base_url.clone()),
            base_url,
            config,
            content: RwLock::new(ContentTree::new()),
            init: SiteInit::new(),
            templates,
            fatal: Mutex::new(Vec::new()),
        }
    }

    /// Swap in a reloaded configuration. Derived views are dropped.
    pub fn apply_config(&mut self, config: Arc<SiteConfig>) {
        self.base_url = language_base_url(&config, &self.lang);
        self.snapshot = SiteSnapshot::new(&config, &self.lang);
        self.ref_linker = RefLinker::new(&self.lang, &config.refs, self.base_url.clone());
        self.config = config;
        self.init.reset_all();
        self.content.read().reset_page_state();
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn snapshot(&self) -> &SiteSnapshot {
        &self.snapshot
    }

    /// Base URL including the language prefix, if any.
    pub fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    pub fn content(&self) -> RwLockReadGuard<'_, ContentTree> {
        self.content.read()
    }

    /// Exclusive access, only between build cycles.
    pub fn content_mut(&self) -> RwLockWriteGuard<'_, ContentTree> {
        self.content.write()
    }

    pub fn init(&self) -> &SiteInit {
        &self.init
    }

    pub fn ref_linker(&self) -> &RefLinker {
        &self.ref_linker
    }

    pub fn templates(&self) -> &dyn TemplateEngine {
        self.templates.as_ref()
    }

    // ========================================================================
    // Derived views
    // ========================================================================

    /// Evaluate a derived view on behalf of `page`.
    ///
    /// A failure is wrapped with the page and recorded as fatal for the
    /// current cycle.
    pub fn init_node(&self, node: InitNode, page: Option<&str>) -> Result<(), BuildError> {
        self.init
            .evaluate(node, self)
            .map_err(|e| self.fail_lazy(e, page))
    }

    pub fn menus(&self) -> Result<Arc<Menus>, BuildError> {
        self.init.menus(self).map_err(|e| self.fail_lazy(e, None))
    }

    pub fn taxonomies(&self) -> Result<Arc<TaxonomyList>, BuildError> {
        self.init.taxonomies(self).map_err(|e| self.fail_lazy(e, None))
    }

    /// Global and in-section neighbors of a page, or `None` for pages
    /// without navigation support.
    pub fn neighbors(&self, key: &str) -> Result<Option<(Neighbors, Neighbors)>, BuildError> {
        self.init_node(InitNode::NextPrev, Some(key))?;
        self.init_node(InitNode::NextPrevInSection, Some(key))?;
        let tree = self.content();
        Ok(tree
            .get(key)
            .and_then(|page| page.nav())
            .map(|nav| (nav.global(), nav.in_section())))
    }

    pub(crate) fn assemble_menus(&self) -> Menus {
        let tree = self.content();
        assemble_menus(&MenuInputs {
            config: &self.config.menus,
            section_pages_menu: self.config.site.section_pages_menu.as_deref(),
            tree: &tree,
            base_url: &self.base_url,
            canonify_urls: self.config.site.canonify_urls,
        })
    }

    fn fail_lazy(&self, source: LazyError, page: Option<&str>) -> BuildError {
        let error = BuildError::Lazy {
            page: page.map(str::to_string),
            source,
        };
        self.fatal.lock().push(error.clone());
        error
    }

    /// Fatal errors recorded since the last call.
    pub fn take_fatal_errors(&self) -> Vec<BuildError> {
        std::mem::take(&mut *self.fatal.lock())
    }

    // ========================================================================
    // Build state
    // ========================================================================

    /// Whether a page with this front matter takes part in the build.
    pub fn should_build(&self, meta: &PageMeta) -> bool {
        policy::should_build(
            self.config.build.flags(),
            meta.draft,
            meta.publish_date(),
            meta.expiry_date,
        )
    }

    /// Prepare for a new cycle: derived views are dropped, scratch state
    /// is cleared everywhere, and collections too when sources changed.
    pub fn reset_build_state(&self, source_changed: bool) {
        self.init.reset_all();
        let tree = self.content();
        if source_changed {
            tree.drop_collections();
        }
        for node in tree.iter() {
            node.reset_state();
        }
    }

    // ========================================================================
    // URLs
    // ========================================================================

    pub fn home_abs_url(&self) -> String {
        self.base_url.permalink(&UrlPath::root())
    }

    pub fn sitemap_abs_url(&self) -> String {
        let mut url = self.home_abs_url();
        if !url.ends_with('/') {
            url.push('/');
        }
        url.push_str(&self.snapshot.sitemap().filename);
        url
    }
}

/// `https://example.org/fr` for non-default languages of a multilingual
/// site (and for the default one when it lives in a subdirectory).
fn language_base_url(config: &SiteConfig, lang: &str) -> BaseUrl {
    let site = &config.site;
    let in_subdir = site.is_multilingual()
        && (lang != site.default_content_language || site.default_content_language_in_subdir);
    if in_subdir {
        let base = site.base_url.trim_end_matches('/');
        BaseUrl::parse(&format!("{base}/{lang}"))
    } else {
        BaseUrl::parse(&site.base_url)
    }
}
