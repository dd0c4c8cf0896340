use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

use crossbeam::channel;
use rayon::prelude::*;
use regex::Regex;

use super::collate::{WorkerError, collate_errors};
use super::{
    BuildError, Collaborators, ContentCollector, DataCache, ResourceCache, Site, TemplateEngine, cause,
};
use crate::config::{CacheBuster, ConfigHandle, SiteConfig};
use crate::core::{ContentKind, Identity};
use crate::logger::DistinctLogger;
use crate::utils::unique_in_order;
use crate::watch::{
    ChangeEvent, Op, SourceRoots, SourceSpec, SourceWatcher, classify_events, normalize_events,
};

/// Options and outcome of one build cycle.
#[derive(Debug, Clone, Default)]
pub struct BuildCfg {
    /// The previous cycle failed; everything is reset.
    pub err_recovery: bool,
    /// Set before the `init` hook runs.
    pub what_changed: Option<WhatChanged>,
    /// Page-state reset the cycle performed.
    pub reset: Option<ResetScope>,
}

/// What a batch touched, as seen by the `init` hook.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WhatChanged {
    /// Any content source changed.
    pub source: bool,
    pub files: BTreeSet<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetScope {
    /// Every page, plus reverse index and collections.
    Full,
    /// Only pages backed by these identities.
    Selective(BTreeSet<Identity>),
}

/// All sites of a project (one per language) and their collaborators.
pub struct Sites {
    sites: Vec<Site>,
    config: Arc<SiteConfig>,
    roots: SourceRoots,
    filter: SourceSpec,
    cache_busters: Vec<CacheBuster>,
    collector: Arc<dyn ContentCollector>,
    resources: Arc<dyn ResourceCache>,
    data: Arc<dyn DataCache>,
}

impl Sites {
    /// One site per configured language, in language order.
    pub fn new(config: Arc<SiteConfig>, collaborators: Collaborators) -> Result<Self, BuildError> {
        let filter = SourceSpec::from_config(&config.build).map_err(BuildError::config)?;
        let cache_busters = config
            .build
            .compile_cache_busters()
            .map_err(BuildError::config)?;

        let sites = config
            .site
            .language_codes()
            .iter()
            .map(|lang| Site::new(lang, Arc::clone(&config), (collaborators.templates)(lang)))
            .collect();

        Ok(Self {
            sites,
            roots: SourceRoots::from_config(&config),
            config,
            filter,
            cache_busters,
            collector: collaborators.collector,
            resources: collaborators.resources,
            data: collaborators.data,
        })
    }

    /// Replace the source roots (the default is the configured directories).
    pub fn with_roots(mut self, roots: SourceRoots) -> Self {
        self.roots = roots;
        self
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn get(&self, lang: &str) -> Option<&Site> {
        self.sites.iter().find(|site| site.lang() == lang)
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn roots(&self) -> &SourceRoots {
        &self.roots
    }

    /// Source identity of a change event, if it is tracked.
    pub fn event_to_identity(&self, event: &ChangeEvent) -> Option<Identity> {
        self.roots.classify(&event.path)
    }

    /// Swap in a reloaded configuration for every existing site.
    pub fn apply_config(&mut self, config: Arc<SiteConfig>) -> Result<(), BuildError> {
        self.filter = SourceSpec::from_config(&config.build).map_err(BuildError::config)?;
        self.cache_busters = config
            .build
            .compile_cache_busters()
            .map_err(BuildError::config)?;
        self.roots = SourceRoots::from_config(&config);

        let langs = config.site.language_codes();
        if langs.len() != self.sites.len() || langs.iter().zip(&self.sites).any(|(l, s)| l != s.lang()) {
            crate::warn!("config"; "language changes need a restart");
        }
        for site in &mut self.sites {
            site.apply_config(Arc::clone(&config));
        }
        self.config = config;
        Ok(())
    }

    /// Re-read the config file behind `handle` and apply it when its
    /// content changed. Returns whether anything was applied.
    pub fn reload_config(&mut self, handle: &ConfigHandle) -> Result<bool, BuildError> {
        let changed = handle.reload().map_err(|e| BuildError::Config(cause(e)))?;
        if changed {
            self.apply_config(handle.load())?;
        }
        Ok(changed)
    }

    // ========================================================================
    // Cycles
    // ========================================================================

    /// Build everything: compile templates, then collect every source.
    pub fn process_full(&self) -> Result<(), BuildError> {
        self.compile_templates()?;
        self.process_sites(|site| {
            site.reset_build_state(true);
            Ok(())
        })?;
        self.collector.collect(self, &[]).map_err(BuildError::collect)
    }

    /// One watch cycle: reset build state in the `init` hook, then process
    /// the batch.
    pub fn rebuild(&self, cfg: &mut BuildCfg, events: Vec<ChangeEvent>) -> Result<(), BuildError> {
        self.process_partial(
            cfg,
            |cfg| {
                let source_changed = cfg.what_changed.as_ref().is_some_and(|w| w.source);
                self.process_sites(|site| {
                    site.reset_build_state(source_changed);
                    Ok(())
                })
            },
            events,
        )
    }

    /// Rebuild on every batch from `watcher` until it stops.
    ///
    /// A failed cycle makes the next one an error-recovery cycle.
    pub fn watch(
        &self,
        watcher: &mut SourceWatcher,
        mut on_cycle: impl FnMut(&BuildCfg, &Result<(), BuildError>),
    ) {
        let mut recovering = false;
        while let Some(events) = watcher.next_batch() {
            let mut cfg = BuildCfg {
                err_recovery: recovering,
                ..BuildCfg::default()
            };
            let result = self.rebuild(&mut cfg, events);
            match &result {
                Ok(()) => crate::debug!("rebuild"; "cycle done"),
                Err(e) => crate::error!("rebuild"; "{}", e.chain()),
            }
            recovering = result.is_err();
            on_cycle(&cfg, &result);
        }
    }

    /// Process one batch of raw change events.
    ///
    /// `init` runs once the batch is classified and before anything is
    /// reset or reprocessed; `cfg.what_changed` is set by then.
    pub fn process_partial(
        &self,
        cfg: &mut BuildCfg,
        init: impl FnOnce(&mut BuildCfg) -> Result<(), BuildError>,
        events: Vec<ChangeEvent>,
    ) -> Result<(), BuildError> {
        let events = normalize_events(events, &self.filter);
        crate::debug!("rebuild"; "rebuild for {} event(s)", events.len());

        let logger = DistinctLogger::new("rebuild");
        let changes = match self.sites.first() {
            Some(site) => classify_events(
                &events,
                &self.roots,
                |path| site.templates().has_template(path),
                &logger,
            ),
            None => return Ok(()),
        };

        let busters = self.cache_busters_for(&events);

        cfg.what_changed = Some(WhatChanged {
            source: changes.source_changed(),
            files: changes.content.iter().map(|e| e.path.clone()).collect(),
        });
        init(cfg)?;

        if !busters.is_empty() {
            let evicted = self
                .resources
                .evict_matches(&|key: &str| busters.iter().any(|target| target.is_match(key)));
            crate::debug!("rebuild"; "evicted {evicted} cached resource(s)");
        }

        if changes.layout_changed || changes.i18n_changed {
            for site in &self.sites {
                site.init().reset_all();
            }
            self.compile_templates()?;
        }

        if changes.data_changed {
            self.data.reset();
        }

        let mut changed_paths = Vec::with_capacity(changes.content.len());
        for event in &changes.content {
            // editors may write in place with a rename; only a missing
            // path means the file moved away
            let removed = match event.op {
                Op::Remove => true,
                Op::Rename => !event.path.exists(),
                Op::Create | Op::Write => false,
            };
            if removed && ContentKind::is_content_file(&event.path) {
                for site in &self.sites {
                    site.content_mut().remove_by_source(&event.path);
                }
            }
            changed_paths.push(event.path.clone());
        }

        if cfg.err_recovery || changes.layout_added || changes.data_changed {
            for site in &self.sites {
                site.content().reset_page_state();
            }
            crate::debug!("rebuild"; "full page state reset");
            cfg.reset = Some(ResetScope::Full);
        } else {
            let mut count = 0;
            for site in &self.sites {
                count += site.content().reset_page_state_for(&changes.identities);
            }
            crate::debug!("rebuild"; "reset {count} page(s)");
            cfg.reset = Some(ResetScope::Selective(changes.identities.clone()));
        }

        if !changed_paths.is_empty() {
            let paths = unique_in_order(changed_paths);
            crate::log!("rebuild"; "{} content file(s) changed", paths.len());
            self.collector
                .collect(self, &paths)
                .map_err(BuildError::collect)?;
        }

        Ok(())
    }

    /// Target matchers of every cache-buster rule a batch triggers.
    fn cache_busters_for(&self, events: &[ChangeEvent]) -> Vec<&Regex> {
        let mut targets = Vec::new();
        for event in events {
            let Some((kind, rel)) = self.roots.make_path_relative(&event.path) else {
                continue;
            };
            let qualified = Identity::new(kind, &rel).qualified_path();
            if let Some(target) = self
                .cache_busters
                .iter()
                .find_map(|buster| buster.target_for(&qualified))
            {
                targets.push(target);
            }
        }
        targets
    }

    /// Recompile every site's templates; the first site's engine is the
    /// prototype of the rest.
    pub fn compile_templates(&self) -> Result<(), BuildError> {
        let mut prototype: Option<&dyn TemplateEngine> = None;
        for site in &self.sites {
            site.templates()
                .compile(prototype)
                .map_err(|e| BuildError::TemplateCompile {
                    lang: site.lang().to_string(),
                    source: super::error::cause(e),
                })?;
            if prototype.is_none() {
                prototype = Some(site.templates());
            }
        }
        crate::debug!("rebuild"; "templates compiled for {} site(s)", self.sites.len());
        Ok(())
    }

    /// Run `work` on every site in parallel.
    ///
    /// Every site runs to completion; the error of the lowest-index site
    /// is returned and the others are logged.
    pub fn process_sites(
        &self,
        work: impl Fn(&Site) -> Result<(), BuildError> + Sync,
    ) -> Result<(), BuildError> {
        let (results_tx, results_rx) = channel::unbounded();
        let (done_tx, done_rx) = channel::bounded(1);

        std::thread::scope(|scope| {
            scope.spawn(move || collate_errors(results_rx, done_tx));
            self.sites
                .par_iter()
                .enumerate()
                .for_each_with(results_tx, |tx, (index, site)| {
                    if let Err(error) = work(site) {
                        let _ = tx.send(WorkerError { index, error });
                    }
                });
        });

        match done_rx.recv() {
            Ok(Some(error)) => Err(error),
            _ => Ok(()),
        }
    }

    /// Fatal errors recorded by every site since the last call.
    pub fn take_fatal_errors(&self) -> Vec<BuildError> {
        self.sites
            .iter()
            .flat_map(|site| site.take_fatal_errors())
            .collect()
    }
}
