//! Sites and the rebuild cycle.
//!
//! A project builds one [`Site`] per language, grouped in [`Sites`]. On a
//! change batch, [`Sites::process_partial`]:
//!
//! 1. filters, collapses and classifies the events
//! 2. evicts cache-busted resources
//! 3. resets derived views and recompiles templates on layout or i18n changes
//! 4. resets the data cache on data changes
//! 5. removes content nodes whose sources are gone
//! 6. resets page state, fully or only for the touched identities
//! 7. hands the changed content paths to the collector
//!
//! and returns the first error.

mod collate;
mod error;
mod external;
#[allow(clippy::module_inception)]
mod site;
mod sites;


pub use collate::{WorkerError, collate_errors};
pub use error::{BuildError, Cause};
pub(crate) use error::cause;
pub use external::{
    Collaborators, ContentCollector, DataCache, ResourceCache, Template, TemplateEngine,
};
pub use site::Site;
pub use sites::{BuildCfg, ResetScope, Sites, WhatChanged};
