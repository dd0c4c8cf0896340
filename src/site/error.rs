use std::error::Error as StdError;
use std::sync::Arc;

use thiserror::Error;

use crate::lazy::LazyError;

/// Shared, clonable cause from a collaborator.
pub type Cause = Arc<dyn StdError + Send + Sync>;

/// Errors that end a build cycle.
#[derive(Debug, Clone, Error)]
pub enum BuildError {
    #[error("compiling templates for {lang:?} failed")]
    TemplateCompile {
        lang: String,
        #[source]
        source: Cause,
    },

    #[error("{}{} failed", on_page(.page), .source.node)]
    Lazy {
        page: Option<String>,
        #[source]
        source: LazyError,
    },

    #[error("processing content failed")]
    Collect(#[source] Cause),

    #[error("render of {name:?} failed")]
    Render {
        name: String,
        #[source]
        source: Cause,
    },

    #[error("found no layout for required render {name:?}")]
    MissingLayout { name: String },

    #[error("invalid configuration")]
    Config(#[source] Cause),
}

impl BuildError {
    pub fn collect(error: anyhow::Error) -> Self {
        Self::Collect(cause(error))
    }

    pub fn config(error: impl StdError + Send + Sync + 'static) -> Self {
        Self::Config(Arc::new(error))
    }

    /// Full cause chain on one line.
    pub fn chain(&self) -> String {
        let mut message = self.to_string();
        let mut source = self.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }
}

pub(crate) fn cause(error: anyhow::Error) -> Cause {
    let boxed: Box<dyn StdError + Send + Sync> = error.into();
    Cause::from(boxed)
}

fn on_page(page: &Option<String>) -> String {
    page.as_ref().map(|p| format!("{p}: ")).unwrap_or_default()
}
