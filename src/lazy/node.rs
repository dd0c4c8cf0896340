use std::error::Error as StdError;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use thiserror::Error;

type Compute<I, T> = Box<dyn Fn(&I) -> anyhow::Result<T> + Send + Sync>;
type Shared = Arc<dyn StdError + Send + Sync>;

/// Memoized failure of a lazy node.
#[derive(Debug, Clone, Error)]
#[error("lazy node `{node}` failed")]
pub struct LazyError {
    pub node: &'static str,
    #[source]
    pub source: Shared,
}

/// A named, memoized, resettable computation.
///
/// The compute function runs at most once between creation (or
/// [`reset`](Self::reset)) and the next reset. The result, success or
/// failure, is memoized; concurrent callers block on the first evaluation.
///
/// Evaluating a node from inside its own compute function deadlocks.
pub struct LazyNode<I: ?Sized, T> {
    name: &'static str,
    compute: Compute<I, T>,
    state: Mutex<Option<Result<Arc<T>, Shared>>>,
    evaluations: AtomicUsize,
}

impl<I: ?Sized, T> LazyNode<I, T> {
    pub fn new(
        name: &'static str,
        compute: impl Fn(&I) -> anyhow::Result<T> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            compute: Box::new(compute),
            state: Mutex::new(None),
            evaluations: AtomicUsize::new(0),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Memoized value, computing it first if needed.
    pub fn evaluate(&self, input: &I) -> Result<Arc<T>, LazyError> {
        let mut state = self.state.lock();
        if let Some(done) = state.as_ref() {
            return self.share(done);
        }

        crate::debug!("lazy"; "evaluating {}", self.name);
        self.evaluations.fetch_add(1, Ordering::Relaxed);
        let result = (self.compute)(input).map(Arc::new).map_err(|e| {
            let boxed: Box<dyn StdError + Send + Sync> = e.into();
            Shared::from(boxed)
        });
        let shared = self.share(&result);
        *state = Some(result);
        shared
    }

    fn share(&self, done: &Result<Arc<T>, Shared>) -> Result<Arc<T>, LazyError> {
        match done {
            Ok(value) => Ok(Arc::clone(value)),
            Err(source) => Err(LazyError {
                node: self.name,
                source: Arc::clone(source),
            }),
        }
    }

    /// Forget the memoized result without recomputing.
    pub fn reset(&self) {
        *self.state.lock() = None;
    }

    pub fn is_evaluated(&self) -> bool {
        self.state.lock().is_some()
    }

    /// Times the compute function has run since creation.
    pub fn evaluations(&self) -> usize {
        self.evaluations.load(Ordering::Relaxed)
    }
}
