use crossbeam::channel::{Receiver, Sender};

use super::BuildError;

/// An error from one worker of a fan-out.
#[derive(Debug)]
pub struct WorkerError {
    pub index: usize,
    pub error: BuildError,
}

/// Drain `results` until every sender is gone, then send the error of the
/// lowest worker index (or `None`) on `out`, exactly once.
///
/// The other errors are logged as warnings in worker order.
pub fn collate_errors(results: Receiver<WorkerError>, out: Sender<Option<BuildError>>) {
    let mut errors: Vec<WorkerError> = results.iter().collect();
    errors.sort_by_key(|e| e.index);

    let mut errors = errors.into_iter();
    let first = errors.next();
    for rest in errors {
        crate::warn!("rebuild"; "worker {}: {}", rest.index, rest.error.chain());
    }
    let _ = out.send(first.map(|e| e.error));
}
