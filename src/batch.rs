//! Recognition of many strings on worker threads.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Sender};
use std::thread;

use log::{debug, warn};

use cfg_derivation::{RecognitionResult, RecognizeError};
use cfg_symbol::Symbol;

use crate::recognizer::Recognizer;

/// Stack for a worker, apart from the recursive matcher's nesting.
const WORKER_BASE_STACK: usize = 2 << 20;

/// Stack for each level of nesting in the recursive matcher, with room for
/// long alternatives and unoptimized builds.
const STACK_PER_LEVEL: usize = 4 << 10;

impl Recognizer {
    /// Decides each string independently and returns the results in input
    /// order.
    ///
    /// Strings are handed out to up to `threads` workers, each with its own
    /// memo and a stack sized for the depth limit, even when there is only
    /// one worker. A timeout on one string
    /// has no effect on the others. When no worker can be spawned, the
    /// strings are decided on the calling thread.
    pub fn recognize_batch<S>(
        &self,
        start: &str,
        inputs: &[S],
    ) -> Result<Vec<RecognitionResult>, RecognizeError>
    where
        S: AsRef<str> + Sync,
    {
        let start = self.start_symbol(start)?;
        if inputs.is_empty() {
            return Ok(vec![]);
        }
        let workers = self.config().threads.clamp(1, inputs.len());
        let stack_size = worker_stack_size(self.config().depth_limit);
        debug!(
            "batch of {} strings on {} threads with {} KiB stacks",
            inputs.len(),
            workers,
            stack_size >> 10
        );

        let next = AtomicUsize::new(0);
        let (sender, receiver) = mpsc::channel();
        thread::scope(|scope| {
            let mut spawned = 0;
            for _ in 0..workers {
                let sender = sender.clone();
                let next = &next;
                let worker = move || self.drain(start, inputs, next, &sender);
                match thread::Builder::new()
                    .name(format!("cfg-batch-{}", spawned))
                    .stack_size(stack_size)
                    .spawn_scoped(scope, worker)
                {
                    Ok(_) => spawned += 1,
                    Err(error) => {
                        warn!("cannot spawn batch worker: {}", error);
                        break;
                    }
                }
            }
            if spawned == 0 {
                self.drain(start, inputs, &next, &sender);
            }
        });
        drop(sender);

        let mut results: Vec<Option<RecognitionResult>> = vec![None; inputs.len()];
        for (idx, result) in receiver {
            results[idx] = Some(result?);
        }
        Ok(results.into_iter().flatten().collect())
    }

    /// Decides strings until none are left to claim.
    fn drain<S: AsRef<str>>(
        &self,
        start: Symbol,
        inputs: &[S],
        next: &AtomicUsize,
        sender: &Sender<(usize, Result<RecognitionResult, RecognizeError>)>,
    ) {
        loop {
            let idx = next.fetch_add(1, Ordering::Relaxed);
            let Some(input) = inputs.get(idx) else {
                break;
            };
            let result = self.recognize_symbol(start, input.as_ref());
            if sender.send((idx, result)).is_err() {
                break;
            }
        }
    }
}

fn worker_stack_size(depth_limit: usize) -> usize {
    depth_limit
        .saturating_mul(STACK_PER_LEVEL)
        .saturating_add(WORKER_BASE_STACK)
}
