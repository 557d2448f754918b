//! Parallel exhaustive search of the derivation space.
//!
//! Pending forms live on one shared queue. Workers take a form, rewrite it
//! with every production, and sort each successor into one of three fates:
//!
//! * longer than the bound, or already claimed by someone else: dropped,
//! * terminal: kept in the worker's own word buffer,
//! * otherwise: pushed back on the queue.
//!
//! # Termination
//!
//! The queue counts the forms that are queued or being expanded. The count
//! goes up before a form is sent and down only after the worker expanding it
//! has queued all of its successors, so it reaches zero exactly when the
//! queue is empty and no worker can add to it again. Idle workers wait on
//! the queue for at most one poll interval and leave once they see zero.
//!
//! The search always ends: there are finitely many forms within the bound,
//! and the visited cache lets each of them be expanded at most once.

use std::{
    num::NonZeroUsize,
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
    time::Duration,
};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};

use crate::{
    cache::VisitedCache,
    collector::{self, Language, WorkerOutput},
    grammar::Grammar,
    matcher,
    symbol::SententialForm,
};

/// Everything one search shares between its workers. Built fresh for every
/// call and dropped when the call returns.
#[derive(Debug)]
pub struct SearchContext<'g> {
    grammar: &'g Grammar,
    max_length: usize,
    visited: VisitedCache,
    queue: WorkQueue,
}

/// What becomes of a freshly derived form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fate {
    OverBound,
    AlreadyClaimed,
    Terminal,
    Pending,
}

impl<'g> SearchContext<'g> {
    pub fn new(grammar: &'g Grammar, max_length: usize, poll_interval: Duration) -> Self {
        Self {
            grammar,
            max_length,
            visited: VisitedCache::new(),
            queue: WorkQueue::new(poll_interval),
        }
    }

    /// Claim `form` and route it: queued, written to `words`, or dropped.
    fn admit(&self, form: SententialForm, words: &mut Vec<String>) -> Fate {
        if form.len() > self.max_length {
            return Fate::OverBound;
        }
        if !self.visited.claim(form.clone()) {
            return Fate::AlreadyClaimed;
        }
        if form.is_terminal() {
            words.push(form.to_word());
            Fate::Terminal
        } else {
            self.queue.push(form);
            Fate::Pending
        }
    }

    /// Rewrite `form` with every production and admit the successors.
    fn expand(&self, form: &SententialForm, output: &mut WorkerOutput) {
        output.stats.expanded += 1;
        for production in self.grammar.productions() {
            let fits = production
                .rewritten_len(form.len())
                .is_some_and(|len| len <= self.max_length);
            if !fits {
                output.stats.over_bound += matcher::occurrences(form, production).count();
                continue;
            }
            for successor in matcher::rewrites(form, production) {
                match self.admit(successor, &mut output.words) {
                    Fate::OverBound => output.stats.over_bound += 1,
                    Fate::AlreadyClaimed => output.stats.already_claimed += 1,
                    Fate::Terminal | Fate::Pending => {}
                }
            }
        }
    }

    fn run_worker(&self, id: usize) -> WorkerOutput {
        let _guard = AbortOnPanic(&self.queue);
        let mut output = WorkerOutput::default();
        while let Some(form) = self.queue.pop() {
            tracing::trace!(worker = id, ?form, "expanding");
            self.expand(&form, &mut output);
            self.queue.done();
        }
        tracing::trace!(worker = id, stats = ?output.stats, "worker finished");
        output
    }
}

/// Run the search to exhaustion on `workers` threads.
///
/// # Panics
///
/// Re-raises the panic of any worker thread.
pub fn search(
    grammar: &Grammar,
    max_length: usize,
    workers: NonZeroUsize,
    poll_interval: Duration,
) -> Language {
    let ctx = SearchContext::new(grammar, max_length, poll_interval);

    let mut seed = WorkerOutput::default();
    if ctx.admit(grammar.start_form(), &mut seed.words) == Fate::OverBound {
        seed.stats.over_bound += 1;
    }

    let outputs: Vec<WorkerOutput> = if ctx.queue.is_quiescent() {
        // The start symbol was a word by itself, or did not fit.
        vec![seed]
    } else {
        std::thread::scope(|s| {
            let handles: Vec<_> = (0..workers.get())
                .map(|id| {
                    let ctx = &ctx;
                    s.spawn(move || ctx.run_worker(id))
                })
                .collect();

            std::iter::once(seed)
                .chain(handles.into_iter().map(|h| match h.join() {
                    Ok(output) => output,
                    Err(e) => std::panic::resume_unwind(e),
                }))
                .collect()
        })
    };

    tracing::debug!(visited = ctx.visited.len(), "search exhausted");
    collector::collect(outputs, workers.get())
}

/// Multi-producer multi-consumer queue of pending forms, with the
/// outstanding-work count that decides termination.
#[derive(Debug)]
struct WorkQueue {
    tx: Sender<SententialForm>,
    rx: Receiver<SententialForm>,
    outstanding: AtomicUsize,
    aborted: AtomicBool,
    poll_interval: Duration,
}

impl WorkQueue {
    fn new(poll_interval: Duration) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self {
            tx,
            rx,
            outstanding: AtomicUsize::new(0),
            aborted: AtomicBool::new(false),
            poll_interval,
        }
    }

    fn push(&self, form: SententialForm) {
        self.outstanding.fetch_add(1, Ordering::SeqCst);
        // Sending only fails without receivers, and `self.rx` is one.
        if self.tx.send(form).is_err() {
            self.outstanding.fetch_sub(1, Ordering::SeqCst);
        }
    }

    /// Wait for the next form. `None` once every form pushed so far has
    /// been fully expanded, or a worker has died.
    fn pop(&self) -> Option<SententialForm> {
        loop {
            if self.aborted.load(Ordering::SeqCst) {
                return None;
            }
            match self.rx.recv_timeout(self.poll_interval) {
                Ok(form) => return Some(form),
                Err(RecvTimeoutError::Timeout) if self.is_quiescent() => return None,
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => return None,
            }
        }
    }

    /// Mark one popped form as fully expanded.
    fn done(&self) {
        self.outstanding.fetch_sub(1, Ordering::SeqCst);
    }

    fn is_quiescent(&self) -> bool {
        self.outstanding.load(Ordering::SeqCst) == 0
    }
}

/// A panicking worker leaves its form counted as outstanding forever; this
/// releases the remaining workers so the panic can reach the caller.
struct AbortOnPanic<'a>(&'a WorkQueue);

impl Drop for AbortOnPanic<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.0.aborted.store(true, Ordering::SeqCst);
        }
    }
}
