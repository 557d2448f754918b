use dashmap::DashSet;

use crate::symbol::SententialForm;

/// The set of sentential forms already claimed during one search.
///
/// Shared by all workers without external locking. A form is claimed by
/// exactly one successful [`claim`](VisitedCache::claim); that worker alone
/// goes on to expand or emit it.
#[derive(Debug)]
pub struct VisitedCache {
    seen: DashSet<SententialForm, ahash::RandomState>,
}

impl Default for VisitedCache {
    fn default() -> Self {
        Self::new()
    }
}

impl VisitedCache {
    pub fn new() -> Self {
        Self {
            seen: DashSet::with_hasher(ahash::RandomState::new()),
        }
    }
    /// Insert `form`, returning `true` if no one had claimed it before.
    pub fn claim(&self, form: SententialForm) -> bool {
        self.seen.insert(form)
    }
    pub fn contains(&self, form: &SententialForm) -> bool {
        self.seen.contains(form)
    }
    pub fn len(&self) -> usize {
        self.seen.len()
    }
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
