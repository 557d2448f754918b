//! Merging the workers' results into one language.

use std::{cmp::Ordering, ops::AddAssign};

use itertools::Itertools;

/// Counters one worker keeps while it searches.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WorkerStats {
    /// Forms taken off the queue and rewritten.
    pub expanded: usize,
    /// Successors dropped for exceeding the length bound.
    pub over_bound: usize,
    /// Successors dropped because another derivation had claimed them.
    pub already_claimed: usize,
}

impl AddAssign for WorkerStats {
    fn add_assign(&mut self, rhs: Self) {
        self.expanded += rhs.expanded;
        self.over_bound += rhs.over_bound;
        self.already_claimed += rhs.already_claimed;
    }
}

/// What a worker hands back when it exits.
#[derive(Debug, Default)]
pub struct WorkerOutput {
    pub words: Vec<String>,
    pub stats: WorkerStats,
}

/// Totals for a finished search.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    pub workers: usize,
    pub expanded: usize,
    pub over_bound: usize,
    pub already_claimed: usize,
    /// Words dropped by [`eliminate_duplicates`].
    pub duplicates_removed: usize,
}

/// The final duplicate-elimination stage.
///
/// Claiming a form in the visited cache and emitting it as a word are two
/// separate steps, so nothing in the search itself forbids two workers
/// from reporting the same word. This stage is what makes the result
/// duplicate-free. Returns the merged words and how many were dropped.
pub fn eliminate_duplicates(buffers: Vec<Vec<String>>) -> (Vec<String>, usize) {
    let total: usize = buffers.iter().map(Vec::len).sum();
    let words = buffers.into_iter().flatten().unique().collect_vec();
    let removed = total - words.len();
    (words, removed)
}

/// Merge worker outputs: stats are summed, word buffers go through
/// [`eliminate_duplicates`].
pub fn collect(outputs: Vec<WorkerOutput>, workers: usize) -> Language {
    let mut totals = WorkerStats::default();
    let mut buffers = Vec::with_capacity(outputs.len());
    for output in outputs {
        totals += output.stats;
        buffers.push(output.words);
    }

    let (words, duplicates_removed) = eliminate_duplicates(buffers);
    if duplicates_removed > 0 {
        tracing::debug!(duplicates_removed, "workers reported the same word");
    }

    Language {
        words,
        stats: SearchStats {
            workers,
            expanded: totals.expanded,
            over_bound: totals.over_bound,
            already_claimed: totals.already_claimed,
            duplicates_removed,
        },
    }
}

/// Presentation order: shorter words first, equal lengths lexicographically.
pub fn presentation_order(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// The words a grammar generates within a length bound, without
/// duplicates, in no particular order.
#[derive(Debug, Clone, Default)]
pub struct Language {
    words: Vec<String>,
    stats: SearchStats,
}

impl Language {
    pub fn words(&self) -> &[String] {
        &self.words
    }
    pub fn into_words(self) -> Vec<String> {
        self.words
    }
    /// The words sorted by length, then lexicographically.
    pub fn sorted(&self) -> Vec<&str> {
        self.words
            .iter()
            .map(String::as_str)
            .sorted_by(|a, b| presentation_order(a, b))
            .collect()
    }
    pub fn into_sorted(mut self) -> Vec<String> {
        self.words.sort_by(|a, b| presentation_order(a, b));
        self.words
    }
    pub fn len(&self) -> usize {
        self.words.len()
    }
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.words.iter()
    }
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }
}

impl IntoIterator for Language {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.into_iter()
    }
}

impl<'a> IntoIterator for &'a Language {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(ws: &[&str]) -> Vec<String> {
        ws.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn duplicates_across_buffers_are_removed() {
        let (merged, removed) = eliminate_duplicates(vec![
            words(&["ab", "x"]),
            words(&["x", "ba"]),
            words(&[]),
            words(&["ab", ""]),
        ]);
        assert_eq!(removed, 2);
        assert_eq!(merged.len(), 4);
        assert_eq!(merged.iter().filter(|w| *w == "x").count(), 1);
    }

    #[test]
    fn collect_sums_stats() {
        let outputs = vec![
            WorkerOutput {
                words: words(&["a"]),
                stats: WorkerStats {
                    expanded: 3,
                    over_bound: 1,
                    already_claimed: 0,
                },
            },
            WorkerOutput {
                words: words(&["a", "b"]),
                stats: WorkerStats {
                    expanded: 2,
                    over_bound: 4,
                    already_claimed: 5,
                },
            },
        ];
        let language = collect(outputs, 2);
        assert_eq!(
            *language.stats(),
            SearchStats {
                workers: 2,
                expanded: 5,
                over_bound: 5,
                already_claimed: 5,
                duplicates_removed: 1,
            }
        );
        assert_eq!(language.len(), 2);
        assert!(language.contains("b"));
    }

    #[test]
    fn presentation_is_length_then_lexicographic() {
        let (merged, _) = eliminate_duplicates(vec![words(&["ba", "b", "", "ab", "aaa", "a"])]);
        let language = Language {
            words: merged,
            stats: Default::default(),
        };
        insta::assert_snapshot!(language.sorted().join("|"), @"|a|b|ab|ba|aaa");
        assert_eq!(language.clone().into_sorted(), language.sorted());
    }
}
