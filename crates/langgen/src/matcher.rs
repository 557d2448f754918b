//! Single-step rewriting of sentential forms.

use crate::{
    grammar::{Grammar, Production},
    symbol::{SententialForm, Symbol},
};

/// Start indices of every occurrence of `production`'s left side in `form`,
/// overlapping ones included. An empty left side never occurs; [`Grammar`]
/// refuses to hold one.
pub fn occurrences<'a>(form: &'a SententialForm, production: &'a Production) -> Occurrences<'a> {
    Occurrences {
        symbols: form.symbols(),
        pattern: production.lhs(),
        at: 0,
    }
}

/// Every form obtained by replacing one occurrence of `production`'s left
/// side in `form` with its right side.
///
/// Each start index yields its own successor, even when two of them spell
/// the same string.
pub fn rewrites<'a>(
    form: &'a SententialForm,
    production: &'a Production,
) -> impl Iterator<Item = SententialForm> + 'a {
    occurrences(form, production)
        .map(move |at| form.splice(at, production.lhs().len(), production.rhs()))
}

/// All single-step successors of `form` under `grammar`, production by
/// production in declaration order.
pub fn successors<'a>(
    form: &'a SententialForm,
    grammar: &'a Grammar,
) -> impl Iterator<Item = SententialForm> + 'a {
    grammar
        .productions()
        .iter()
        .flat_map(move |production| rewrites(form, production))
}

#[derive(Debug, Clone)]
pub struct Occurrences<'a> {
    symbols: &'a [Symbol],
    pattern: &'a [Symbol],
    at: usize,
}

impl Iterator for Occurrences<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.pattern.is_empty() {
            return None;
        }
        while self.at + self.pattern.len() <= self.symbols.len() {
            let at = self.at;
            self.at += 1;
            if self.symbols[at..at + self.pattern.len()] == *self.pattern {
                return Some(at);
            }
        }
        None
    }
}
