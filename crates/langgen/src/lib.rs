//! # langgen
//!
//! Enumerates the language of an unrestricted string-rewriting grammar: every
//! terminal word derivable from the start symbol, up to a maximum length,
//! exactly once.
//!
//! ## Grammars
//!
//! A [`Grammar`] is an ordered list of [`Production`]s, rewrite rules whose
//! left side may be any non-empty string of symbols. Uppercase ASCII letters
//! are nonterminals, every other printable character is a terminal. The
//! [`grammar`] module documents the compact text format used on the command
//! line, e.g. `=,S=Sa,S=x`.
//!
//! ## Searching
//!
//! [`generate`] explores the derivation space on a pool of worker threads
//! that share one work queue and one [`VisitedCache`]. Every
//! sentential form longer than the bound is discarded, which is what makes
//! the search finite even for grammars that never terminate on their own.
//! See [`scheduler`] for how the workers decide that the search is over.
//!
//! The resulting [`Language`] carries no particular order;
//! [`Language::into_sorted`] gives the usual presentation (shortest words
//! first, then lexicographically).
//!
//! ```
//! let language = langgen::generate_str("=,S=Sa,S=x", 4).unwrap();
//! assert_eq!(language.into_sorted(), ["x", "xa", "xaa", "xaaa"]);
//! ```

pub mod cache;
pub mod collector;
pub mod config;
pub mod error;
pub mod grammar;
pub mod matcher;
pub mod scheduler;
pub mod symbol;


pub use cache::VisitedCache;
pub use collector::{Language, SearchStats};
pub use config::Config;
pub use error::{MalformedGrammar, Result};
pub use grammar::{Grammar, Production};
pub use symbol::{SententialForm, Symbol};

/// Runs searches with a fixed [`Config`].
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: Config,
}

impl Generator {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
    pub fn config(&self) -> &Config {
        &self.config
    }
    /// Every terminal word of `grammar` with at most `max_length` symbols.
    #[tracing::instrument(skip_all, fields(max_length = max_length, workers = self.config.worker_count().get()))]
    pub fn generate(&self, grammar: &Grammar, max_length: usize) -> Language {
        let language = scheduler::search(
            grammar,
            max_length,
            self.config.worker_count(),
            self.config.poll_interval(),
        );
        tracing::debug!(words = language.len(), stats = ?language.stats(), "generated");
        language
    }
    /// Parse `text` and generate its language. A malformed grammar is
    /// reported before any worker starts.
    pub fn generate_str(&self, text: &str, max_length: usize) -> Result<Language> {
        let grammar = Grammar::parse(text)?;
        Ok(self.generate(&grammar, max_length))
    }
}

/// [`Generator::generate`] with the default configuration.
pub fn generate(grammar: &Grammar, max_length: usize) -> Language {
    Generator::default().generate(grammar, max_length)
}

/// [`Generator::generate_str`] with the default configuration.
pub fn generate_str(text: &str, max_length: usize) -> Result<Language> {
    Generator::default().generate_str(text, max_length)
}
