use std::fmt;

use smallvec::SmallVec;

/// A grammar symbol, classified once when the grammar is loaded.
///
/// Uppercase ASCII letters are nonterminals, every other character is a
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    Terminal(char),
    Nonterminal(char),
}

impl Symbol {
    pub fn classify(c: char) -> Self {
        if c.is_ascii_uppercase() {
            Symbol::Nonterminal(c)
        } else {
            Symbol::Terminal(c)
        }
    }
    pub fn as_char(self) -> char {
        match self {
            Symbol::Terminal(c) | Symbol::Nonterminal(c) => c,
        }
    }
    pub fn is_terminal(self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A derivation state: the symbols of a partially or fully rewritten string.
///
/// Equality and hashing are by exact symbol sequence, which is what the
/// visited cache keys on.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SententialForm {
    symbols: SmallVec<[Symbol; 16]>,
}

impl SententialForm {
    pub fn new(symbols: impl IntoIterator<Item = Symbol>) -> Self {
        symbols.into_iter().collect()
    }
    pub fn parse(text: &str) -> Self {
        text.chars().map(Symbol::classify).collect()
    }
    pub fn start(symbol: Symbol) -> Self {
        Self::new([symbol])
    }
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }
    pub fn len(&self) -> usize {
        self.symbols.len()
    }
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
    /// A form is terminal, i.e. a word of the language, iff it contains no
    /// nonterminal.
    pub fn is_terminal(&self) -> bool {
        self.symbols.iter().all(|s| s.is_terminal())
    }
    /// Replace the `len` symbols starting at `at` with `with`.
    pub(crate) fn splice(&self, at: usize, len: usize, with: &[Symbol]) -> Self {
        let mut symbols = SmallVec::with_capacity(self.symbols.len() - len + with.len());
        symbols.extend_from_slice(&self.symbols[..at]);
        symbols.extend_from_slice(with);
        symbols.extend_from_slice(&self.symbols[at + len..]);
        Self { symbols }
    }
    pub fn to_word(&self) -> String {
        self.symbols.iter().map(|s| s.as_char()).collect()
    }
}

impl FromIterator<Symbol> for SententialForm {
    fn from_iter<T: IntoIterator<Item = Symbol>>(iter: T) -> Self {
        Self {
            symbols: iter.into_iter().collect(),
        }
    }
}

impl fmt::Debug for SententialForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.to_word())
    }
}

impl fmt::Display for SententialForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for s in &self.symbols {
            write!(f, "{s}")?;
        }
        Ok(())
    }
}
