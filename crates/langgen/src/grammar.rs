//! Rewrite rules and the text format grammars are written in.
//!
//! A grammar is written without whitespace. The first character separates
//! the left side of a rule from its right side, the second separates rules:
//!
//! ```text
//! =,S=Sa,S=x
//! ```
//!
//! is the grammar with the rules `S -> S a` and `S -> x`, whose start symbol
//! is `S`.

use std::fmt;

use itertools::Itertools;

use crate::{
    error::{MalformedGrammar, Result},
    symbol::{SententialForm, Symbol},
};

/// A rewrite rule `lhs -> rhs`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Production {
    lhs: Box<[Symbol]>,
    rhs: Box<[Symbol]>,
}

impl Production {
    pub fn new(lhs: &str, rhs: &str) -> Self {
        Self {
            lhs: lhs.chars().map(Symbol::classify).collect(),
            rhs: rhs.chars().map(Symbol::classify).collect(),
        }
    }
    pub fn lhs(&self) -> &[Symbol] {
        &self.lhs
    }
    pub fn rhs(&self) -> &[Symbol] {
        &self.rhs
    }
    /// Length of a form of length `len` after this rule is applied to it
    /// once, or `None` if the left side does not fit.
    pub fn rewritten_len(&self, len: usize) -> Option<usize> {
        len.checked_sub(self.lhs.len()).map(|rest| rest + self.rhs.len())
    }
    fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.lhs.iter().chain(self.rhs.iter()).copied()
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}",
            self.lhs.iter().format(" "),
            self.rhs.iter().format(" ")
        )
    }
}

/// An ordered list of productions. The start symbol is the first symbol of
/// the first production's left side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    productions: Vec<Production>,
    start: Symbol,
}

impl Grammar {
    /// Validate a production list. Every left side must be non-empty, since
    /// an empty pattern matches at every position of every string.
    pub fn new(productions: Vec<Production>) -> Result<Self> {
        for (rule, p) in productions.iter().enumerate() {
            if p.lhs.is_empty() {
                return Err(MalformedGrammar::EmptyLeftSide { rule });
            }
            if let Some(symbol) = p.symbols().map(Symbol::as_char).find(|c| !is_printable(*c)) {
                return Err(MalformedGrammar::InvalidSymbol { rule, symbol });
            }
        }
        let start = productions
            .first()
            .map(|p| p.lhs[0])
            .ok_or(MalformedGrammar::EmptyGrammar)?;
        Ok(Self { productions, start })
    }
    /// Read a grammar from its text form.
    pub fn parse(text: &str) -> Result<Self> {
        Self::new(read(text)?)
    }
    pub fn productions(&self) -> &[Production] {
        &self.productions
    }
    pub fn start(&self) -> Symbol {
        self.start
    }
    pub fn start_form(&self) -> SententialForm {
        SententialForm::start(self.start)
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.productions.iter().format("\n"))
    }
}

impl std::str::FromStr for Grammar {
    type Err = MalformedGrammar;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Split grammar text into its productions, in declaration order.
///
/// Only the separators are checked here; [`Grammar::new`] validates the
/// productions themselves.
pub fn read(text: &str) -> Result<Vec<Production>> {
    let mut chars = text.chars();
    let (Some(deduct), Some(separator)) = (chars.next(), chars.next()) else {
        return Err(MalformedGrammar::MissingSeparators);
    };
    if deduct == separator {
        return Err(MalformedGrammar::AmbiguousSeparators { separator });
    }

    let mut fields = chars.as_str().split(separator).collect_vec();
    // Trailing separators are allowed, empty rules elsewhere are not.
    while fields.last() == Some(&"") {
        fields.pop();
    }

    fields
        .into_iter()
        .enumerate()
        .map(|(rule, field)| match field.split_once(deduct) {
            Some((lhs, rhs)) => Ok(Production::new(lhs, rhs)),
            None => Err(MalformedGrammar::MissingDeduct {
                rule,
                text: field.to_string(),
                deduct,
            }),
        })
        .collect()
}

fn is_printable(c: char) -> bool {
    c.is_ascii_graphic()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_rules_in_order() {
        let productions = read("=,S=Sa,S=x").unwrap();
        assert_eq!(
            productions,
            vec![Production::new("S", "Sa"), Production::new("S", "x")]
        );
    }

    #[test]
    fn right_side_may_be_empty() {
        let grammar = Grammar::parse(":,P:,P:Q,Q:a").unwrap();
        assert!(grammar.productions()[0].rhs().is_empty());
        assert_eq!(grammar.start(), Symbol::Nonterminal('P'));
    }

    #[test]
    fn right_side_keeps_later_deduct_characters() {
        let productions = read("=;S=a=b").unwrap();
        assert_eq!(productions, vec![Production::new("S", "a=b")]);
    }

    #[test]
    fn list_may_end_with_separators() {
        assert_eq!(read("=,S=x,").unwrap(), read("=,S=x").unwrap());
        assert_eq!(read("=,S=x,,").unwrap(), vec![Production::new("S", "x")]);
    }

    #[test]
    fn rejects_missing_separators() {
        assert_eq!(read(""), Err(MalformedGrammar::MissingSeparators));
        assert_eq!(read("="), Err(MalformedGrammar::MissingSeparators));
        assert_eq!(
            read("==S=x"),
            Err(MalformedGrammar::AmbiguousSeparators { separator: '=' })
        );
    }

    #[test]
    fn rejects_rule_without_deduct() {
        assert_eq!(
            read(":,P:Q,S=SS,Q:a"),
            Err(MalformedGrammar::MissingDeduct {
                rule: 1,
                text: "S=SS".to_string(),
                deduct: ':',
            })
        );
        assert!(matches!(
            read("=,S=x,,S=y"),
            Err(MalformedGrammar::MissingDeduct { rule: 1, .. })
        ));
    }

    #[test]
    fn rejects_empty_left_side() {
        assert_eq!(
            Grammar::parse("=,S=a,=b"),
            Err(MalformedGrammar::EmptyLeftSide { rule: 1 })
        );
        assert_eq!(
            Grammar::new(vec![Production::new("", "a")]),
            Err(MalformedGrammar::EmptyLeftSide { rule: 0 })
        );
    }

    #[test]
    fn rejects_empty_grammar() {
        assert_eq!(Grammar::parse("=,"), Err(MalformedGrammar::EmptyGrammar));
        assert_eq!(Grammar::new(vec![]), Err(MalformedGrammar::EmptyGrammar));
    }

    #[test]
    fn rejects_unprintable_symbols() {
        assert_eq!(
            Grammar::parse("=,S=a b"),
            Err(MalformedGrammar::InvalidSymbol {
                rule: 0,
                symbol: ' '
            })
        );
    }

    #[test]
    fn error_messages() {
        insta::assert_snapshot!(
            Grammar::parse(":,P:Q,S=SS").unwrap_err(),
            @"rule 1 ('S=SS') has no ':' between its left and right side"
        );
        insta::assert_snapshot!(
            Grammar::parse("=,S=\tx").unwrap_err(),
            @r"rule 0 contains '\t' which is not a printable ASCII symbol"
        );
    }

    #[test]
    fn pretty_print() {
        let grammar = Grammar::parse("=;S=();S=(S);S=()S;S=(S)S").unwrap();
        insta::assert_snapshot!(grammar, @r###"
        S -> ( )
        S -> ( S )
        S -> ( ) S
        S -> ( S ) S
        "###);
    }
}
