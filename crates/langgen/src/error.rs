/// A grammar that cannot be searched.
///
/// Rule indices are zero-based and count rules in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedGrammar {
    #[error("grammar text must start with a deduct separator and a rule separator")]
    MissingSeparators,
    #[error("the deduct and rule separators are both '{separator}'")]
    AmbiguousSeparators { separator: char },
    #[error("rule {rule} ('{text}') has no '{deduct}' between its left and right side")]
    MissingDeduct {
        rule: usize,
        text: String,
        deduct: char,
    },
    #[error("rule {rule} has an empty left side")]
    EmptyLeftSide { rule: usize },
    #[error("rule {rule} contains '{}' which is not a printable ASCII symbol", .symbol.escape_default())]
    InvalidSymbol { rule: usize, symbol: char },
    #[error("grammar has no rules, so there is no start symbol")]
    EmptyGrammar,
}

pub type Result<T, E = MalformedGrammar> = std::result::Result<T, E>;
