//! Card query micro-language.
//!
//! The engine only ever talks to the card corpus in this vocabulary:
//!
//! | syntax | meaning |
//! |---|---|
//! | `name:"Sol Ring"` | exact name (case-insensitive) |
//! | `oracle:"draw a card"` | substring of the rules text |
//! | `type:creature` | substring of the type line |
//! | `identity:WUBG` | card identity fits inside the given colors |
//! | `legal:commander` | commander-legal cards only |
//! | `id:42` | a single card by id |
//! | `mv<=3`, `mv>=5`, `mv=2` | mana value comparison |
//! | `order:-price` | ordering hint (`price`, `mv`, `name`, `-` for descending) |
//! | bare words | exact name or rules-text substring |
//!
//! A query is built with the typed constructors below and rendered with
//! `Display`; `FromStr` parses the same syntax back.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::card::Card;
use super::color::ColorIdentity;
use super::ids::CardId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("unknown query key '{0}'")]
    UnknownKey(String),

    #[error("empty value for query key '{0}'")]
    EmptyValue(String),

    #[error("invalid value '{value}' for query key '{key}'")]
    InvalidValue { key: String, value: String },

    #[error("unterminated quote in query")]
    UnterminatedQuote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparison {
    AtMost,
    AtLeast,
    Exactly,
}

impl Comparison {
    fn holds(self, left: u32, right: u32) -> bool {
        match self {
            Comparison::AtMost => left <= right,
            Comparison::AtLeast => left >= right,
            Comparison::Exactly => left == right,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Comparison::AtMost => "<=",
            Comparison::AtLeast => ">=",
            Comparison::Exactly => "=",
        }
    }
}

/// Ordering hint. Corpora without the hint return rank order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryOrder {
    PriceAsc,
    PriceDesc,
    ManaValueAsc,
    ManaValueDesc,
    Name,
}

impl QueryOrder {
    fn as_str(self) -> &'static str {
        match self {
            QueryOrder::PriceAsc => "price",
            QueryOrder::PriceDesc => "-price",
            QueryOrder::ManaValueAsc => "mv",
            QueryOrder::ManaValueDesc => "-mv",
            QueryOrder::Name => "name",
        }
    }

    pub fn compare(self, a: &Card, b: &Card) -> Ordering {
        match self {
            QueryOrder::PriceAsc => a.price.total_cmp(&b.price),
            QueryOrder::PriceDesc => b.price.total_cmp(&a.price),
            QueryOrder::ManaValueAsc => a.mana_value.cmp(&b.mana_value),
            QueryOrder::ManaValueDesc => b.mana_value.cmp(&a.mana_value),
            QueryOrder::Name => a.name.cmp(&b.name),
        }
    }
}

impl FromStr for QueryOrder {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price" => Ok(QueryOrder::PriceAsc),
            "-price" => Ok(QueryOrder::PriceDesc),
            "mv" => Ok(QueryOrder::ManaValueAsc),
            "-mv" => Ok(QueryOrder::ManaValueDesc),
            "name" => Ok(QueryOrder::Name),
            _ => Err(QueryError::InvalidValue {
                key: "order".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QueryTerm {
    Name(String),
    Oracle(String),
    Type(String),
    Identity(ColorIdentity),
    LegalCommander,
    Id(CardId),
    ManaValue(Comparison, u32),
    Text(String),
}

impl QueryTerm {
    pub fn matches(&self, card: &Card) -> bool {
        match self {
            QueryTerm::Name(name) => card.name.eq_ignore_ascii_case(name),
            QueryTerm::Oracle(text) => contains_ignore_case(&card.oracle_text, text),
            QueryTerm::Type(ty) => contains_ignore_case(&card.type_line, ty),
            QueryTerm::Identity(identity) => identity.allows(&card.identity),
            QueryTerm::LegalCommander => card.legal_commander,
            QueryTerm::Id(id) => card.id == *id,
            QueryTerm::ManaValue(cmp, value) => cmp.holds(card.mana_value, *value),
            QueryTerm::Text(text) => {
                card.name.eq_ignore_ascii_case(text) || contains_ignore_case(&card.oracle_text, text)
            }
        }
    }
}

impl fmt::Display for QueryTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryTerm::Name(name) => write!(f, "name:\"{name}\""),
            QueryTerm::Oracle(text) => write!(f, "oracle:\"{text}\""),
            QueryTerm::Type(ty) => write!(f, "type:{}", quote_if_spaced(ty)),
            QueryTerm::Identity(identity) => write!(f, "identity:{identity}"),
            QueryTerm::LegalCommander => write!(f, "legal:commander"),
            QueryTerm::Id(id) => write!(f, "id:{}", id.get()),
            QueryTerm::ManaValue(cmp, value) => write!(f, "mv{}{value}", cmp.symbol()),
            QueryTerm::Text(text) => f.write_str(text),
        }
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn quote_if_spaced(s: &str) -> String {
    if s.contains(char::is_whitespace) {
        format!("\"{s}\"")
    } else {
        s.to_string()
    }
}

/// A conjunction of terms plus an optional ordering hint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardQuery {
    terms: Vec<QueryTerm>,
    order: Option<QueryOrder>,
}

impl CardQuery {
    /// Matches every card (subject to later filters).
    pub fn any() -> Self {
        Self::default()
    }

    pub fn name(name: impl Into<String>) -> Self {
        Self::any().and(QueryTerm::Name(name.into()))
    }

    pub fn oracle(text: impl Into<String>) -> Self {
        Self::any().and(QueryTerm::Oracle(text.into()))
    }

    pub fn type_is(ty: impl Into<String>) -> Self {
        Self::any().and(QueryTerm::Type(ty.into()))
    }

    pub fn by_id(id: CardId) -> Self {
        Self::any().and(QueryTerm::Id(id))
    }

    pub fn and(mut self, term: QueryTerm) -> Self {
        self.terms.push(term);
        self
    }

    pub fn and_type(self, ty: impl Into<String>) -> Self {
        self.and(QueryTerm::Type(ty.into()))
    }

    pub fn and_oracle(self, text: impl Into<String>) -> Self {
        self.and(QueryTerm::Oracle(text.into()))
    }

    pub fn within(self, identity: ColorIdentity) -> Self {
        self.and(QueryTerm::Identity(identity))
    }

    pub fn legal(self) -> Self {
        self.and(QueryTerm::LegalCommander)
    }

    pub fn mana_value(self, cmp: Comparison, value: u32) -> Self {
        self.and(QueryTerm::ManaValue(cmp, value))
    }

    pub fn order_by(mut self, order: QueryOrder) -> Self {
        self.order = Some(order);
        self
    }

    pub fn terms(&self) -> &[QueryTerm] {
        &self.terms
    }

    pub fn order(&self) -> Option<QueryOrder> {
        self.order
    }

    pub fn matches(&self, card: &Card) -> bool {
        self.terms.iter().all(|t| t.matches(card))
    }
}

impl fmt::Display for CardQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for term in &self.terms {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{term}")?;
            first = false;
        }
        if let Some(order) = self.order {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "order:{}", order.as_str())?;
        }
        Ok(())
    }
}

impl FromStr for CardQuery {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut query = CardQuery::any();
        let mut free_text: Vec<String> = Vec::new();

        for token in tokenize(s)? {
            if let Some(rest) = token.strip_prefix("mv")
                && let Some(term) = parse_mana_value(rest)?
            {
                query.terms.push(term);
                continue;
            }

            let Some((key, value)) = token.split_once(':') else {
                free_text.push(unquote(&token).to_string());
                continue;
            };
            let value = unquote(value);
            if value.is_empty() {
                return Err(QueryError::EmptyValue(key.to_string()));
            }
            let invalid = || QueryError::InvalidValue {
                key: key.to_string(),
                value: value.to_string(),
            };

            match key.to_ascii_lowercase().as_str() {
                "name" => query.terms.push(QueryTerm::Name(value.to_string())),
                "oracle" | "o" => query.terms.push(QueryTerm::Oracle(value.to_string())),
                "type" | "t" => query.terms.push(QueryTerm::Type(value.to_string())),
                "identity" | "ci" => {
                    let identity = value.parse().map_err(|_| invalid())?;
                    query.terms.push(QueryTerm::Identity(identity));
                }
                "legal" => {
                    if !value.eq_ignore_ascii_case("commander") {
                        return Err(invalid());
                    }
                    query.terms.push(QueryTerm::LegalCommander);
                }
                "id" => {
                    let id: u64 = value.parse().map_err(|_| invalid())?;
                    query.terms.push(QueryTerm::Id(CardId::new(id)));
                }
                "order" => query.order = Some(value.parse()?),
                _ => return Err(QueryError::UnknownKey(key.to_string())),
            }
        }

        if !free_text.is_empty() {
            query.terms.push(QueryTerm::Text(free_text.join(" ")));
        }
        Ok(query)
    }
}

/// Split on whitespace, keeping quoted runs together (quotes are kept).
fn tokenize(s: &str) -> Result<Vec<String>, QueryError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quote = false;

    for c in s.chars() {
        match c {
            '"' => {
                in_quote = !in_quote;
                current.push(c);
            }
            c if c.is_whitespace() && !in_quote => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if in_quote {
        return Err(QueryError::UnterminatedQuote);
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    Ok(tokens)
}

fn unquote(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(s)
}

fn parse_mana_value(rest: &str) -> Result<Option<QueryTerm>, QueryError> {
    let (cmp, number) = if let Some(n) = rest.strip_prefix("<=") {
        (Comparison::AtMost, n)
    } else if let Some(n) = rest.strip_prefix(">=") {
        (Comparison::AtLeast, n)
    } else if let Some(n) = rest.strip_prefix('=') {
        (Comparison::Exactly, n)
    } else {
        return Ok(None);
    };
    let value = number.parse().map_err(|_| QueryError::InvalidValue {
        key: "mv".to_string(),
        value: number.to_string(),
    })?;
    Ok(Some(QueryTerm::ManaValue(cmp, value)))
}
