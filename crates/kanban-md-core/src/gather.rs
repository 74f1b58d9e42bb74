//! Gather rule expressions
//!
//! The text after `#gather_` in a column title is a boolean expression over a
//! card's tags:
//!
//! ```text
//! or      := and ('|' and)*
//! and     := unary ('&' unary)*
//! unary   := '!' unary | atom
//! atom    := '(' or ')' | word [op word]
//! op      := '<' | '>' | '=' | '!='
//! ```
//!
//! `word op word` is a comparison; a lone word tests for a person tag.
//! Comparisons written number-first (`0<day`) are flipped to property-first.

use chrono::{Datelike, NaiveDate};

use crate::card_meta::CardMeta;
use crate::error::KanbanError;

const WEEKDAYS: [&str; 7] = ["mon", "tue", "wed", "thu", "fri", "sat", "sun"];
const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `=`
    Eq,
    /// `!=`
    Ne,
}

impl CompareOp {
    /// Operator with operands swapped (`0<day` is `day>0`)
    fn flipped(self) -> Self {
        match self {
            CompareOp::Lt => CompareOp::Gt,
            CompareOp::Gt => CompareOp::Lt,
            other => other,
        }
    }

    fn apply(self, actual: i64, expected: i64) -> bool {
        match self {
            CompareOp::Lt => actual < expected,
            CompareOp::Gt => actual > expected,
            CompareOp::Eq => actual == expected,
            CompareOp::Ne => actual != expected,
        }
    }
}

/// Left-hand side of a comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Property {
    /// `dayoffset` / `day`: days from today to the card date
    DayOffset,
    /// `weekday` / `weekdaynum`: ISO weekday of the card date, Monday = 1
    Weekday,
    /// `month` / `monthnum`: month of the card date
    Month,
    /// Any other name: presence of that person tag
    Person(String),
}

impl Property {
    fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "dayoffset" | "day" => Property::DayOffset,
            "weekday" | "weekdaynum" => Property::Weekday,
            "month" | "monthnum" => Property::Month,
            other => Property::Person(other.to_string()),
        }
    }
}

/// Parsed gather expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Any child matches
    Or(Vec<Expr>),
    /// All children match
    And(Vec<Expr>),
    /// Inner does not match
    Not(Box<Expr>),
    /// `property op value`
    Compare {
        property: Property,
        op: CompareOp,
        value: String,
    },
    /// Card names this person
    Person(String),
}

impl Expr {
    /// Evaluate against a card's tags, with day offsets relative to `today`
    pub fn evaluate(&self, meta: &CardMeta, today: NaiveDate) -> bool {
        match self {
            Expr::Or(children) => children.iter().any(|e| e.evaluate(meta, today)),
            Expr::And(children) => children.iter().all(|e| e.evaluate(meta, today)),
            Expr::Not(inner) => !inner.evaluate(meta, today),
            Expr::Person(name) => meta.has_person(name),
            Expr::Compare {
                property,
                op,
                value,
            } => compare(property, *op, value, meta, today),
        }
    }
}

fn compare(
    property: &Property,
    op: CompareOp,
    value: &str,
    meta: &CardMeta,
    today: NaiveDate,
) -> bool {
    if let Property::Person(name) = property {
        let truthy = matches!(value.to_lowercase().as_str(), "1" | "true");
        let has = meta.has_person(name);
        return match op {
            CompareOp::Eq => has == truthy,
            CompareOp::Ne => has != truthy,
            CompareOp::Lt | CompareOp::Gt => false,
        };
    }

    let Some(date) = meta.date() else {
        return false;
    };

    let (actual, expected) = match property {
        Property::DayOffset => ((date - today).num_days(), value.parse::<i64>().ok()),
        Property::Weekday => (
            i64::from(date.weekday().number_from_monday()),
            parse_named_number(value, &WEEKDAYS),
        ),
        Property::Month => (i64::from(date.month()), parse_named_number(value, &MONTHS)),
        Property::Person(_) => return false,
    };

    expected.is_some_and(|expected| op.apply(actual, expected))
}

/// `3`, `wed` or `wednesday` to a 1-based index into `names`
fn parse_named_number(value: &str, names: &[&str]) -> Option<i64> {
    if let Ok(n) = value.parse::<i64>() {
        return (1..=names.len() as i64).contains(&n).then_some(n);
    }
    let lower = value.to_lowercase();
    if lower.len() < 3 {
        return None;
    }
    names
        .iter()
        .position(|name| lower.starts_with(name))
        .map(|i| i as i64 + 1)
}

// === Parsing ===

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Or,
    And,
    Not,
    Open,
    Close,
    Op(CompareOp),
    Word(String),
}

fn tokenize(src: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = src.chars().peekable();

    while let Some(ch) = chars.next() {
        let token = match ch {
            c if c.is_whitespace() => continue,
            '|' => Token::Or,
            '&' => Token::And,
            '(' => Token::Open,
            ')' => Token::Close,
            '<' => Token::Op(CompareOp::Lt),
            '>' => Token::Op(CompareOp::Gt),
            '=' => Token::Op(CompareOp::Eq),
            '!' => {
                if chars.peek() == Some(&'=') {
                    chars.next();
                    Token::Op(CompareOp::Ne)
                } else {
                    Token::Not
                }
            }
            c => {
                let mut word = String::from(c);
                while let Some(&next) = chars.peek() {
                    if next.is_whitespace() || "|&()<>=!".contains(next) {
                        break;
                    }
                    word.push(next);
                    chars.next();
                }
                Token::Word(word)
            }
        };
        tokens.push(token);
    }

    tokens
}

struct ExprParser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl ExprParser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn error(&self, reason: impl Into<String>) -> KanbanError {
        KanbanError::InvalidRule {
            rule: self.source.to_string(),
            reason: reason.into(),
        }
    }

    fn parse_or(&mut self) -> Result<Expr, KanbanError> {
        let mut children = vec![self.parse_and()?];
        while self.peek() == Some(&Token::Or) {
            self.next();
            children.push(self.parse_and()?);
        }
        Ok(collapse(children, Expr::Or))
    }

    fn parse_and(&mut self) -> Result<Expr, KanbanError> {
        let mut children = vec![self.parse_unary()?];
        while self.peek() == Some(&Token::And) {
            self.next();
            children.push(self.parse_unary()?);
        }
        Ok(collapse(children, Expr::And))
    }

    fn parse_unary(&mut self) -> Result<Expr, KanbanError> {
        if self.peek() == Some(&Token::Not) {
            self.next();
            return Ok(Expr::Not(Box::new(self.parse_unary()?)));
        }
        self.parse_atom()
    }

    fn parse_atom(&mut self) -> Result<Expr, KanbanError> {
        match self.next() {
            Some(Token::Open) => {
                let inner = self.parse_or()?;
                match self.next() {
                    Some(Token::Close) => Ok(inner),
                    _ => Err(self.error("missing ')'")),
                }
            }
            Some(Token::Word(left)) => {
                let Some(Token::Op(op)) = self.peek().cloned() else {
                    return Ok(Expr::Person(left.to_lowercase()));
                };
                self.next();
                match self.next() {
                    Some(Token::Word(right)) => Ok(comparison(left, op, right)),
                    _ => Err(self.error("comparison is missing a value")),
                }
            }
            Some(token) => Err(self.error(format!("unexpected {:?}", token))),
            None => Err(self.error("unexpected end of expression")),
        }
    }
}

fn collapse(mut children: Vec<Expr>, wrap: fn(Vec<Expr>) -> Expr) -> Expr {
    if children.len() == 1 {
        children.remove(0)
    } else {
        wrap(children)
    }
}

fn comparison(left: String, op: CompareOp, right: String) -> Expr {
    let left_numeric = left.parse::<i64>().is_ok();
    let right_numeric = right.parse::<i64>().is_ok();
    let (property, op, value) = if left_numeric && !right_numeric {
        (right, op.flipped(), left)
    } else {
        (left, op, right)
    };
    Expr::Compare {
        property: Property::from_name(&property),
        op,
        value,
    }
}

/// Parse a gather expression
pub fn parse_expr(source: &str) -> Result<Expr, KanbanError> {
    let mut parser = ExprParser {
        source,
        tokens: tokenize(source),
        pos: 0,
    };
    let expr = parser.parse_or()?;
    if parser.pos < parser.tokens.len() {
        return Err(parser.error("trailing input"));
    }
    Ok(expr)
}

/// A `#gather_<expr>` rule; malformed expressions never match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatherRule {
    /// Expression text as written after `#gather_`
    pub source: String,
    expr: Option<Expr>,
}

impl GatherRule {
    /// Parse a rule, logging and disabling it if the expression is malformed
    pub fn parse(source: &str) -> Self {
        let expr = match parse_expr(source) {
            Ok(expr) => Some(expr),
            Err(err) => {
                tracing::debug!(error = %err, "gather rule disabled");
                None
            }
        };
        Self {
            source: source.to_string(),
            expr,
        }
    }

    /// Whether the expression parsed
    pub fn is_valid(&self) -> bool {
        self.expr.is_some()
    }

    /// Whether a card with these tags is claimed by the rule
    pub fn matches(&self, meta: &CardMeta, today: NaiveDate) -> bool {
        self.expr
            .as_ref()
            .is_some_and(|expr| expr.evaluate(meta, today))
    }
}
