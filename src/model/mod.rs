//! Values held by the visualized structures
//!
//! Elements are atomic: a number or a piece of text.
//! A slot is an element position that may be empty, which is how the
//! array-encoded tree expresses "no node here".

mod sequence;

pub use sequence::{Sequence, StructureKind};

use std::fmt;

/// A stored value (numeric or textual)
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize, serde::Deserialize))]
pub enum Element {
    /// Token that parsed as a number
    Number(f64),

    /// Anything else, kept verbatim
    Text(String),
}

/// Position in a structure; `None` marks an absent tree node
pub type Slot = Option<Element>;

impl Element {
    /// Coerce a single token: numeric when it reads as a number literal,
    /// text otherwise.
    ///
    /// Accepts decimal and exponent forms, `0x`/`0o`/`0b` integers and
    /// `Infinity`. `inf`, `NaN` and other spellings stay text.
    pub fn from_token(token: &str) -> Self {
        match parse_number(token) {
            Some(number) => Element::Number(number),
            None => Element::Text(token.to_string()),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Number(n) => write!(f, "{}", n),
            Element::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Element {
    fn from(value: f64) -> Self {
        Element::Number(value)
    }
}

impl From<i32> for Element {
    fn from(value: i32) -> Self {
        Element::Number(f64::from(value))
    }
}

impl From<&str> for Element {
    fn from(value: &str) -> Self {
        Element::Text(value.to_string())
    }
}

impl From<String> for Element {
    fn from(value: String) -> Self {
        Element::Text(value)
    }
}

fn parse_number(token: &str) -> Option<f64> {
    let radix = match token.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &token[2..];
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return None;
        }
        return u128::from_str_radix(digits, radix).ok().map(|n| n as f64);
    }

    let unsigned = token.strip_prefix(['+', '-']).unwrap_or(token);
    if unsigned == "Infinity" {
        return Some(if token.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }
    // `f64::from_str` also takes `inf` and `nan` spellings
    if unsigned
        .chars()
        .any(|c| c.is_alphabetic() && c != 'e' && c != 'E')
    {
        return None;
    }
    token.parse::<f64>().ok()
}

fn tokens(input: &str) -> impl Iterator<Item = &str> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Parse free text into elements.
///
/// Splits on whitespace and commas; empty or blank input yields an empty list.
pub fn parse_values(input: &str) -> Vec<Element> {
    tokens(input).map(Element::from_token).collect()
}

/// Parse free text into slots, mapping `gap` (when given) to an absent slot.
///
/// Without a gap token every slot is present, matching [`parse_values`].
pub fn parse_slots(input: &str, gap: Option<&str>) -> Vec<Slot> {
    tokens(input)
        .map(|token| match gap {
            Some(gap) if token == gap => None,
            _ => Some(Element::from_token(token)),
        })
        .collect()
}

/// Search target, typed when it is set
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize, serde::Deserialize))]
pub enum Target {
    /// Compared with numeric equality against numeric elements
    Number(f64),

    /// Compared with exact text equality against textual elements
    Text(String),
}

impl Target {
    /// Parse user input; blank input means "no target".
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(match Element::from_token(trimmed) {
            Element::Number(n) => Target::Number(n),
            Element::Text(s) => Target::Text(s),
        })
    }

    /// Does `element` equal this target?
    ///
    /// Numbers never equal text, even when they print the same.
    pub fn matches(&self, element: &Element) -> bool {
        match (self, element) {
            (Target::Number(t), Element::Number(v)) => t == v,
            (Target::Text(t), Element::Text(v)) => t == v,
            _ => false,
        }
    }

    /// Slot-aware variant of [`Target::matches`]
    pub fn matches_slot(&self, slot: Option<&Element>) -> bool {
        slot.is_some_and(|element| self.matches(element))
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Number(n) => write!(f, "{}", n),
            Target::Text(s) => f.write_str(s),
        }
    }
}
