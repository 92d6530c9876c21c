//! Anchor keys in pattern documents.
//!
//! An anchor is a mapping key of the form `<modifier>(<field>)`:
//!
//! | Key form     | Kind                 |
//! |--------------|----------------------|
//! | `(field)`    | [`AnchorKind::Condition`] |
//! | `^(field)`   | [`AnchorKind::Existence`] |
//! | `=(field)`   | [`AnchorKind::Equality`] |
//! | `X(field)`   | [`AnchorKind::Negation`] |
//! | `<(field)`   | [`AnchorKind::Global`] |
//! | `+(field)`   | [`AnchorKind::AddIfNotPresent`] |

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

static ANCHOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<modifier>[+<=X^])?\((?P<key>.+)\)$").unwrap());

static ANCHOR_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+<=X^]?\(").unwrap());

/// Classification of an anchor key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorKind {
    Condition,
    Existence,
    Equality,
    Negation,
    Global,
    /// Only meaningful in mutate overlays.
    AddIfNotPresent,
}

impl AnchorKind {
    pub const ALL: [AnchorKind; 6] = [
        AnchorKind::Condition,
        AnchorKind::Existence,
        AnchorKind::Equality,
        AnchorKind::Negation,
        AnchorKind::Global,
        AnchorKind::AddIfNotPresent,
    ];

    fn from_modifier(modifier: Option<&str>) -> Option<AnchorKind> {
        match modifier {
            None => Some(AnchorKind::Condition),
            Some("^") => Some(AnchorKind::Existence),
            Some("=") => Some(AnchorKind::Equality),
            Some("X") => Some(AnchorKind::Negation),
            Some("<") => Some(AnchorKind::Global),
            Some("+") => Some(AnchorKind::AddIfNotPresent),
            Some(_) => None,
        }
    }

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for AnchorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnchorKind::Condition => "condition",
            AnchorKind::Existence => "existence",
            AnchorKind::Equality => "equality",
            AnchorKind::Negation => "negation",
            AnchorKind::Global => "global",
            AnchorKind::AddIfNotPresent => "add-if-not-present",
        };
        f.write_str(name)
    }
}

/// A parsed anchor key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Anchor<'a> {
    pub kind: AnchorKind,
    /// The field name inside the parentheses.
    pub key: &'a str,
}

/// Result of classifying a mapping key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyForm<'a> {
    /// A plain field name.
    Field(&'a str),
    Anchor(Anchor<'a>),
    /// Starts like an anchor but does not parse as one, e.g. `(name` or `^()`.
    Malformed(&'a str),
}

/// Classify a pattern mapping key.
pub fn classify(key: &str) -> KeyForm<'_> {
    if let Some(caps) = ANCHOR_RE.captures(key) {
        let modifier = caps.name("modifier").map(|m| m.as_str());
        let inner = caps.name("key").map(|m| m.as_str());
        if let (Some(kind), Some(inner)) = (AnchorKind::from_modifier(modifier), inner) {
            return KeyForm::Anchor(Anchor { kind, key: inner });
        }
        return KeyForm::Malformed(key);
    }
    if ANCHOR_PREFIX_RE.is_match(key) {
        return KeyForm::Malformed(key);
    }
    KeyForm::Field(key)
}

/// Parse `key` as an anchor, returning `None` for plain and malformed keys.
pub fn parse(key: &str) -> Option<Anchor<'_>> {
    match classify(key) {
        KeyForm::Anchor(anchor) => Some(anchor),
        KeyForm::Field(_) | KeyForm::Malformed(_) => None,
    }
}

/// The set of anchor kinds accepted at one validation site.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<AnchorKind>", into = "Vec<AnchorKind>")]
pub struct AnchorSet(u8);

impl AnchorSet {
    pub const EMPTY: AnchorSet = AnchorSet(0);

    /// Anchors legal in a `validate` pattern.
    pub const VALIDATE: AnchorSet = AnchorSet::EMPTY
        .with(AnchorKind::Condition)
        .with(AnchorKind::Existence)
        .with(AnchorKind::Equality)
        .with(AnchorKind::Negation)
        .with(AnchorKind::Global);

    pub const fn with(self, kind: AnchorKind) -> AnchorSet {
        AnchorSet(self.0 | kind.bit())
    }

    pub const fn without(self, kind: AnchorKind) -> AnchorSet {
        AnchorSet(self.0 & !kind.bit())
    }

    pub const fn contains(self, kind: AnchorKind) -> bool {
        self.0 & kind.bit() != 0
    }

    pub fn iter(self) -> impl Iterator<Item = AnchorKind> {
        AnchorKind::ALL.into_iter().filter(move |k| self.contains(*k))
    }
}

impl FromIterator<AnchorKind> for AnchorSet {
    fn from_iter<I: IntoIterator<Item = AnchorKind>>(iter: I) -> Self {
        iter.into_iter().fold(AnchorSet::EMPTY, AnchorSet::with)
    }
}

impl From<Vec<AnchorKind>> for AnchorSet {
    fn from(kinds: Vec<AnchorKind>) -> Self {
        kinds.into_iter().collect()
    }
}

impl From<AnchorSet> for Vec<AnchorKind> {
    fn from(set: AnchorSet) -> Self {
        set.iter().collect()
    }
}

impl fmt::Debug for AnchorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
