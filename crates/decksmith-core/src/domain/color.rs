//! Color identity: a subset of the five color symbols plus a colorless marker.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the five color symbols, in canonical WUBRG order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    #[serde(rename = "W")]
    White,
    #[serde(rename = "U")]
    Blue,
    #[serde(rename = "B")]
    Black,
    #[serde(rename = "R")]
    Red,
    #[serde(rename = "G")]
    Green,
}

impl Color {
    pub const ALL: [Color; 5] = [
        Color::White,
        Color::Blue,
        Color::Black,
        Color::Red,
        Color::Green,
    ];

    pub fn symbol(self) -> char {
        match self {
            Color::White => 'W',
            Color::Blue => 'U',
            Color::Black => 'B',
            Color::Red => 'R',
            Color::Green => 'G',
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'W' => Some(Color::White),
            'U' => Some(Color::Blue),
            'B' => Some(Color::Black),
            'R' => Some(Color::Red),
            'G' => Some(Color::Green),
            _ => None,
        }
    }

    /// Basic land that produces this color.
    pub fn basic_land(self) -> &'static str {
        match self {
            Color::White => "Plains",
            Color::Blue => "Island",
            Color::Black => "Swamp",
            Color::Red => "Mountain",
            Color::Green => "Forest",
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Symbol used for an identity with no colors.
pub const COLORLESS_SYMBOL: char = 'C';

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color identity symbol '{0}'")]
pub struct InvalidColor(pub char);

/// Set of colors. The empty set is the colorless identity and renders as `C`.
///
/// Serialized as its canonical string (`"WUBG"`, `"C"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColorIdentity {
    bits: u8,
}

impl ColorIdentity {
    pub const COLORLESS: ColorIdentity = ColorIdentity { bits: 0 };

    pub fn from_colors(colors: impl IntoIterator<Item = Color>) -> Self {
        let bits = colors.into_iter().fold(0, |acc, c| acc | c.bit());
        Self { bits }
    }

    pub fn contains(&self, color: Color) -> bool {
        self.bits & color.bit() != 0
    }

    /// `other` fits inside this identity (subset check).
    pub fn allows(&self, other: &ColorIdentity) -> bool {
        other.bits & !self.bits == 0
    }

    pub fn is_colorless(&self) -> bool {
        self.bits == 0
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.is_colorless()
    }

    /// Colors in canonical WUBRG order.
    pub fn iter(&self) -> impl Iterator<Item = Color> + '_ {
        Color::ALL.into_iter().filter(|c| self.contains(*c))
    }
}

impl fmt::Display for ColorIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_colorless() {
            return write!(f, "{COLORLESS_SYMBOL}");
        }
        for color in self.iter() {
            write!(f, "{}", color.symbol())?;
        }
        Ok(())
    }
}

impl FromStr for ColorIdentity {
    type Err = InvalidColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut identity = ColorIdentity::COLORLESS;
        for c in s.trim().chars() {
            if c.eq_ignore_ascii_case(&COLORLESS_SYMBOL) {
                continue;
            }
            let color = Color::from_symbol(c).ok_or(InvalidColor(c))?;
            identity.bits |= color.bit();
        }
        Ok(identity)
    }
}

impl TryFrom<String> for ColorIdentity {
    type Error = InvalidColor;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ColorIdentity> for String {
    fn from(value: ColorIdentity) -> Self {
        value.to_string()
    }
}
