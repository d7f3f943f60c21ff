//! # Keys and Scales
//!
//! The fixed set of keys a tab can be viewed in, each with the seven-note
//! diatonic scale used to resolve chord degrees (I → index 0 … VII → index 6).

use crate::error::TabError;
use crate::transpose::replace_flat_sharp;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A supported musical key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Key {
    #[serde(rename = "Ab")]
    AFlat,
    A,
    #[serde(rename = "Bb")]
    BFlat,
    B,
    #[default]
    C,
    #[serde(rename = "Db")]
    DFlat,
    D,
    #[serde(rename = "Eb")]
    EFlat,
    E,
    F,
    #[serde(rename = "F#")]
    FSharp,
    G,
}

impl Key {
    /// Every supported key, in the order offered to key pickers.
    pub const ALL: [Key; 12] = [
        Key::AFlat,
        Key::A,
        Key::BFlat,
        Key::B,
        Key::C,
        Key::DFlat,
        Key::D,
        Key::EFlat,
        Key::E,
        Key::F,
        Key::FSharp,
        Key::G,
    ];

    /// ASCII name as written in tab documents ("Bb", "F#").
    pub fn name(self) -> &'static str {
        match self {
            Key::AFlat => "Ab",
            Key::A => "A",
            Key::BFlat => "Bb",
            Key::B => "B",
            Key::C => "C",
            Key::DFlat => "Db",
            Key::D => "D",
            Key::EFlat => "Eb",
            Key::E => "E",
            Key::F => "F",
            Key::FSharp => "F#",
            Key::G => "G",
        }
    }

    /// Name with musical flat/sharp glyphs ("B♭", "F♯").
    pub fn display_name(self) -> String {
        replace_flat_sharp(self.name())
    }

    /// The diatonic scale built on this key, degrees 1 through 7.
    pub fn scale(self) -> [&'static str; 7] {
        match self {
            Key::AFlat => ["Ab", "Bb", "C", "Db", "Eb", "F", "G"],
            Key::A => ["A", "B", "C#", "D", "E", "F#", "G#"],
            Key::BFlat => ["Bb", "C", "D", "Eb", "F", "G", "A"],
            Key::B => ["B", "C#", "D#", "E", "F#", "G#", "A#"],
            Key::C => ["C", "D", "E", "F", "G", "A", "B"],
            Key::DFlat => ["Db", "Eb", "F", "Gb", "Ab", "Bb", "C"],
            Key::D => ["D", "E", "F#", "G", "A", "B", "C#"],
            Key::EFlat => ["Eb", "F", "G", "Ab", "Bb", "C", "D"],
            Key::E => ["E", "F#", "G#", "A", "B", "C#", "D#"],
            Key::F => ["F", "G", "A", "Bb", "C", "D", "E"],
            Key::FSharp => ["F#", "G#", "A#", "B", "C#", "D#", "E#"],
            Key::G => ["G", "A", "B", "C", "D", "E", "F#"],
        }
    }
}

impl FromStr for Key {
    type Err = TabError;

    /// Parse an ASCII key name. Surrounding whitespace is ignored; the
    /// musical glyphs are accepted as well so display names round-trip.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let ascii = trimmed.replace('♭', "b").replace('♯', "#");
        Key::ALL
            .iter()
            .copied()
            .find(|key| key.name() == ascii)
            .ok_or_else(|| TabError::UnsupportedKey(trimmed.to_string()))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
