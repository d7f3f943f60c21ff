//! # Tab Structure Types
//!
//! The tree produced by the parser for one script and one key.
//!
//! ## Type Hierarchy
//! ```text
//! Vec<Section>            one per script line, always emitted
//!   └── Vec<Measure>      split on `|`, empty measures dropped
//!         └── Vec<Block>  split on `,`, malformed blocks dropped
//!               ├── chord: Option<String>   already transposed for display
//!               ├── pitch: Option<Pitch>    raw text + note digit + octave
//!               └── lyrics: Vec<String>     sub-lines split on `/`
//! ```
//!
//! Everything here is derived fresh on every parse; nothing is persisted.

use crate::chord::Accidental;
use serde::Serialize;

/// One line of the script.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub measures: Vec<Measure>,
}

impl Section {
    pub fn is_empty(&self) -> bool {
        self.measures.is_empty()
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.measures.iter().flat_map(|m| m.blocks.iter())
    }
}

/// A bar of blocks.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Measure {
    pub blocks: Vec<Block>,
}

/// The smallest notated unit: optional chord, optional pitch, lyrics.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chord: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitch: Option<Pitch>,
    pub lyrics: Vec<String>,
}

impl Block {
    /// Chord display text, empty for a block without a chord.
    pub fn chord_text(&self) -> &str {
        self.chord.as_deref().unwrap_or("")
    }
}

/// Octave displacement drawn above or below a pitch marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OctaveShift {
    Down2,
    Down1,
    Up1,
    Up2,
}

impl OctaveShift {
    /// Only one or two octaves either way have a marker.
    pub fn from_offset(offset: i32) -> Option<Self> {
        match offset {
            -2 => Some(OctaveShift::Down2),
            -1 => Some(OctaveShift::Down1),
            1 => Some(OctaveShift::Up1),
            2 => Some(OctaveShift::Up2),
            _ => None,
        }
    }
}

/// A pitch marker such as `3`, `5b`, `1+1` or `6#-2`.
///
/// Only the leading `<digit>[b|#][(+|-)<digits>]` is interpreted; the raw
/// text is kept as written. A marker that does not start with a digit keeps
/// its raw text and has no note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pitch {
    pub raw: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digit: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accidental: Option<Accidental>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub octave: Option<i32>,
}

impl Pitch {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let mut chars = raw.char_indices().peekable();

        let digit = chars
            .next_if(|(_, c)| c.is_ascii_digit())
            .and_then(|(_, c)| c.to_digit(10))
            .map(|d| d as u8);
        if digit.is_none() {
            return Pitch {
                raw: raw.to_string(),
                digit: None,
                accidental: None,
                octave: None,
            };
        }

        let accidental = chars
            .next_if(|(_, c)| Accidental::from_char(*c).is_some())
            .and_then(|(_, c)| Accidental::from_char(c));

        let octave = match chars.next_if(|(_, c)| *c == '+' || *c == '-') {
            Some((start, _)) => {
                let digits = raw[start + 1..]
                    .chars()
                    .take_while(|c| c.is_ascii_digit())
                    .count();
                if digits == 0 {
                    None
                } else {
                    let signed = &raw[start..start + 1 + digits];
                    match signed.parse::<i32>() {
                        Ok(octave) => Some(octave),
                        Err(_) => {
                            log::debug!("Octave shift out of range in pitch '{}'", raw);
                            None
                        }
                    }
                }
            }
            None => None,
        };

        Pitch {
            raw: raw.to_string(),
            digit,
            accidental,
            octave,
        }
    }

    /// The note as displayed: digit plus accidental ("3", "5b"). Falls back
    /// to the raw text for markers without a digit.
    pub fn note(&self) -> String {
        match self.digit {
            Some(digit) => match self.accidental {
                Some(acc) => format!("{}{}", digit, acc),
                None => digit.to_string(),
            },
            None => self.raw.clone(),
        }
    }

    pub fn octave_shift(&self) -> Option<OctaveShift> {
        self.octave.and_then(OctaveShift::from_offset)
    }
}
