//! # Chord Diagrams
//!
//! Parses fingering data of the form `caption[f:f:f:f:f:f]` for a six-string
//! instrument, listed from the sixth (lowest) string to the first. Each fret
//! is `x` for a muted string or a fret number, `0` being the open string.
//!
//! ```text
//! "CMaj9"[x:3:2:4:3:x]
//! Bb[x:1:3:3:3:1]
//! ```
//!
//! Diagrams show a window of [`FRET_COUNT`] frets. Chords reaching past it
//! are drawn shifted so the lowest fretted position sits on the first row.

use crate::error::TabError;
use serde::Serialize;
use std::str::FromStr;

pub const STRING_COUNT: usize = 6;
pub const FRET_COUNT: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Fret {
    Muted,
    Open,
    Fretted(u8),
}

impl Fret {
    fn parse(token: &str) -> Option<Self> {
        match token.trim() {
            "x" | "X" => Some(Fret::Muted),
            t => match t.parse::<u8>().ok()? {
                0 => Some(Fret::Open),
                n => Some(Fret::Fretted(n)),
            },
        }
    }

    pub fn number(self) -> Option<u8> {
        match self {
            Fret::Fretted(n) => Some(n),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordDiagram {
    pub caption: String,
    pub frets: [Fret; STRING_COUNT],
}

impl ChordDiagram {
    /// First fret shown when the chord does not fit the window from the nut.
    pub fn base_fret(&self) -> Option<u8> {
        let fretted = self.frets.iter().filter_map(|f| f.number());
        let max = fretted.clone().max()?;
        if max >= FRET_COUNT {
            fretted.min()
        } else {
            None
        }
    }

    /// Frets relative to the drawn window: unchanged when the nut is shown,
    /// otherwise fretted strings renumbered so the base fret is row 1.
    pub fn window_frets(&self) -> [Fret; STRING_COUNT] {
        match self.base_fret() {
            Some(base) => self.frets.map(|f| match f {
                Fret::Fretted(n) => Fret::Fretted(n - base + 1),
                other => other,
            }),
            None => self.frets,
        }
    }
}

fn invalid(data: &str, message: &str) -> TabError {
    TabError::InvalidDiagram {
        data: data.to_string(),
        message: message.to_string(),
    }
}

impl FromStr for ChordDiagram {
    type Err = TabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let data = s.trim();
        let body = data
            .strip_suffix(']')
            .ok_or_else(|| invalid(data, "expected fingering in [...] at the end"))?;
        let open = body
            .rfind('[')
            .ok_or_else(|| invalid(data, "expected '[' before fingering"))?;

        let caption = body[..open].trim().trim_matches('"').trim();
        if caption.is_empty() {
            return Err(invalid(data, "missing caption"));
        }

        let tokens: Vec<&str> = body[open + 1..].split(':').collect();
        if tokens.len() != STRING_COUNT {
            return Err(invalid(
                data,
                &format!("expected {} frets, found {}", STRING_COUNT, tokens.len()),
            ));
        }
        let mut frets = [Fret::Muted; STRING_COUNT];
        for (slot, token) in frets.iter_mut().zip(&tokens) {
            *slot = Fret::parse(token)
                .ok_or_else(|| invalid(data, &format!("bad fret '{}'", token)))?;
        }

        Ok(ChordDiagram {
            caption: caption.to_string(),
            frets,
        })
    }
}
