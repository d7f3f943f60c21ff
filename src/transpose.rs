//! # Chord Transposition
//!
//! Resolves scale-degree chord expressions (`IV-6`, `iii-9`, `ii-7b5`,
//! `I-Maj9/V`) into chord names for a given key.

use crate::chord::{Degree, DegreeToken, Triad};
use crate::error::TabError;
use crate::key::Key;

/// Shown in place of a chord whose degree could not be resolved.
pub const ERROR_MARKER: &str = "ERR";

/// Replace ASCII `#` and `b` with the musical sharp and flat glyphs.
///
/// Applied to whole chord names, so flats inside a quality ("7b5") are
/// converted too.
pub fn replace_flat_sharp(value: &str) -> String {
    value.replace('#', "♯").replace('b', "♭")
}

/// Note name for a degree, with `m` appended for minor triads.
pub fn degree_to_name(key: Key, degree: Degree) -> String {
    let note = key.scale()[degree.index];
    match degree.triad {
        Triad::Major => note.to_string(),
        Triad::Minor => format!("{}m", note),
    }
}

/// Resolve the bass of a slash chord. A bass written as a degree (with an
/// optional flat or sharp) becomes that scale note; the numeral's case is
/// ignored since a bass is a single note. Anything else is kept as written.
fn bass_to_name(key: Key, root: &str) -> String {
    let (numeral, accidental) = match root.strip_suffix(['b', '#']) {
        Some(numeral) => (numeral, &root[numeral.len()..]),
        None => (root, ""),
    };
    match Degree::from_numeral(numeral) {
        Some(degree) => format!("{}{}", key.scale()[degree.index], accidental),
        None => root.to_string(),
    }
}

/// Transpose a chord expression, reporting an unknown degree as an error.
///
/// An empty expression is a blank chord slot and yields an empty string.
pub fn try_transpose(key: Key, expression: &str) -> Result<String, TabError> {
    if expression.trim().is_empty() {
        return Ok(String::new());
    }
    let token = DegreeToken::parse(expression)?;
    let degree = token
        .degree()
        .ok_or_else(|| TabError::UnrecognizedDegree(expression.to_string()))?;

    let mut result = degree_to_name(key, degree);
    if let Some(flat_sharp) = token.flat_sharp {
        result.push_str(flat_sharp.as_str());
    }
    if let Some(quality) = &token.quality {
        result.push_str(quality);
    }
    if let Some(root) = &token.root {
        result.push('/');
        result.push_str(&bass_to_name(key, root));
    }
    Ok(replace_flat_sharp(&result))
}

/// Transpose a chord expression into `key` for display.
///
/// Never fails: an unrecognized degree is logged and rendered as
/// [`ERROR_MARKER`] so the rest of the tab still renders.
///
/// # Example
/// ```
/// use tabmaker::{transpose, Key};
///
/// assert_eq!(transpose(Key::C, "IV"), "F");
/// assert_eq!(transpose(Key::C, "ii-7b5"), "Dm7♭5");
/// assert_eq!(transpose(Key::G, "I-Maj9/V"), "GMaj9/D");
/// ```
pub fn transpose(key: Key, expression: &str) -> String {
    match try_transpose(key, expression) {
        Ok(name) => name,
        Err(e) => {
            log::warn!("{} (key {})", e, key);
            ERROR_MARKER.to_string()
        }
    }
}
