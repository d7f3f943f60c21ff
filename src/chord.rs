//! # Chord Degree Grammar
//!
//! Tokenizes a scale-degree chord expression into its parts:
//!
//! ```text
//! IV-6        degree IV, quality "6"
//! iii-9       degree iii, quality "9"
//! ii-7b5      degree ii, quality "7b5"
//! VIIb        degree VII, flatted
//! I-Maj9/V    degree I, quality "Maj9", bass V
//! ```
//!
//! The numeral is the leading run of `I`/`V`/`i`/`v` letters. What follows is
//! an optional `b`/`#`, then an optional free-form quality (conventionally
//! introduced by `-`), then an optional `/bass`.

use crate::error::TabError;
use serde::Serialize;
use std::fmt;

/// Triad quality implied by the numeral's case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Triad {
    Major,
    Minor,
}

/// Chromatic alteration written after a degree or pitch digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Accidental {
    Flat,
    Sharp,
}

impl Accidental {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'b' => Some(Accidental::Flat),
            '#' => Some(Accidental::Sharp),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Accidental::Flat => "b",
            Accidental::Sharp => "#",
        }
    }
}

impl fmt::Display for Accidental {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const MAJOR_DEGREES: [&str; 7] = ["I", "II", "III", "IV", "V", "VI", "VII"];
const MINOR_DEGREES: [&str; 7] = ["i", "ii", "iii", "iv", "v", "vi", "vii"];

/// A resolved Roman numeral: scale index (I → 0 … VII → 6) and triad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Degree {
    pub index: usize,
    pub triad: Triad,
}

impl Degree {
    /// Look a numeral up in the major set, then the minor set. Matching is
    /// exact and case-sensitive, so mixed case ("Iv") matches neither.
    pub fn from_numeral(numeral: &str) -> Option<Self> {
        if let Some(index) = MAJOR_DEGREES.iter().position(|d| *d == numeral) {
            return Some(Degree { index, triad: Triad::Major });
        }
        MINOR_DEGREES
            .iter()
            .position(|d| *d == numeral)
            .map(|index| Degree { index, triad: Triad::Minor })
    }
}

fn is_numeral_char(c: char) -> bool {
    matches!(c, 'I' | 'V' | 'i' | 'v')
}

/// A tokenized chord expression. Only the numeral is interpreted here; the
/// transposer decides whether it names a real degree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegreeToken {
    pub numeral: String,
    pub flat_sharp: Option<Accidental>,
    pub quality: Option<String>,
    pub root: Option<String>,
}

impl DegreeToken {
    /// Tokenize a chord expression.
    ///
    /// Fails with `UnrecognizedDegree` when the expression does not start
    /// with a numeral letter.
    pub fn parse(expression: &str) -> Result<Self, TabError> {
        let expression = expression.trim();
        let numeral_len: usize = expression
            .chars()
            .take_while(|c| is_numeral_char(*c))
            .map(char::len_utf8)
            .sum();
        if numeral_len == 0 {
            return Err(TabError::UnrecognizedDegree(expression.to_string()));
        }
        let numeral = &expression[..numeral_len];
        let mut rest = &expression[numeral_len..];

        let flat_sharp = rest.chars().next().and_then(Accidental::from_char);
        if flat_sharp.is_some() {
            rest = &rest[1..];
        }

        let (head, root) = match rest.split_once('/') {
            Some((head, root)) => (head, non_empty(root.trim())),
            None => (rest, None),
        };
        let quality = non_empty(head.strip_prefix('-').unwrap_or(head).trim());

        Ok(DegreeToken {
            numeral: numeral.to_string(),
            flat_sharp,
            quality,
            root,
        })
    }

    pub fn degree(&self) -> Option<Degree> {
        Degree::from_numeral(&self.numeral)
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("I", 0, Triad::Major)]
    #[case("IV", 3, Triad::Major)]
    #[case("VII", 6, Triad::Major)]
    #[case("ii", 1, Triad::Minor)]
    #[case("vi", 5, Triad::Minor)]
    #[case("vii", 6, Triad::Minor)]
    fn test_numeral_lookup(#[case] numeral: &str, #[case] index: usize, #[case] triad: Triad) {
        assert_eq!(Degree::from_numeral(numeral), Some(Degree { index, triad }));
    }

    #[test]
    fn test_numeral_lookup_rejects_mixed_case_and_nonsense() {
        assert_eq!(Degree::from_numeral("Iv"), None);
        assert_eq!(Degree::from_numeral("VIII"), None);
        assert_eq!(Degree::from_numeral("IIII"), None);
        assert_eq!(Degree::from_numeral(""), None);
    }

    #[test]
    fn test_plain_degree() {
        let token = DegreeToken::parse("IV").unwrap();
        assert_eq!(
            token,
            DegreeToken {
                numeral: "IV".to_string(),
                flat_sharp: None,
                quality: None,
                root: None,
            }
        );
    }

    #[test]
    fn test_quality_keeps_inner_flats() {
        let token = DegreeToken::parse("ii-7b5").unwrap();
        assert_eq!(token.numeral, "ii");
        assert_eq!(token.flat_sharp, None);
        assert_eq!(token.quality.as_deref(), Some("7b5"));
    }

    #[test]
    fn test_flat_sharp_before_quality() {
        let token = DegreeToken::parse("VIIb-7").unwrap();
        assert_eq!(token.numeral, "VII");
        assert_eq!(token.flat_sharp, Some(Accidental::Flat));
        assert_eq!(token.quality.as_deref(), Some("7"));

        let token = DegreeToken::parse("IV#").unwrap();
        assert_eq!(token.flat_sharp, Some(Accidental::Sharp));
        assert_eq!(token.quality, None);
    }

    #[test]
    fn test_slash_chord() {
        let token = DegreeToken::parse("I-Maj9/V").unwrap();
        assert_eq!(token.numeral, "I");
        assert_eq!(token.quality.as_deref(), Some("Maj9"));
        assert_eq!(token.root.as_deref(), Some("V"));

        let token = DegreeToken::parse("IV/I").unwrap();
        assert_eq!(token.quality, None);
        assert_eq!(token.root.as_deref(), Some("I"));
    }

    #[test]
    fn test_quality_without_dash() {
        let token = DegreeToken::parse("V7").unwrap();
        assert_eq!(token.numeral, "V");
        assert_eq!(token.quality.as_deref(), Some("7"));
    }

    #[test]
    fn test_missing_numeral_is_unrecognized() {
        let err = DegreeToken::parse("XYZ").unwrap_err();
        assert!(matches!(err, TabError::UnrecognizedDegree(ref s) if s == "XYZ"));
        assert!(DegreeToken::parse("-7").is_err());
    }
}
