//! # Tab Script Parser
//!
//! Decomposes a tab script into sections, measures and blocks.
//!
//! ```text
//! [I] (3) hello, (4) world | [IV] end
//! └──────── measure ─────┘   └ measure ┘     one line = one section
//!  └─ block ─────┘  └ block ┘
//! ```
//!
//! A block is `[chord] (pitch) lyrics`: the chord and pitch groups are
//! optional, the lyrics are required. Chords are written as scale degrees and
//! transposed into the selected key while parsing.
//!
//! Parsing never fails. Blocks that do not fit the grammar and measures left
//! without blocks are dropped; a chord with an unknown degree shows as `ERR`.

use crate::ast::{Block, Measure, Pitch, Section};
use crate::error::TabError;
use crate::key::Key;
use crate::transpose::transpose;

const MEASURE_SEPARATOR: char = '|';
const BLOCK_SEPARATOR: char = ',';
const LYRIC_LINE_SEPARATOR: char = '/';

/// The captures of one block before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock<'a> {
    pub chord: Option<&'a str>,
    pub pitch: Option<&'a str>,
    pub lyrics: &'a str,
}

/// Split a leading `open ... close` group off `text`. The group ends at the
/// first `close`; without one there is no group.
fn take_group(text: &str, open: char, close: char) -> Option<(&str, &str)> {
    let inner = text.strip_prefix(open)?;
    let end = inner.find(close)?;
    Some((&inner[..end], &inner[end + close.len_utf8()..]))
}

/// Match a trimmed block string against `[chord] (pitch) lyrics`.
pub fn scan_block(text: &str) -> Result<RawBlock<'_>, TabError> {
    let mut rest = text.trim();

    let mut chord = None;
    if let Some((inner, after)) = take_group(rest, '[', ']') {
        chord = Some(inner);
        rest = after.trim_start();
    }

    let mut pitch = None;
    if let Some((inner, after)) = take_group(rest, '(', ')') {
        pitch = Some(inner);
        rest = after.trim_start();
    }

    if rest.is_empty() {
        return Err(TabError::MalformedBlock {
            block: text.to_string(),
            message: "missing lyrics".to_string(),
        });
    }

    Ok(RawBlock {
        chord,
        pitch,
        lyrics: rest,
    })
}

/// Parser state for one key. Holds no state between calls.
#[derive(Debug, Clone, Copy)]
pub struct TabParser {
    key: Key,
}

impl TabParser {
    pub fn new(key: Key) -> Self {
        Self { key }
    }

    /// Parse a whole script, one section per line.
    pub fn parse(&self, script: &str) -> Vec<Section> {
        script
            .split('\n')
            .map(|line| self.parse_section(line.strip_suffix('\r').unwrap_or(line)))
            .collect()
    }

    /// Parse one line. Always yields a section, possibly without measures.
    pub fn parse_section(&self, line: &str) -> Section {
        let measures = line
            .split(MEASURE_SEPARATOR)
            .filter_map(|m| self.parse_measure(m))
            .collect();
        Section { measures }
    }

    /// Parse one measure; `None` when no block survives.
    pub fn parse_measure(&self, text: &str) -> Option<Measure> {
        let blocks: Vec<Block> = text
            .split(BLOCK_SEPARATOR)
            .map(str::trim)
            .filter_map(|b| self.parse_block(b))
            .collect();
        if blocks.is_empty() {
            if !text.trim().is_empty() {
                log::debug!("Dropping measure without blocks: '{}'", text);
            }
            return None;
        }
        Some(Measure { blocks })
    }

    /// Parse one block; `None` for empty or malformed text.
    pub fn parse_block(&self, text: &str) -> Option<Block> {
        if text.is_empty() {
            return None;
        }
        let raw = match scan_block(text) {
            Ok(raw) => raw,
            Err(e) => {
                log::debug!("{}", e);
                return None;
            }
        };

        let chord = raw
            .chord
            .filter(|c| !c.trim().is_empty())
            .map(|c| transpose(self.key, c));
        let pitch = raw
            .pitch
            .filter(|p| !p.trim().is_empty())
            .map(Pitch::parse);
        let lyrics = raw
            .lyrics
            .split(LYRIC_LINE_SEPARATOR)
            .map(str::to_string)
            .collect();

        Some(Block {
            chord,
            pitch,
            lyrics,
        })
    }
}

/// Parse a tab script for display in `key`.
///
/// # Example
/// ```
/// use tabmaker::{parse, Key};
///
/// let sections = parse("[I] (3) hello, (4) world|[IV] end", Key::C);
/// assert_eq!(sections.len(), 1);
/// assert_eq!(sections[0].measures.len(), 2);
/// assert_eq!(sections[0].measures[1].blocks[0].chord.as_deref(), Some("F"));
/// ```
pub fn parse(script: &str, key: Key) -> Vec<Section> {
    TabParser::new(key).parse(script)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lyrics(block: &Block) -> Vec<&str> {
        block.lyrics.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_scan_full_block() {
        let raw = scan_block("[IV-6] (3+1) hello there").unwrap();
        assert_eq!(
            raw,
            RawBlock {
                chord: Some("IV-6"),
                pitch: Some("3+1"),
                lyrics: "hello there",
            }
        );
    }

    #[test]
    fn test_scan_without_whitespace_between_groups() {
        let raw = scan_block("[I](5)la").unwrap();
        assert_eq!(raw.chord, Some("I"));
        assert_eq!(raw.pitch, Some("5"));
        assert_eq!(raw.lyrics, "la");
    }

    #[test]
    fn test_scan_lyrics_only() {
        let raw = scan_block("just words").unwrap();
        assert_eq!(raw.chord, None);
        assert_eq!(raw.pitch, None);
        assert_eq!(raw.lyrics, "just words");
    }

    #[test]
    fn test_scan_pitch_before_chord_is_lyrics() {
        let raw = scan_block("(3) [I] hey").unwrap();
        assert_eq!(raw.chord, None);
        assert_eq!(raw.pitch, Some("3"));
        assert_eq!(raw.lyrics, "[I] hey");
    }

    #[test]
    fn test_scan_unclosed_group_falls_through_to_lyrics() {
        let raw = scan_block("[I hello").unwrap();
        assert_eq!(raw.chord, None);
        assert_eq!(raw.lyrics, "[I hello");
    }

    #[test]
    fn test_scan_lyrics_keep_later_parentheses() {
        let raw = scan_block("(3) hello (world)").unwrap();
        assert_eq!(raw.pitch, Some("3"));
        assert_eq!(raw.lyrics, "hello (world)");
    }

    #[test]
    fn test_scan_missing_lyrics_is_malformed() {
        assert!(matches!(
            scan_block("[I] (3)"),
            Err(TabError::MalformedBlock { .. })
        ));
        assert!(scan_block("[V]").is_err());
        assert!(scan_block("   ").is_err());
    }

    #[test]
    fn test_measures_and_blocks() {
        let sections = parse("[I] (3) hello, (4) world|[IV] end", Key::C);
        assert_eq!(sections.len(), 1);
        let measures = &sections[0].measures;
        assert_eq!(measures.len(), 2);

        assert_eq!(measures[0].blocks.len(), 2);
        let first = &measures[0].blocks[0];
        assert_eq!(first.chord.as_deref(), Some("C"));
        assert_eq!(first.pitch.as_ref().map(|p| p.raw.as_str()), Some("3"));
        assert_eq!(lyrics(first), vec!["hello"]);

        let second = &measures[0].blocks[1];
        assert_eq!(second.chord_text(), "");
        assert_eq!(second.pitch.as_ref().map(|p| p.raw.as_str()), Some("4"));
        assert_eq!(lyrics(second), vec!["world"]);

        assert_eq!(measures[1].blocks.len(), 1);
        let third = &measures[1].blocks[0];
        assert_eq!(third.chord.as_deref(), Some("F"));
        assert_eq!(third.pitch, None);
        assert_eq!(lyrics(third), vec!["end"]);
    }

    #[test]
    fn test_empty_measure_dropped_section_kept() {
        let sections = parse("a | , | b", Key::C);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].measures.len(), 2);

        let sections = parse(" , ", Key::C);
        assert_eq!(sections.len(), 1);
        assert!(sections[0].is_empty());
    }

    #[test]
    fn test_one_section_per_line() {
        let sections = parse("a|b\n\nc\r\nd", Key::G);
        assert_eq!(sections.len(), 4);
        assert_eq!(sections[0].measures.len(), 2);
        assert!(sections[1].is_empty());
        assert_eq!(lyrics(&sections[2].measures[0].blocks[0]), vec!["c"]);
        assert_eq!(lyrics(&sections[3].measures[0].blocks[0]), vec!["d"]);
    }

    #[test]
    fn test_lyric_sub_lines() {
        let sections = parse("la/la la", Key::C);
        let block = &sections[0].measures[0].blocks[0];
        assert_eq!(lyrics(block), vec!["la", "la la"]);
    }

    #[test]
    fn test_chord_only_block_is_dropped() {
        let sections = parse("[I], [IV] word", Key::C);
        let blocks = &sections[0].measures[0].blocks;
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].chord.as_deref(), Some("F"));
    }

    #[test]
    fn test_blank_chord_slot() {
        let sections = parse("[] word", Key::C);
        let block = &sections[0].measures[0].blocks[0];
        assert_eq!(block.chord, None);
        assert_eq!(lyrics(block), vec!["word"]);
    }

    #[test]
    fn test_unknown_degree_renders_marker() {
        let sections = parse("[XYZ] oops", Key::C);
        assert_eq!(sections[0].measures[0].blocks[0].chord.as_deref(), Some("ERR"));
    }

    #[test]
    fn test_chords_follow_selected_key() {
        let script = "[I] a, [vi] b, [IV] c, [V-7] d";
        let chords = |key| -> Vec<String> {
            parse(script, key)[0]
                .blocks()
                .map(|b| b.chord_text().to_string())
                .collect()
        };
        assert_eq!(chords(Key::C), vec!["C", "Am", "F", "G7"]);
        assert_eq!(chords(Key::EFlat), vec!["E♭", "Cm", "A♭", "B♭7"]);
        assert_eq!(chords(Key::A), vec!["A", "F♯m", "D", "E7"]);
    }

    #[test]
    fn test_parse_is_idempotent() {
        let script = "[I] (3) hello, (4-1) world|[IV] end\n[ii-7b5] la/la";
        assert_eq!(parse(script, Key::D), parse(script, Key::D));
    }
}
