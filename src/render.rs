//! # Text Rendering
//!
//! Lays parsed sections out as aligned plain text, one column per block:
//!
//! ```text
//! C     | F
//! hello | end
//! ```
//!
//! With pitch display enabled, pitch markers get their own row, with octave
//! marks on rows above (`·` one up, `:` two up) and below.

use crate::ast::{Block, OctaveShift, Section};
use crate::diagram::{ChordDiagram, Fret, FRET_COUNT, STRING_COUNT};
use crate::document::TabDocument;
use crate::key::Key;

const MEASURE_BAR: &str = "| ";
const ONE_OCTAVE: &str = "·";
const TWO_OCTAVES: &str = ":";

/// Display toggles, passed explicitly to every render call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub show_pitch: bool,
}

/// The text cells of one block.
struct Column {
    chord: String,
    above: &'static str,
    note: String,
    below: &'static str,
    lyrics: Vec<String>,
    width: usize,
}

impl Column {
    fn new(block: &Block) -> Self {
        let shift = block.pitch.as_ref().and_then(|p| p.octave_shift());
        let above = match shift {
            Some(OctaveShift::Up1) => ONE_OCTAVE,
            Some(OctaveShift::Up2) => TWO_OCTAVES,
            _ => "",
        };
        let below = match shift {
            Some(OctaveShift::Down1) => ONE_OCTAVE,
            Some(OctaveShift::Down2) => TWO_OCTAVES,
            _ => "",
        };
        let chord = block.chord_text().to_string();
        let note = block.pitch.as_ref().map(|p| p.note()).unwrap_or_default();
        let width = std::iter::once(&chord)
            .chain(std::iter::once(&note))
            .chain(block.lyrics.iter())
            .map(|s| s.chars().count())
            .max()
            .unwrap_or(0);
        Column {
            chord,
            above,
            note,
            below,
            lyrics: block.lyrics.clone(),
            width,
        }
    }
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{} ", text, " ".repeat(width.saturating_sub(len)))
}

/// Build one text row across all measures of a section.
fn row<F>(measures: &[Vec<Column>], cell: F) -> String
where
    F: Fn(&Column) -> &str,
{
    let line = measures
        .iter()
        .map(|columns| {
            columns
                .iter()
                .map(|c| pad(cell(c), c.width))
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join(MEASURE_BAR);
    line.trim_end().to_string()
}

/// Render one section as a group of aligned rows.
pub fn render_section(section: &Section, options: &RenderOptions) -> String {
    let measures: Vec<Vec<Column>> = section
        .measures
        .iter()
        .map(|m| m.blocks.iter().map(Column::new).collect())
        .collect();
    let columns = || measures.iter().flatten();

    let mut rows = Vec::new();
    if columns().any(|c| !c.chord.is_empty()) {
        rows.push(row(&measures, |c| c.chord.as_str()));
    }
    if options.show_pitch && columns().any(|c| !c.note.is_empty()) {
        if columns().any(|c| !c.above.is_empty()) {
            rows.push(row(&measures, |c| c.above));
        }
        rows.push(row(&measures, |c| c.note.as_str()));
        if columns().any(|c| !c.below.is_empty()) {
            rows.push(row(&measures, |c| c.below));
        }
    }
    let depth = columns().map(|c| c.lyrics.len()).max().unwrap_or(0);
    for line in 0..depth {
        rows.push(row(&measures, |c| {
            c.lyrics.get(line).map(String::as_str).unwrap_or("")
        }));
    }
    rows.join("\n")
}

/// Render all sections, separated by blank lines.
pub fn render_sections(sections: &[Section], options: &RenderOptions) -> String {
    sections
        .iter()
        .map(|s| render_section(s, options))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Draw a chord diagram as a text grid, sixth string on the left.
pub fn render_diagram(diagram: &ChordDiagram) -> String {
    let width = STRING_COUNT * 2 - 1;
    let base = diagram.base_fret();
    let frets = diagram.window_frets();

    let mut lines = vec![diagram.caption.clone()];

    let markers: Vec<&str> = frets
        .iter()
        .map(|f| match f {
            Fret::Muted => "x",
            Fret::Open => "o",
            Fret::Fretted(_) => " ",
        })
        .collect();
    lines.push(markers.join(" ").trim_end().to_string());

    lines.push(if base.is_some() { "-" } else { "=" }.repeat(width));

    for row in 1..=FRET_COUNT {
        let cells: Vec<&str> = frets
            .iter()
            .map(|f| if f.number() == Some(row) { "●" } else { "|" })
            .collect();
        let mut line = cells.join(" ");
        if row == 1 {
            if let Some(base) = base {
                line.push_str(&format!(" - {} fr", base));
            }
        }
        lines.push(line);
    }
    lines.join("\n")
}

/// Render a document header, its diagrams for `key`, and the tab body.
pub fn render_document(doc: &TabDocument, key: Key, options: &RenderOptions) -> String {
    let mut out = String::new();
    if !doc.title.is_empty() {
        out.push_str(&doc.title);
        out.push('\n');
    }
    out.push_str(&format!(
        "Original key: {}  Key: {}\n",
        doc.original_key.display_name(),
        key.display_name()
    ));

    for (entry, diagram) in doc.diagrams_for(key) {
        out.push('\n');
        match diagram {
            Ok(diagram) => out.push_str(&render_diagram(&diagram)),
            Err(e) => {
                log::warn!("{}", e);
                out.push_str(&format!("{}: ERROR", entry.id));
            }
        }
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&render_sections(&doc.sections(key), options));
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_chords_and_lyrics() {
        let sections = parse("[I] hello, [V] you|[IV] end", Key::C);
        let text = render_sections(&sections, &RenderOptions::default());
        assert_eq!(text, "C     G   | F\nhello you | end");
    }

    #[test]
    fn test_render_without_chords_has_no_chord_row() {
        let sections = parse("just, words", Key::C);
        let text = render_sections(&sections, &RenderOptions::default());
        assert_eq!(text, "just words");
    }

    #[test]
    fn test_render_lyric_sub_lines() {
        let sections = parse("[vi] la/la la, end", Key::C);
        let text = render_sections(&sections, &RenderOptions::default());
        assert_eq!(text, "Am\nla    end\nla la");
    }

    #[test]
    fn test_render_pitch_rows_only_when_shown() {
        let sections = parse("(3+1) hi, (5-2) lo", Key::C);
        let hidden = render_sections(&sections, &RenderOptions::default());
        assert_eq!(hidden, "hi lo");

        let shown = render_sections(&sections, &RenderOptions { show_pitch: true });
        assert_eq!(shown, "·\n3  5\n   :\nhi lo");
    }

    #[test]
    fn test_render_sections_separated_by_blank_line() {
        let sections = parse("a\n\nb", Key::C);
        let text = render_sections(&sections, &RenderOptions::default());
        assert_eq!(text, "a\n\n\n\nb");
    }

    #[test]
    fn test_render_open_diagram() {
        let diagram: ChordDiagram = "C[x:3:2:0:1:0]".parse().unwrap();
        let expected = [
            "C",
            "x     o   o",
            "===========",
            "| | | | ● |",
            "| | ● | | |",
            "| ● | | | |",
            "| | | | | |",
            "| | | | | |",
        ]
        .join("\n");
        assert_eq!(render_diagram(&diagram), expected);
    }

    #[test]
    fn test_render_shifted_diagram() {
        let diagram: ChordDiagram = "D[x:5:7:7:7:5]".parse().unwrap();
        let text = render_diagram(&diagram);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[2], "-----------");
        assert_eq!(lines[3], "| ● | | | ● - 5 fr");
        assert_eq!(lines[5], "| | ● ● ● |");
    }

    #[test]
    fn test_render_document() {
        let doc = TabDocument::from_source(
            "---\ntitle: Demo\noriginal-key: Bb\nchord-diagrams:\n  - key: Bb\n    chords:\n      - id: Bb\n        data: Bb[x:1:3:3:3:1]\n      - id: bad\n        data: nope\n---\n[I] la",
        )
        .unwrap();
        let text = render_document(&doc, Key::BFlat, &RenderOptions::default());
        assert!(text.starts_with("Demo\nOriginal key: B♭  Key: B♭\n"));
        assert!(text.contains("bad: ERROR"));
        assert!(text.ends_with("B♭\nla\n"));
    }
}
