pub mod ast;
pub mod chord;
pub mod diagram;
pub mod document;
pub mod error;
pub mod key;
pub mod parser;
pub mod render;
pub mod transpose;

pub use ast::*;
pub use diagram::{ChordDiagram, Fret};
pub use document::{ChordDiagramSet, ChordEntry, DocumentView, TabDocument};
pub use error::*;
pub use key::Key;
pub use parser::{parse, TabParser};
pub use render::{render_diagram, render_document, render_sections, RenderOptions};
pub use transpose::{transpose, try_transpose, ERROR_MARKER};

/// Render a tab script as text in the given key.
/// This is the main entry point for the library.
pub fn render(script: &str, key: Key, options: &RenderOptions) -> String {
    render_sections(&parse(script, key), options)
}

/// Parse with a key given by name (e.g., "Bb", "F#"), as it arrives from a
/// key picker or the command line.
pub fn parse_in_key(script: &str, key_name: &str) -> Result<Vec<Section>, TabError> {
    let key: Key = key_name.parse()?;
    Ok(parse(script, key))
}
