//! # Tab Documents
//!
//! A tab document bundles the script with what a reader needs around it: a
//! title, the key the tab was written for, and per-key chord diagrams.
//!
//! Documents load from three formats:
//! - JSON, with camelCase fields (`title`, `originalKey`, `tabScript`,
//!   `chordDiagrams`)
//! - YAML, with the same fields
//! - A plain script with optional YAML frontmatter between `---` markers:
//!
//! ```text
//! ---
//! title: Amazing Grace
//! original-key: G
//! chord-diagrams:
//!   - key: G
//!     chords:
//!       - id: G
//!         data: G[3:2:0:0:0:3]
//! ---
//! [I] (5) A-, [I] (1+1) ma-zing | [IV] (3+1) grace
//! ```

use crate::ast::Section;
use crate::diagram::ChordDiagram;
use crate::error::TabError;
use crate::key::Key;
use crate::parser::parse;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One chord diagram entry as stored in a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChordEntry {
    pub id: String,
    pub data: String,
}

impl ChordEntry {
    pub fn diagram(&self) -> Result<ChordDiagram, TabError> {
        self.data.parse()
    }
}

/// The diagrams to show when the tab is viewed in `key`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChordDiagramSet {
    pub key: Key,
    #[serde(default)]
    pub chords: Vec<ChordEntry>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabDocument {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub original_key: Key,
    #[serde(default)]
    pub tab_script: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub chord_diagrams: Vec<ChordDiagramSet>,
}

/// Frontmatter fields of a script file.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case")]
struct RawMetadata {
    title: Option<String>,
    #[serde(alias = "key")]
    original_key: Option<String>,
    #[serde(default)]
    chord_diagrams: Vec<ChordDiagramSet>,
}

/// Split a leading `---` delimited block off the source. The block only
/// counts as frontmatter when it opens the file; `---` lines further down
/// belong to the script.
/// Returns (metadata_content, remaining_source)
fn extract_frontmatter(source: &str) -> (Option<String>, String) {
    let lines: Vec<&str> = source.lines().collect();

    let Some(start) = lines.iter().position(|line| !line.trim().is_empty()) else {
        return (None, source.to_string());
    };
    if lines[start].trim() != "---" {
        return (None, source.to_string());
    }
    match lines[start + 1..].iter().position(|line| line.trim() == "---") {
        Some(offset) => {
            let end = start + 1 + offset;
            let metadata = lines[start + 1..end].join("\n");
            (Some(metadata), lines[end + 1..].join("\n"))
        }
        None => (None, source.to_string()),
    }
}

impl TabDocument {
    pub fn from_json(json: &str) -> Result<Self, TabError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, TabError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Build a document from script text with optional YAML frontmatter.
    pub fn from_source(source: &str) -> Result<Self, TabError> {
        let (metadata_content, script) = extract_frontmatter(source);
        let raw = match metadata_content {
            Some(content) if !content.trim().is_empty() => {
                serde_yaml::from_str::<RawMetadata>(&content)?
            }
            _ => RawMetadata::default(),
        };

        let original_key = match raw.original_key.as_deref() {
            Some(name) => name.parse()?,
            None => Key::default(),
        };

        Ok(TabDocument {
            title: raw.title.unwrap_or_default(),
            original_key,
            tab_script: script,
            chord_diagrams: raw.chord_diagrams,
        })
    }

    /// Load a document, choosing the format from the file extension:
    /// `.json`, `.yaml`/`.yml`, anything else is a script file.
    pub fn load(path: &Path) -> Result<Self, TabError> {
        let content = fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let mut doc = match extension.as_deref() {
            Some("json") => Self::from_json(&content)?,
            Some("yaml") | Some("yml") => Self::from_yaml(&content)?,
            _ => Self::from_source(&content)?,
        };
        if doc.title.is_empty() {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                doc.title = stem.to_string();
            }
        }
        log::debug!("Loaded '{}' from {}", doc.title, path.display());
        Ok(doc)
    }

    pub fn to_json(&self) -> Result<String, TabError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The key to view the tab in: an explicit selection wins over the key
    /// the tab was written in.
    pub fn resolve_key(&self, selected: Option<Key>) -> Key {
        selected.unwrap_or(self.original_key)
    }

    /// Like [`resolve_key`](Self::resolve_key), with the selection given by
    /// name as it arrives from the command line.
    pub fn select_key(&self, name: Option<&str>) -> Result<Key, TabError> {
        let selected = name.map(str::parse::<Key>).transpose()?;
        Ok(self.resolve_key(selected))
    }

    /// The diagrams listed for `key`, each entry parsed on its own.
    pub fn diagrams_for(&self, key: Key) -> Vec<(&ChordEntry, Result<ChordDiagram, TabError>)> {
        self.chord_diagrams
            .iter()
            .find(|set| set.key == key)
            .map(|set| set.chords.iter().map(|entry| (entry, entry.diagram())).collect())
            .unwrap_or_default()
    }

    /// Parse the script for display in `key`.
    pub fn sections(&self, key: Key) -> Vec<Section> {
        parse(self.tab_script.trim(), key)
    }

    pub fn view(&self, key: Key) -> DocumentView<'_> {
        DocumentView {
            title: &self.title,
            original_key: self.original_key,
            key,
            sections: self.sections(key),
        }
    }
}

/// A document parsed for one key, as printed by `--format json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentView<'a> {
    pub title: &'a str,
    pub original_key: Key,
    pub key: Key,
    pub sections: Vec<Section>,
}
