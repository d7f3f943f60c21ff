//! # Error Types
//!
//! This module defines all error types for the tabmaker engine.
//!
//! Most conditions here never escape the two core entry points. The parser
//! drops malformed blocks and the transposer degrades an unknown degree to the
//! `"ERR"` sentinel, so a hand-typed script always renders something. The
//! variants exist for the strict helpers (`try_transpose`, `Key::from_str`,
//! diagram and document loading) and for logging.
//!
//! ## Error Types
//! - `UnrecognizedDegree` - A chord expression whose Roman numeral is unknown
//! - `UnsupportedKey` - A key name outside the supported enumeration
//! - `MalformedBlock` - A block that fails the `[chord] (pitch) lyrics` grammar
//! - `InvalidDiagram` - Chord diagram data that fails `caption[f:f:f:f:f:f]`
//! - `Io` / `Json` / `Yaml` - Document loading failures
//!
//! ## Usage
//! ```rust
//! use tabmaker::{Key, TabError};
//!
//! match "H".parse::<Key>() {
//!     Ok(key) => println!("Key {}", key),
//!     Err(TabError::UnsupportedKey(name)) => eprintln!("No scale for {}", name),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TabError {
    /// Chord expression whose degree is not one of I..VII or i..vii.
    ///
    /// # Example
    /// ```
    /// # use tabmaker::TabError;
    /// let err = TabError::UnrecognizedDegree("XYZ".to_string());
    /// assert_eq!(err.to_string(), "Unrecognized chord degree: XYZ");
    /// ```
    #[error("Unrecognized chord degree: {0}")]
    UnrecognizedDegree(String),

    /// Key name with no scale in the transpose table.
    ///
    /// # Example
    /// ```
    /// # use tabmaker::TabError;
    /// let err = TabError::UnsupportedKey("H".to_string());
    /// assert_eq!(err.to_string(), "Unsupported key: H");
    /// ```
    #[error("Unsupported key: {0}")]
    UnsupportedKey(String),

    /// Block text that does not match `[chord] (pitch) lyrics`.
    #[error("Malformed block '{block}': {message}")]
    MalformedBlock { block: String, message: String },

    /// Chord diagram data that does not match `caption[f:f:f:f:f:f]`.
    #[error("Invalid chord diagram '{data}': {message}")]
    InvalidDiagram { data: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML document: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
