//! Error types for map and enemy data loading.

use thiserror::Error;

/// Errors that can occur when loading maps or entity definitions.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// File could not be found.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },

    /// A tile row is not as wide as the map.
    #[error("Grid mismatch in layer '{layer}': row {row} has {actual} cells, expected {expected}")]
    GridMismatch {
        layer: String,
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Tile character missing from the layer palette.
    #[error("Unknown palette entry '{character}' at ({x}, {y}) in layer '{layer}'")]
    UnknownPaletteEntry {
        layer: String,
        character: char,
        x: usize,
        y: usize,
    },

    /// Object kind the loader does not know how to build; the map skips it.
    #[error("Unknown object kind '{0}'")]
    UnknownObject(String),

    /// Required property absent from an object's property bag.
    #[error("Object '{object}' is missing property '{property}'")]
    MissingProperty { object: String, property: String },

    /// Property present but of the wrong type or out of range.
    #[error("Object '{object}' has invalid property '{property}': expected {expected}")]
    InvalidProperty {
        object: String,
        property: String,
        expected: String,
    },
}
