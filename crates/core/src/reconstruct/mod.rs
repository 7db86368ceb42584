//! Turning classified literals into standalone files.
//!
//! - `vector`: wraps bare path data in a minimal SVG document.
//! - `image`: decodes base64 data URIs into raw image bytes.
//!
//! Inline `<svg>` markup needs no reconstruction; the detector's match is
//! written as-is.

pub mod image;
pub mod vector;

pub use image::{decode_data_uri, find_data_uri, DecodeError, DecodedImage};
pub use vector::{reconstruct_vector, ViewBox, ViewBoxHeuristic};
