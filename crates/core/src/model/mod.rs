//! Core data model for literals, classified assets, and per-file results.
//!
//! Everything here is created and consumed while a single source file is
//! processed; nothing in this module carries state across files.

use serde::{Deserialize, Serialize};

/// Value of a literal node as seen at the extractor boundary.
///
/// Only non-empty `Str` values continue down the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Str(String),
    Number(f64),
    Boolean(bool),
    Null,
}

impl LiteralValue {
    /// Convert into a `SourceLiteral` if this is a non-empty string.
    pub fn into_source_literal(self) -> Option<SourceLiteral> {
        match self {
            LiteralValue::Str(raw) if !raw.is_empty() => Some(SourceLiteral::new(raw)),
            _ => None,
        }
    }
}

/// A single string literal pulled from the syntax tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLiteral {
    pub raw: String,
    pub trimmed: String,
}

impl SourceLiteral {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let trimmed = raw.trim().to_string();
        Self { raw, trimmed }
    }
}

/// The three asset families the classifier knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetKind {
    #[serde(rename = "svg_path")]
    VectorPath,
    #[serde(rename = "base64_image")]
    EncodedImage,
    #[serde(rename = "inline_svg")]
    InlineMarkup,
}

impl AssetKind {
    pub const ALL: [AssetKind; 3] =
        [AssetKind::VectorPath, AssetKind::EncodedImage, AssetKind::InlineMarkup];

    /// Tag used in results records and log lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::VectorPath => "svg_path",
            AssetKind::EncodedImage => "base64_image",
            AssetKind::InlineMarkup => "inline_svg",
        }
    }

    /// Default output file prefix for this kind.
    pub fn default_prefix(&self) -> &'static str {
        match self {
            AssetKind::VectorPath => "svg_extracted",
            AssetKind::EncodedImage => "base64_image",
            AssetKind::InlineMarkup => "inline_svg",
        }
    }

    fn index(self) -> usize {
        match self {
            AssetKind::VectorPath => 0,
            AssetKind::EncodedImage => 1,
            AssetKind::InlineMarkup => 2,
        }
    }
}

/// Reconstructed content of one detected asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AssetPayload {
    /// Synthesized SVG document wrapping a bare path string.
    #[serde(rename = "svg_path")]
    VectorPath { content: String },
    /// Decoded data-URI image. `content` keeps the (unwrapped) data URI.
    #[serde(rename = "base64_image")]
    EncodedImage {
        content: String,
        extension: String,
        #[serde(skip)]
        bytes: Vec<u8>,
    },
    /// `<svg>...</svg>` span lifted verbatim out of a literal.
    #[serde(rename = "inline_svg")]
    InlineMarkup { content: String },
}

impl AssetPayload {
    pub fn kind(&self) -> AssetKind {
        match self {
            AssetPayload::VectorPath { .. } => AssetKind::VectorPath,
            AssetPayload::EncodedImage { .. } => AssetKind::EncodedImage,
            AssetPayload::InlineMarkup { .. } => AssetKind::InlineMarkup,
        }
    }

    /// File extension (without dot) used when persisting this payload.
    pub fn extension(&self) -> &str {
        match self {
            AssetPayload::EncodedImage { extension, .. } => extension,
            AssetPayload::VectorPath { .. } | AssetPayload::InlineMarkup { .. } => "svg",
        }
    }

    /// Bytes written to disk for this payload.
    pub fn file_bytes(&self) -> &[u8] {
        match self {
            AssetPayload::VectorPath { content } | AssetPayload::InlineMarkup { content } => {
                content.as_bytes()
            }
            AssetPayload::EncodedImage { bytes, .. } => bytes,
        }
    }
}

/// An asset with its per-kind sequence number within one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedAsset {
    pub sequence: usize,
    /// Output file name, assigned when the asset is persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(flatten)]
    pub payload: AssetPayload,
}

impl ClassifiedAsset {
    pub fn kind(&self) -> AssetKind {
        self.payload.kind()
    }
}

/// Result of running the classifier over one literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassificationOutcome {
    /// One or more payloads; never empty.
    Assets(Vec<AssetPayload>),
    Unclassified,
}

impl ClassificationOutcome {
    pub fn from_payloads(payloads: Vec<AssetPayload>) -> Self {
        if payloads.is_empty() {
            ClassificationOutcome::Unclassified
        } else {
            ClassificationOutcome::Assets(payloads)
        }
    }

    pub fn is_unclassified(&self) -> bool {
        matches!(self, ClassificationOutcome::Unclassified)
    }
}

/// Per-kind counters handed out by the driver.
///
/// Owned by a single file's analysis; never shared across files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SequenceCounters {
    next: [usize; 3],
}

impl SequenceCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the next sequence number for `kind`.
    pub fn next(&mut self, kind: AssetKind) -> usize {
        let slot = &mut self.next[kind.index()];
        let value = *slot;
        *slot += 1;
        value
    }

    /// Number of sequence values handed out so far for `kind`.
    pub fn count(&self, kind: AssetKind) -> usize {
        self.next[kind.index()]
    }
}

/// Results record for one source file.
///
/// This is the contract handed to downstream reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAnalysis {
    pub file_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_sha256: Option<String>,
    pub analyzed_at: String,
    pub total_literals: usize,
    pub images_count: usize,
    pub svg_paths: usize,
    pub base64_images: usize,
    pub inline_svgs: usize,
    pub images: Vec<ClassifiedAsset>,
    pub other_literals_length: usize,
    pub other_literals: Vec<String>,
}

impl FileAnalysis {
    pub fn count(&self, kind: AssetKind) -> usize {
        match kind {
            AssetKind::VectorPath => self.svg_paths,
            AssetKind::EncodedImage => self.base64_images,
            AssetKind::InlineMarkup => self.inline_svgs,
        }
    }
}
