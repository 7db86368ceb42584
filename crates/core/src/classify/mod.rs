//! Literal classification.
//!
//! A [`Classifier`] holds an ordered list of [`AssetDetector`]s. Each detector
//! looks at a trimmed literal on its own and either produces a reconstructed
//! [`AssetPayload`] or declines. How multiple hits on the same literal are
//! resolved is controlled by [`MatchPolicy`].

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::model::{AssetKind, AssetPayload, ClassificationOutcome};
use crate::reconstruct::{decode_data_uri, find_data_uri, reconstruct_vector, ViewBoxHeuristic};

static PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^M\d+(?:\.\d+)?(?:[ ,]\d+(?:\.\d+)?)+").unwrap()
});

static INLINE_SVG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<svg[^>]*>[\s\S]*?</svg>").unwrap());

/// "M365" product strings look exactly like a move-to command.
const PATH_FALSE_POSITIVE_PREFIX: &[u8] = b"M365";

/// How to resolve a literal that more than one detector accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchPolicy {
    /// Run every detector and keep every hit.
    #[default]
    All,
    /// Stop at the first detector that produces an asset.
    FirstMatch,
}

/// A single pattern detector.
pub trait AssetDetector: Send + Sync {
    fn name(&self) -> &'static str;
    fn kind(&self) -> AssetKind;
    /// Inspect a trimmed literal. `None` means "not mine".
    fn detect(&self, literal: &str) -> Option<AssetPayload>;
}

/// Bare SVG path data starting with an absolute move-to.
#[derive(Debug, Clone, Copy, Default)]
pub struct VectorPathDetector {
    pub heuristic: ViewBoxHeuristic,
}

impl VectorPathDetector {
    pub fn new(heuristic: ViewBoxHeuristic) -> Self {
        Self { heuristic }
    }

    /// Pattern check alone, before geometry inference.
    pub fn matches(literal: &str) -> bool {
        let guarded = literal
            .as_bytes()
            .get(..PATH_FALSE_POSITIVE_PREFIX.len())
            .is_some_and(|p| p.eq_ignore_ascii_case(PATH_FALSE_POSITIVE_PREFIX));
        !guarded && PATH_RE.is_match(literal)
    }
}

impl AssetDetector for VectorPathDetector {
    fn name(&self) -> &'static str {
        "svg-path"
    }

    fn kind(&self) -> AssetKind {
        AssetKind::VectorPath
    }

    fn detect(&self, literal: &str) -> Option<AssetPayload> {
        if !Self::matches(literal) {
            return None;
        }
        match reconstruct_vector(literal, self.heuristic) {
            Some(content) => Some(AssetPayload::VectorPath { content }),
            None => {
                debug!(literal_len = literal.len(), "path literal had no numeric tokens");
                None
            }
        }
    }
}

/// Base64 image data URIs, bare or inside a CSS `url(...)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EncodedImageDetector;

impl AssetDetector for EncodedImageDetector {
    fn name(&self) -> &'static str {
        "base64-image"
    }

    fn kind(&self) -> AssetKind {
        AssetKind::EncodedImage
    }

    fn detect(&self, literal: &str) -> Option<AssetPayload> {
        let uri = find_data_uri(literal)?;
        match decode_data_uri(uri) {
            Ok(image) => Some(AssetPayload::EncodedImage {
                content: uri.to_string(),
                extension: image.extension,
                bytes: image.bytes,
            }),
            Err(err) => {
                warn!(error = %err, "skipping undecodable data URI");
                None
            }
        }
    }
}

/// `<svg>...</svg>` markup embedded anywhere in a literal.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineMarkupDetector;

impl AssetDetector for InlineMarkupDetector {
    fn name(&self) -> &'static str {
        "inline-svg"
    }

    fn kind(&self) -> AssetKind {
        AssetKind::InlineMarkup
    }

    fn detect(&self, literal: &str) -> Option<AssetPayload> {
        INLINE_SVG_RE
            .find(literal)
            .map(|m| AssetPayload::InlineMarkup { content: m.as_str().to_string() })
    }
}

/// Ordered detector list plus a resolution policy.
pub struct Classifier {
    detectors: Vec<Box<dyn AssetDetector>>,
    policy: MatchPolicy,
}

impl Classifier {
    pub fn new(policy: MatchPolicy) -> Self {
        Self { detectors: Vec::new(), policy }
    }

    /// Append a detector; registration order is priority order.
    pub fn register<D: AssetDetector + 'static>(&mut self, detector: D) -> &mut Self {
        self.detectors.push(Box::new(detector));
        self
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Detector names in priority order.
    pub fn names(&self) -> Vec<&'static str> {
        self.detectors.iter().map(|d| d.name()).collect()
    }

    pub fn detectors(&self) -> impl Iterator<Item = &dyn AssetDetector> {
        self.detectors.iter().map(|d| &**d)
    }

    /// Classify one trimmed literal.
    pub fn classify(&self, literal: &str) -> ClassificationOutcome {
        let mut payloads = Vec::new();
        for detector in &self.detectors {
            if let Some(payload) = detector.detect(literal) {
                debug!(detector = detector.name(), "literal matched");
                payloads.push(payload);
                if self.policy == MatchPolicy::FirstMatch {
                    break;
                }
            }
        }
        ClassificationOutcome::from_payloads(payloads)
    }
}

/// Classifier with the three built-in detectors in their fixed order:
/// path data, data-URI images, inline markup.
pub fn default_classifier(heuristic: ViewBoxHeuristic, policy: MatchPolicy) -> Classifier {
    let mut classifier = Classifier::new(policy);
    classifier
        .register(VectorPathDetector::new(heuristic))
        .register(EncodedImageDetector)
        .register(InlineMarkupDetector);
    classifier
}
