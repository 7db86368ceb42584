use anyhow::Result;
use serde::Serialize;

use salvage_core::classify::{default_classifier, MatchPolicy};
use salvage_core::model::{AssetPayload, ClassificationOutcome};
use salvage_core::reconstruct::ViewBoxHeuristic;

use crate::commands::util::parse_viewbox;

#[derive(Debug, Serialize)]
pub struct ClassifyOutput {
    pub literal: String,
    pub unclassified: bool,
    pub assets: Vec<AssetPayload>,
}

/// Classify a single literal the way `analyze` would, without writing anything.
pub fn classify_literal(
    literal: &str,
    viewbox: Option<&str>,
    first_match: bool,
) -> Result<ClassifyOutput> {
    let heuristic = match viewbox {
        Some(v) => parse_viewbox(v)?,
        None => ViewBoxHeuristic::default(),
    };
    let policy = if first_match { MatchPolicy::FirstMatch } else { MatchPolicy::All };
    let trimmed = literal.trim();
    let assets = match default_classifier(heuristic, policy).classify(trimmed) {
        ClassificationOutcome::Assets(payloads) => payloads,
        ClassificationOutcome::Unclassified => Vec::new(),
    };
    Ok(ClassifyOutput { literal: trimmed.to_string(), unclassified: assets.is_empty(), assets })
}

pub fn classify_command(
    literal: &str,
    viewbox: Option<&str>,
    first_match: bool,
    json: bool,
) -> Result<()> {
    let output = classify_literal(literal, viewbox, first_match)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if output.unclassified {
        println!("Unclassified");
        return Ok(());
    }

    for payload in &output.assets {
        match payload {
            AssetPayload::EncodedImage { extension, bytes, .. } => {
                println!("- {} ({}, {} bytes)", payload.kind().as_str(), extension, bytes.len());
            }
            AssetPayload::VectorPath { content } | AssetPayload::InlineMarkup { content } => {
                println!("- {}: {}", payload.kind().as_str(), content);
            }
        }
    }
    Ok(())
}
