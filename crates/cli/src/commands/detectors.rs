use anyhow::Result;
use serde::Serialize;

use salvage_core::classify::{default_classifier, MatchPolicy};
use salvage_core::reconstruct::ViewBoxHeuristic;

#[derive(Debug, Serialize)]
pub struct DetectorInfo {
    pub priority: usize,
    pub name: String,
    pub kind: String,
    pub description: String,
}

/// Describe the built-in detectors in priority order.
pub fn detector_infos() -> Vec<DetectorInfo> {
    let classifier = default_classifier(ViewBoxHeuristic::default(), MatchPolicy::default());
    classifier
        .detectors()
        .enumerate()
        .map(|(priority, detector)| {
            let description = match detector.name() {
                "svg-path" => {
                    "Bare path data starting with an absolute move-to; wrapped in an SVG document"
                        .to_string()
                }
                "base64-image" => {
                    "png/jpeg/jpg/gif/svg+xml data URIs, bare or inside url(...)".to_string()
                }
                "inline-svg" => "First <svg>...</svg> span inside a literal".to_string(),
                other => format!("Detector '{}'", other),
            };
            DetectorInfo {
                priority,
                name: detector.name().to_string(),
                kind: detector.kind().as_str().to_string(),
                description,
            }
        })
        .collect()
}

/// List the detectors known to this binary.
pub fn list_detectors_command(json: bool) -> Result<()> {
    let entries = detector_infos();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("Detectors (priority order):");
    for entry in entries {
        println!("{}. {} [{}]: {}", entry.priority + 1, entry.name, entry.kind, entry.description);
    }

    Ok(())
}
