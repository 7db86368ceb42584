use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use tracing::info;

use salvage_core::layout::OutputLayout;
use salvage_core::model::AssetKind;
use salvage_core::services::pipeline::{
    discover_sources, run_batch, write_batch_summary, BatchReport, FileOutcome,
};

use crate::resolve_output_root;
use crate::commands::util::{resolve_pipeline_options, PipelineOverrides};

#[derive(Debug, Serialize)]
pub struct AnalyzeTotals {
    pub files: usize,
    pub analyzed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub total_literals: usize,
    pub svg_paths: usize,
    pub base64_images: usize,
    pub inline_svgs: usize,
    pub unclassified: usize,
}

impl AnalyzeTotals {
    pub fn from_report(report: &BatchReport) -> Self {
        Self {
            files: report.files.len(),
            analyzed: report.analyzed().count(),
            skipped: report.skipped_count(),
            failed: report.failed_count(),
            total_literals: report.analyzed().map(|s| s.total_literals).sum(),
            svg_paths: report.total(AssetKind::VectorPath),
            base64_images: report.total(AssetKind::EncodedImage),
            inline_svgs: report.total(AssetKind::InlineMarkup),
            unclassified: report.analyzed().map(|s| s.unclassified).sum(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AnalyzeOutput<'a> {
    pub input: String,
    pub output_dir: String,
    pub summary_file: String,
    pub totals: AnalyzeTotals,
    pub files: &'a [FileOutcome],
}

/// Analyze a JavaScript file, or every `*.js` file in a directory.
///
/// Files that fail to parse are reported and skipped. Any read/write failure
/// makes the command fail after the whole batch has run.
pub fn analyze_command(
    input: &str,
    out: &str,
    config: Option<&str>,
    overrides: &PipelineOverrides,
    json: bool,
) -> Result<()> {
    let options = resolve_pipeline_options(config, overrides)?;
    let input_path = Path::new(input);
    let sources = discover_sources(input_path)
        .with_context(|| format!("Failed to read input: {}", input_path.display()))?;
    if sources.is_empty() {
        return Err(anyhow!("No .js files found in {}", input_path.display()));
    }

    let output = OutputLayout::new(resolve_output_root(out)?);
    info!(
        files = sources.len(),
        output = %output.root.display(),
        viewbox = options.viewbox.as_str(),
        "starting analysis"
    );
    let report = run_batch(&sources, &output, &options);
    write_batch_summary(&report, &output).with_context(|| {
        format!("Failed to write batch summary: {}", output.summary_path.display())
    })?;

    let totals = AnalyzeTotals::from_report(&report);
    let failed = totals.failed;

    if json {
        let body = AnalyzeOutput {
            input: input_path.display().to_string(),
            output_dir: output.root.display().to_string(),
            summary_file: output.summary_path.display().to_string(),
            totals,
            files: &report.files,
        };
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        print_report(&report, &totals, &output);
    }

    if failed > 0 {
        return Err(anyhow!("{} file(s) could not be read or written", failed));
    }
    Ok(())
}

fn print_report(report: &BatchReport, totals: &AnalyzeTotals, output: &OutputLayout) {
    for outcome in &report.files {
        match outcome {
            FileOutcome::Analyzed(summary) => {
                println!("{} -> {}", summary.file_name, summary.output_dir);
                println!("  Total literals: {}", summary.total_literals);
                println!("  SVG paths: {}", summary.svg_paths);
                println!("  Base64 images: {}", summary.base64_images);
                println!("  <svg> elements: {}", summary.inline_svgs);
                println!(
                    "  Unclassified literals: {} ({} chars)",
                    summary.unclassified, summary.unclassified_length
                );
            }
            FileOutcome::Skipped { source, error } => {
                println!("{}: skipped ({})", source, error);
            }
            FileOutcome::Failed { source, error } => {
                println!("{}: FAILED ({})", source, error);
            }
        }
    }

    if report.files.len() > 1 {
        println!(
            "Totals: {} analyzed, {} skipped, {} failed; {} SVG paths, {} base64 images, {} <svg> elements",
            totals.analyzed,
            totals.skipped,
            totals.failed,
            totals.svg_paths,
            totals.base64_images,
            totals.inline_svgs
        );
    }
    println!("Summary: {}", output.summary_path.display());
}
