use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::classify::{default_classifier, Classifier};
use crate::config::{FilePrefixes, PipelineOptions};
use crate::extract::{extract_literals, ExtractError};
use crate::layout::{FileOutputLayout, OutputLayout};
use crate::model::{
    AssetKind, ClassificationOutcome, ClassifiedAsset, FileAnalysis, SequenceCounters,
};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to serialize results: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl PipelineError {
    fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> PipelineError {
        let path = path.into();
        move |source| PipelineError::Io { path, source }
    }
}

/// Collects literals no detector claimed.
#[derive(Debug, Default)]
pub struct CorpusCollector {
    entries: Vec<String>,
    total_len: usize,
}

impl CorpusCollector {
    pub fn push(&mut self, literal: String) {
        self.total_len += literal.chars().count();
        self.entries.push(literal);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total length in characters of every collected literal.
    pub fn total_len(&self) -> usize {
        self.total_len
    }

    /// Entries ordered longest first; equal lengths keep encounter order.
    pub fn into_sorted(self) -> Vec<String> {
        let mut entries = self.entries;
        entries.sort_by_key(|e| std::cmp::Reverse(e.chars().count()));
        entries
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Classify every literal of `source` and build its results record.
///
/// Pure: nothing is written to disk.
pub fn analyze_source(
    file_name: &str,
    source: &str,
    options: &PipelineOptions,
) -> Result<FileAnalysis, ExtractError> {
    let classifier = default_classifier(options.viewbox, options.match_policy);
    analyze_with(&classifier, file_name, source)
}

/// Same as [`analyze_source`] with a caller-supplied classifier.
pub fn analyze_with(
    classifier: &Classifier,
    file_name: &str,
    source: &str,
) -> Result<FileAnalysis, ExtractError> {
    let mut counters = SequenceCounters::new();
    let mut images = Vec::new();
    let mut corpus = CorpusCollector::default();
    let mut total_literals = 0;

    for literal in extract_literals(source)? {
        total_literals += 1;
        match classifier.classify(&literal.trimmed) {
            ClassificationOutcome::Assets(payloads) => {
                for payload in payloads {
                    let sequence = counters.next(payload.kind());
                    images.push(ClassifiedAsset { sequence, file_name: None, payload });
                }
            }
            ClassificationOutcome::Unclassified => corpus.push(literal.trimmed),
        }
    }

    let other_literals_length = corpus.total_len();
    Ok(FileAnalysis {
        file_name: file_name.to_string(),
        source_sha256: Some(sha256_hex(source.as_bytes())),
        analyzed_at: Utc::now().to_rfc3339(),
        total_literals,
        images_count: images.len(),
        svg_paths: counters.count(AssetKind::VectorPath),
        base64_images: counters.count(AssetKind::EncodedImage),
        inline_svgs: counters.count(AssetKind::InlineMarkup),
        images,
        other_literals_length,
        other_literals: corpus.into_sorted(),
    })
}

/// Pick a file name in `dir` that is neither on disk nor already handed out.
fn unique_file_name(dir: &Path, stem: &str, ext: &str, taken: &mut HashSet<String>) -> String {
    let mut candidate = format!("{stem}.{ext}");
    let mut n = 1;
    while taken.contains(&candidate) || dir.join(&candidate).exists() {
        candidate = format!("{stem}-{n}.{ext}");
        n += 1;
    }
    taken.insert(candidate.clone());
    candidate
}

/// Persist assets, corpus and results record for one analyzed file.
///
/// Every write has completed when this returns. Assets get their
/// `file_name` filled in.
pub fn write_analysis(
    analysis: &mut FileAnalysis,
    layout: &FileOutputLayout,
    prefixes: &FilePrefixes,
) -> Result<Vec<PathBuf>, PipelineError> {
    fs::create_dir_all(&layout.dir).map_err(PipelineError::io(&layout.dir))?;

    let mut taken = HashSet::new();
    for reserved in [&layout.corpus_path, &layout.analysis_path] {
        if let Some(name) = reserved.file_name().and_then(|n| n.to_str()) {
            taken.insert(name.to_string());
        }
    }

    let mut written = Vec::with_capacity(analysis.images.len() + 2);
    for asset in &mut analysis.images {
        let stem = format!("{}_{}", prefixes.for_kind(asset.kind()), asset.sequence);
        let name = unique_file_name(&layout.dir, &stem, asset.payload.extension(), &mut taken);
        let path = layout.dir.join(&name);
        fs::write(&path, asset.payload.file_bytes()).map_err(PipelineError::io(&path))?;
        debug!(kind = asset.kind().as_str(), path = %path.display(), "wrote asset");
        asset.file_name = Some(name);
        written.push(path);
    }

    fs::write(&layout.corpus_path, analysis.other_literals.join("\n"))
        .map_err(PipelineError::io(&layout.corpus_path))?;
    written.push(layout.corpus_path.clone());

    let record = serde_json::to_string_pretty(analysis)?;
    fs::write(&layout.analysis_path, record).map_err(PipelineError::io(&layout.analysis_path))?;
    written.push(layout.analysis_path.clone());

    Ok(written)
}

/// Read, analyze and persist a single source file.
pub fn analyze_file(
    path: &Path,
    output: &OutputLayout,
    options: &PipelineOptions,
) -> Result<FileAnalysis, PipelineError> {
    let bytes = fs::read(path).map_err(PipelineError::io(path))?;
    let source = String::from_utf8_lossy(&bytes);
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string());

    let layout = output.file_layout(&file_name);
    if options.clean_output && layout.dir.exists() {
        fs::remove_dir_all(&layout.dir).map_err(PipelineError::io(&layout.dir))?;
    }

    let mut analysis = analyze_source(&file_name, &source, options)?;
    write_analysis(&mut analysis, &layout, &options.prefixes)?;

    info!(
        file = %file_name,
        literals = analysis.total_literals,
        svg_paths = analysis.svg_paths,
        base64_images = analysis.base64_images,
        inline_svgs = analysis.inline_svgs,
        unclassified = analysis.other_literals.len(),
        "analyzed file"
    );
    Ok(analysis)
}

/// Counts for one successfully analyzed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSummary {
    pub file_name: String,
    pub output_dir: String,
    pub total_literals: usize,
    pub svg_paths: usize,
    pub base64_images: usize,
    pub inline_svgs: usize,
    pub unclassified: usize,
    pub unclassified_length: usize,
}

impl FileSummary {
    fn from_analysis(analysis: &FileAnalysis, layout: &FileOutputLayout) -> Self {
        Self {
            file_name: analysis.file_name.clone(),
            output_dir: layout.dir.display().to_string(),
            total_literals: analysis.total_literals,
            svg_paths: analysis.svg_paths,
            base64_images: analysis.base64_images,
            inline_svgs: analysis.inline_svgs,
            unclassified: analysis.other_literals.len(),
            unclassified_length: analysis.other_literals_length,
        }
    }
}

/// What happened to one input of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    Analyzed(FileSummary),
    /// Source did not parse; nothing was written.
    Skipped { source: String, error: String },
    /// Reading or writing failed.
    Failed { source: String, error: String },
}

/// Per-file outcomes in input order, plus totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub files: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn analyzed(&self) -> impl Iterator<Item = &FileSummary> {
        self.files.iter().filter_map(|f| match f {
            FileOutcome::Analyzed(summary) => Some(summary),
            _ => None,
        })
    }

    pub fn total(&self, kind: AssetKind) -> usize {
        self.analyzed()
            .map(|s| match kind {
                AssetKind::VectorPath => s.svg_paths,
                AssetKind::EncodedImage => s.base64_images,
                AssetKind::InlineMarkup => s.inline_svgs,
            })
            .sum()
    }

    pub fn skipped_count(&self) -> usize {
        self.files.iter().filter(|f| matches!(f, FileOutcome::Skipped { .. })).count()
    }

    pub fn failed_count(&self) -> usize {
        self.files.iter().filter(|f| matches!(f, FileOutcome::Failed { .. })).count()
    }
}

fn process_one(path: &Path, output: &OutputLayout, options: &PipelineOptions) -> FileOutcome {
    let source = path.display().to_string();
    match analyze_file(path, output, options) {
        Ok(analysis) => {
            let layout = output.file_layout(&analysis.file_name);
            FileOutcome::Analyzed(FileSummary::from_analysis(&analysis, &layout))
        }
        Err(PipelineError::Extract(err)) => {
            warn!(file = %source, error = %err, "skipping file that failed to parse");
            FileOutcome::Skipped { source, error: err.to_string() }
        }
        Err(err) => {
            warn!(file = %source, error = %err, "file failed");
            FileOutcome::Failed { source, error: err.to_string() }
        }
    }
}

/// Analyze every input. A file that fails never stops the others.
pub fn run_batch(
    inputs: &[PathBuf],
    output: &OutputLayout,
    options: &PipelineOptions,
) -> BatchReport {
    let files: Vec<FileOutcome> = if options.parallel {
        inputs.par_iter().map(|p| process_one(p, output, options)).collect()
    } else {
        inputs.iter().map(|p| process_one(p, output, options)).collect()
    };
    let report = BatchReport { files };
    info!(
        files = report.files.len(),
        skipped = report.skipped_count(),
        failed = report.failed_count(),
        svg_paths = report.total(AssetKind::VectorPath),
        base64_images = report.total(AssetKind::EncodedImage),
        inline_svgs = report.total(AssetKind::InlineMarkup),
        "batch finished"
    );
    report
}

/// Write the batch report to the layout's summary path.
pub fn write_batch_summary(
    report: &BatchReport,
    output: &OutputLayout,
) -> Result<(), PipelineError> {
    fs::create_dir_all(&output.root).map_err(PipelineError::io(&output.root))?;
    let body = serde_json::to_string_pretty(report)?;
    fs::write(&output.summary_path, body).map_err(PipelineError::io(&output.summary_path))
}

/// Resolve an input path to source files: a file is taken as-is, a directory
/// contributes its `*.js` files sorted by name.
pub fn discover_sources(input: &Path) -> Result<Vec<PathBuf>, PipelineError> {
    if !input.is_dir() {
        if !input.is_file() {
            return Err(PipelineError::Io {
                path: input.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "input not found"),
            });
        }
        return Ok(vec![input.to_path_buf()]);
    }

    let mut sources = Vec::new();
    for entry in fs::read_dir(input).map_err(PipelineError::io(input))? {
        let entry = entry.map_err(PipelineError::io(input))?;
        let path = entry.path();
        if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("js") {
            sources.push(path);
        }
    }
    sources.sort();
    Ok(sources)
}
