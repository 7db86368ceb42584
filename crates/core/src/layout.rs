use std::path::{Path, PathBuf};

/// File name of the per-file results record.
pub const ANALYSIS_FILE_NAME: &str = "analysis.json";
/// File name of the batch summary written at the output root.
pub const SUMMARY_FILE_NAME: &str = "summary.json";

/// Logical layout of an output directory.
///
/// This is derived from a chosen root path. It does *not* perform any IO itself;
/// the pipeline creates directories when it first writes into them.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    /// Root directory for all recovered assets.
    pub root: PathBuf,
    /// Path to the batch summary (JSON).
    pub summary_path: PathBuf,
}

impl OutputLayout {
    /// Compute the layout for an output tree rooted at `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        let summary_path = root.join(SUMMARY_FILE_NAME);
        Self { root, summary_path }
    }

    /// Per-source-file layout. Every source gets its own directory, so
    /// sequence-numbered names never collide across files.
    pub fn file_layout(&self, source_file_name: &str) -> FileOutputLayout {
        let stem = source_stem(source_file_name).to_string();
        let dir = self.root.join(output_dir_name(&stem));
        let corpus_path = dir.join(format!("uncategorized_literals_{stem}.txt"));
        let analysis_path = dir.join(ANALYSIS_FILE_NAME);
        FileOutputLayout { stem, dir, corpus_path, analysis_path }
    }
}

/// Output paths for one analyzed source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutputLayout {
    /// Source file name without its `.js` suffix.
    pub stem: String,
    /// Directory holding the recovered assets.
    pub dir: PathBuf,
    /// Newline-joined unclassified literals, longest first.
    pub corpus_path: PathBuf,
    /// Results record (JSON).
    pub analysis_path: PathBuf,
}

/// Directory name for a source stem. A stem equal to a file the batch writes
/// at the output root gets a `_src` suffix.
fn output_dir_name(stem: &str) -> String {
    if stem == SUMMARY_FILE_NAME {
        format!("{stem}_src")
    } else {
        stem.to_string()
    }
}

/// Strip a trailing `.js` from a source file name.
pub fn source_stem(file_name: &str) -> &str {
    match file_name.strip_suffix(".js") {
        Some(stem) if !stem.is_empty() => stem,
        _ => file_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_layout_nests_under_source_stem() {
        let layout = OutputLayout::new("/out");
        let file = layout.file_layout("bundle.min.js");
        assert_eq!(file.stem, "bundle.min");
        assert_eq!(file.dir, Path::new("/out/bundle.min"));
        assert_eq!(
            file.corpus_path,
            Path::new("/out/bundle.min/uncategorized_literals_bundle.min.txt")
        );
        assert_eq!(file.analysis_path, Path::new("/out/bundle.min/analysis.json"));
        assert_eq!(layout.summary_path, Path::new("/out/summary.json"));
    }

    #[test]
    fn source_named_like_summary_does_not_take_its_path() {
        let layout = OutputLayout::new("/out");
        let file = layout.file_layout("summary.json.js");
        assert_eq!(file.stem, "summary.json");
        assert_eq!(file.dir, Path::new("/out/summary.json_src"));
        assert_ne!(file.dir, layout.summary_path);
        assert_eq!(
            file.corpus_path,
            Path::new("/out/summary.json_src/uncategorized_literals_summary.json.txt")
        );
    }

    #[test]
    fn stem_keeps_names_without_js_suffix() {
        assert_eq!(source_stem("chunk.mjs"), "chunk.mjs");
        assert_eq!(source_stem(".js"), ".js");
        assert_eq!(source_stem("app.js"), "app");
    }
}
