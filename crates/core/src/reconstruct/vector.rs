//! SVG document synthesis for bare path-command strings.
//!
//! Geometry is guessed from the numbers in the path; neither heuristic
//! interprets the path commands, so relative segments and arc flags are
//! treated like any other coordinate.

use std::sync::LazyLock;

use quick_xml::escape::escape;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Size used when an axis collapses to zero or is not a finite number.
const FALLBACK_DIMENSION: u32 = 24;
/// Smallest viewBox side produced by the extent heuristic.
const MIN_EXTENT_DIMENSION: u32 = 16;
/// Smallest viewBox side produced by the square heuristic.
const MIN_SQUARE_DIMENSION: u32 = 20;

static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-?\d*\.?\d+").unwrap());

/// Inferred viewBox size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewBox {
    pub width: u32,
    pub height: u32,
}

/// Strategy for guessing a viewBox from path numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewBoxHeuristic {
    /// Pair numbers as (x, y), take the bounding extent, snap small icons to
    /// 16 or 24 and pad larger drawings by 10%.
    #[default]
    MinMaxExtent,
    /// Square side from the largest absolute number plus 20%, at least 20.
    MaxSquare,
}

impl ViewBoxHeuristic {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewBoxHeuristic::MinMaxExtent => "min-max-extent",
            ViewBoxHeuristic::MaxSquare => "max-square",
        }
    }

    /// Guess a viewBox from the numeric stream. `None` when there are no numbers.
    pub fn infer(&self, numbers: &[f64]) -> Option<ViewBox> {
        if numbers.is_empty() {
            return None;
        }
        Some(match self {
            ViewBoxHeuristic::MinMaxExtent => min_max_extent(numbers),
            ViewBoxHeuristic::MaxSquare => max_square(numbers),
        })
    }
}

impl std::str::FromStr for ViewBoxHeuristic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "min-max-extent" => Ok(ViewBoxHeuristic::MinMaxExtent),
            "max-square" => Ok(ViewBoxHeuristic::MaxSquare),
            other => Err(format!(
                "Invalid viewBox heuristic '{other}'. Allowed: min-max-extent, max-square"
            )),
        }
    }
}

/// Every signed decimal in `path`, in encounter order.
pub fn path_numbers(path: &str) -> Vec<f64> {
    NUMBER_RE.find_iter(path).filter_map(|m| m.as_str().parse::<f64>().ok()).collect()
}

fn axis_size(min: f64, max: f64) -> u32 {
    let span = (max - min).ceil();
    if !span.is_finite() || span <= 0.0 {
        FALLBACK_DIMENSION
    } else {
        span.min(u32::MAX as f64) as u32
    }
}

fn min_max_extent(numbers: &[f64]) -> ViewBox {
    let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);

    for pair in numbers.chunks_exact(2) {
        min_x = min_x.min(pair[0]);
        max_x = max_x.max(pair[0]);
        min_y = min_y.min(pair[1]);
        max_y = max_y.max(pair[1]);
    }

    let width = axis_size(min_x, max_x);
    let height = axis_size(min_y, max_y);

    if width <= 24 && height <= 24 {
        let side = if width > 16 || height > 16 { 24 } else { 16 };
        return ViewBox { width: side, height: side };
    }

    let pad = |d: u32| {
        let padded = (u64::from(d) * 11).div_ceil(10).min(u64::from(u32::MAX)) as u32;
        padded.max(MIN_EXTENT_DIMENSION)
    };
    ViewBox { width: pad(width), height: pad(height) }
}

fn max_square(numbers: &[f64]) -> ViewBox {
    let max_abs = numbers.iter().map(|n| n.abs()).filter(|n| n.is_finite()).fold(0.0, f64::max);
    let side = (max_abs * 12.0 / 10.0).ceil().min(u32::MAX as f64) as u32;
    let side = side.max(MIN_SQUARE_DIMENSION);
    ViewBox { width: side, height: side }
}

/// Wrap `path` in a minimal standalone SVG document.
///
/// The path is entity-escaped inside the `d` attribute, so its parsed value is
/// the literal unchanged. Returns `None` when no numeric tokens can be found.
pub fn reconstruct_vector(path: &str, heuristic: ViewBoxHeuristic) -> Option<String> {
    let view_box = heuristic.infer(&path_numbers(path))?;
    Some(format!(
        r#"<svg xmlns="{SVG_NAMESPACE}" viewBox="0 0 {} {}"><path d="{}"></path></svg>"#,
        view_box.width,
        view_box.height,
        escape(path)
    ))
}
