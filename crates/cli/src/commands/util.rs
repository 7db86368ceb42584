use std::path::Path;

use anyhow::{anyhow, Result};

use salvage_core::classify::MatchPolicy;
use salvage_core::config::{load_config, PipelineOptions};
use salvage_core::reconstruct::ViewBoxHeuristic;

/// Command-line switches layered over the config file.
#[derive(Debug, Clone, Default)]
pub struct PipelineOverrides {
    pub viewbox: Option<String>,
    pub first_match: bool,
    pub parallel: bool,
    pub no_clean: bool,
}

impl PipelineOverrides {
    /// Apply flags on top of `options`. Flags only ever switch behavior on.
    pub fn apply(&self, options: &mut PipelineOptions) -> Result<()> {
        if let Some(viewbox) = &self.viewbox {
            options.viewbox = parse_viewbox(viewbox)?;
        }
        if self.first_match {
            options.match_policy = MatchPolicy::FirstMatch;
        }
        if self.parallel {
            options.parallel = true;
        }
        if self.no_clean {
            options.clean_output = false;
        }
        Ok(())
    }
}

pub fn parse_viewbox(value: &str) -> Result<ViewBoxHeuristic> {
    value.parse::<ViewBoxHeuristic>().map_err(|e| anyhow!(e))
}

/// Load options from `config` (if any) and apply command-line overrides.
pub fn resolve_pipeline_options(
    config: Option<&str>,
    overrides: &PipelineOverrides,
) -> Result<PipelineOptions> {
    let mut options = match config {
        Some(path) => load_config(Path::new(path))?.pipeline,
        None => PipelineOptions::default(),
    };
    overrides.apply(&mut options)?;
    Ok(options)
}
