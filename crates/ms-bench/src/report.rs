use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use ms_core::{CHANNELS_PER_PIXEL, Channel, MipLayout};
use serde::Serialize;

use crate::trial::{Strategy, TrialOutcome};

#[derive(Debug, Clone, Serialize)]
pub struct TrialRecord {
    pub strategy: Strategy,
    pub iteration: usize,
    pub init_ms: f64,
    pub mips_ms: f64,
    pub top_pixel: [Channel; CHANNELS_PER_PIXEL],
}

#[derive(Debug, Clone, Serialize)]
pub struct BenchReport {
    pub base_width: usize,
    pub level_count: usize,
    pub total_channels: usize,
    pub trials: Vec<TrialRecord>,
}

/// Min and mean of one phase over all iterations of a strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseSummary {
    pub init_min_ms: f64,
    pub init_mean_ms: f64,
    pub mips_min_ms: f64,
    pub mips_mean_ms: f64,
}

impl BenchReport {
    pub fn new(layout: &MipLayout) -> Self {
        Self {
            base_width: layout.base_width(),
            level_count: layout.level_count(),
            total_channels: layout.total_channels(),
            trials: Vec::new(),
        }
    }

    pub fn record(&mut self, strategy: Strategy, iteration: usize, outcome: &TrialOutcome) {
        self.trials.push(TrialRecord {
            strategy,
            iteration,
            init_ms: outcome.init_ms,
            mips_ms: outcome.mips_ms,
            top_pixel: outcome.top_pixel,
        });
    }

    pub fn summary(&self, strategy: Strategy) -> Option<PhaseSummary> {
        let trials: Vec<&TrialRecord> = self
            .trials
            .iter()
            .filter(|t| t.strategy == strategy)
            .collect();
        if trials.is_empty() {
            return None;
        }

        let n = trials.len() as f64;
        let min = |f: fn(&TrialRecord) -> f64| {
            trials.iter().map(|t| f(t)).fold(f64::INFINITY, f64::min)
        };
        let mean = |f: fn(&TrialRecord) -> f64| trials.iter().map(|t| f(t)).sum::<f64>() / n;

        Some(PhaseSummary {
            init_min_ms: min(|t| t.init_ms),
            init_mean_ms: mean(|t| t.init_ms),
            mips_min_ms: min(|t| t.mips_ms),
            mips_mean_ms: mean(|t| t.mips_ms),
        })
    }

    /// Strategies whose final 1x1 level differs from the first recorded trial.
    pub fn disagreeing_strategies(&self) -> Vec<Strategy> {
        let Some(reference) = self.trials.first() else {
            return Vec::new();
        };

        let mut out = Vec::new();
        for t in &self.trials {
            if t.top_pixel != reference.top_pixel && !out.contains(&t.strategy) {
                out.push(t.strategy);
            }
        }
        out
    }
}

pub fn write_json(path: &Path, value: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(path, bytes).with_context(|| format!("writing json {}", path.display()))
}
