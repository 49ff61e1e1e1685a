use std::time::Instant;

use anyhow::{Context, Result};
use clap::ValueEnum;
use ms_core::{
    CHANNELS_PER_PIXEL, Channel, ChannelBuffer, FixedChannelBuffer, MipLayout, RawChannelBuffer,
    total_channels,
};
use ms_mip::MipChain;
use serde::Serialize;
use tracing::debug;

/// Where the packed chain lives during one trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Boxed array with a compile-time length
    Array,
    /// Growable `Vec`
    Vector,
    /// Manual allocation through the global allocator
    Raw,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Array, Strategy::Vector, Strategy::Raw];

    pub fn label(self) -> &'static str {
        match self {
            Strategy::Array => "fixed array",
            Strategy::Vector => "vector",
            Strategy::Raw => "raw allocation",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Array => "array",
            Strategy::Vector => "vector",
            Strategy::Raw => "raw",
        }
    }
}

/// Base widths the fixed-array strategy is compiled for.
pub const FIXED_ARRAY_WIDTHS: [usize; 13] =
    [1, 2, 4, 8, 16, 32, 64, 128, 256, 512, 1024, 2048, 4096];

#[derive(Debug, Clone, PartialEq)]
pub struct TrialOutcome {
    /// Allocation plus initialization.
    pub init_ms: f64,
    pub mips_ms: f64,
    pub top_pixel: [Channel; CHANNELS_PER_PIXEL],
    /// Per-level channel copies, only when requested.
    pub levels: Option<Vec<Vec<Channel>>>,
}

/// Runs one allocate, init, generate, release cycle.
///
/// Returns `Ok(None)` when the fixed-array strategy has no instantiation
/// for the layout's base width.
pub fn run_trial(
    strategy: Strategy,
    layout: &MipLayout,
    keep_levels: bool,
) -> Result<Option<TrialOutcome>> {
    match strategy {
        Strategy::Array => fixed_trial(layout, keep_levels),
        Strategy::Vector => timed_trial(
            layout,
            keep_levels,
            || Ok(vec![0.0 as Channel; layout.total_channels()]),
        )
        .map(Some),
        Strategy::Raw => {
            timed_trial(layout, keep_levels, || RawChannelBuffer::for_layout(layout)).map(Some)
        }
    }
}

macro_rules! fixed_trial_arms {
    ($layout:expr, $keep:expr, $($w:literal),+ $(,)?) => {
        match $layout.base_width() {
            $(
                $w => timed_trial($layout, $keep, || {
                    FixedChannelBuffer::<{ total_channels($w) }>::for_layout($layout)
                })
                .map(Some),
            )+
            _ => Ok(None),
        }
    };
}

fn fixed_trial(layout: &MipLayout, keep_levels: bool) -> Result<Option<TrialOutcome>> {
    fixed_trial_arms!(
        layout,
        keep_levels,
        1,
        2,
        4,
        8,
        16,
        32,
        64,
        128,
        256,
        512,
        1024,
        2048,
        4096,
    )
}

fn timed_trial<B, F>(layout: &MipLayout, keep_levels: bool, alloc: F) -> Result<TrialOutcome>
where
    B: ChannelBuffer,
    F: FnOnce() -> Result<B, ms_core::Error>,
{
    let t0 = Instant::now();
    let buf = alloc().context("allocating channel buffer")?;
    let mut chain = MipChain::new(*layout, buf).context("sizing mip chain")?;
    chain.init().context("initializing base level")?;
    let init_ms = elapsed_ms(t0);

    let t1 = Instant::now();
    chain.generate().context("generating mip chain")?;
    let mips_ms = elapsed_ms(t1);

    let top_pixel = chain.top_pixel();
    let levels = keep_levels.then(|| {
        (0..layout.level_count())
            .filter_map(|level| chain.level_channels(level))
            .collect()
    });
    debug!(init_ms, mips_ms, "trial finished");

    Ok(TrialOutcome {
        init_ms,
        mips_ms,
        top_pixel,
        levels,
    })
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1e3
}

#[cfg(test)]
mod tests {
    use ms_core::{MipLayout, total_channels};

    use crate::trial::{FIXED_ARRAY_WIDTHS, Strategy, run_trial};

    #[test]
    fn every_strategy_agrees_on_small_chain() {
        let layout = MipLayout::new(8).expect("valid layout");
        for strategy in Strategy::ALL {
            let outcome = run_trial(strategy, &layout, false)
                .expect("trial runs")
                .expect("width 8 is supported");
            assert_eq!(outcome.top_pixel, [3.5, 3.5, 0.0, 255.0], "{strategy:?}");
            assert!(outcome.init_ms >= 0.0);
            assert!(outcome.mips_ms >= 0.0);
            assert!(outcome.levels.is_none());
        }
    }

    #[test]
    fn fixed_array_skips_uncompiled_widths() {
        let layout = MipLayout::new(6).expect("valid layout");
        assert!(run_trial(Strategy::Array, &layout, false)
            .expect("trial runs")
            .is_none());
        assert!(run_trial(Strategy::Vector, &layout, false)
            .expect("trial runs")
            .is_some());
    }

    #[test]
    fn fixed_array_covers_listed_widths() {
        for &w in FIXED_ARRAY_WIDTHS.iter().filter(|&&w| w <= 256) {
            let layout = MipLayout::new(w).expect("valid layout");
            let outcome = run_trial(Strategy::Array, &layout, false).expect("trial runs");
            assert!(outcome.is_some(), "width {w}");
        }
    }

    #[test]
    fn kept_levels_cover_the_chain() {
        let layout = MipLayout::new(4).expect("valid layout");
        let outcome = run_trial(Strategy::Raw, &layout, true)
            .expect("trial runs")
            .expect("raw always runs");

        let levels = outcome.levels.expect("levels requested");
        let lens: Vec<usize> = levels.iter().map(Vec::len).collect();
        assert_eq!(lens, vec![64, 16, 4]);
        assert_eq!(lens.iter().sum::<usize>(), total_channels(4));
        assert_eq!(levels[2], vec![1.5, 1.5, 0.0, 255.0]);
    }
}
