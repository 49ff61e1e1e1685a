use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use image::RgbaImage;
use ms_core::{Channel, MipLayout};

use crate::trial::Strategy;

/// Saves each level as `<strategy>_level_<i>.png` inside `dir`.
pub fn save_levels(
    dir: &Path,
    strategy: Strategy,
    layout: &MipLayout,
    levels: &[Vec<Channel>],
) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    for (i, (info, data)) in layout.levels().zip(levels).enumerate() {
        let width = u32::try_from(info.width).context("level width exceeds u32")?;
        let img = RgbaImage::from_raw(width, width, to_rgba8(data))
            .context("level dimensions and data length must match")?;

        let path = dir.join(format!("{}_level_{i}.png", strategy.name()));
        img.save(&path)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}

fn to_rgba8(data: &[Channel]) -> Vec<u8> {
    data.iter()
        .map(|&v| v.round().clamp(0.0, 255.0) as u8)
        .collect()
}
