//! Temporal and spatial summary statistics

use crate::analysis::{AnalysisError, AnalysisResult};
use crate::loader::SceneStack;

/// Per-pixel statistics across the time dimension of a stack
#[derive(Debug, Clone, PartialEq)]
pub struct TemporalStats {
    /// Raster width in samples
    pub width: usize,

    /// Raster height in samples
    pub height: usize,

    /// Per-pixel mean across time, row-major
    pub mean: Vec<f32>,

    /// Per-pixel population standard deviation across time, row-major
    pub std: Vec<f32>,
}

/// Scalar summary of a single raster
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialStats {
    pub min: f32,
    pub max: f32,
    pub mean: f32,
    pub std: f32,
}

/// One percentile of a sample distribution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Percentile {
    pub percentile: f64,
    pub value: f32,
}

/// Computes per-pixel mean and standard deviation across time
///
/// Non-finite samples are skipped per pixel; a pixel with no finite sample
/// in any scene becomes NaN in both outputs.
///
/// # Arguments
///
/// * `stack` - Scene stack with at least one scene
///
/// # Returns
///
/// * `Ok(TemporalStats)` - Per-pixel mean and standard deviation
/// * `Err(AnalysisError)` - The stack holds no scenes
pub fn temporal_stats(stack: &SceneStack) -> AnalysisResult<TemporalStats> {
    if stack.is_empty() {
        return Err(AnalysisError::EmptyStack);
    }

    let pixels = stack.width() * stack.height();
    let mut sums = vec![0.0f64; pixels];
    let mut counts = vec![0u32; pixels];

    for scene in stack.scenes() {
        for (i, &sample) in scene.samples().iter().enumerate() {
            if sample.is_finite() {
                sums[i] += f64::from(sample);
                counts[i] += 1;
            }
        }
    }

    let mean: Vec<f32> = sums
        .iter()
        .zip(&counts)
        .map(|(&sum, &count)| {
            if count > 0 {
                (sum / f64::from(count)) as f32
            } else {
                f32::NAN
            }
        })
        .collect();

    let mut sq_devs = vec![0.0f64; pixels];
    for scene in stack.scenes() {
        for (i, &sample) in scene.samples().iter().enumerate() {
            if sample.is_finite() {
                let dev = f64::from(sample) - f64::from(mean[i]);
                sq_devs[i] += dev * dev;
            }
        }
    }

    let std: Vec<f32> = sq_devs
        .iter()
        .zip(&counts)
        .map(|(&sq, &count)| {
            if count > 0 {
                (sq / f64::from(count)).sqrt() as f32
            } else {
                f32::NAN
            }
        })
        .collect();

    Ok(TemporalStats {
        width: stack.width(),
        height: stack.height(),
        mean,
        std,
    })
}

/// Computes min/max/mean/std of one raster, skipping non-finite samples
///
/// # Returns
///
/// * `Ok(SpatialStats)` - At least one finite sample was present
/// * `Err(AnalysisError)` - The input is empty or entirely non-finite
pub fn spatial_stats(values: &[f32]) -> AnalysisResult<SpatialStats> {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    let mut sum = 0.0f64;
    let mut count = 0u32;

    for &value in values {
        if !value.is_finite() {
            continue;
        }
        min = min.min(value);
        max = max.max(value);
        sum += f64::from(value);
        count += 1;
    }

    if count == 0 {
        return Err(AnalysisError::NoSamples);
    }

    let mean = sum / f64::from(count);
    let sq_dev: f64 = values
        .iter()
        .filter(|v| v.is_finite())
        .map(|&v| {
            let dev = f64::from(v) - mean;
            dev * dev
        })
        .sum();

    Ok(SpatialStats {
        min,
        max,
        mean: mean as f32,
        std: (sq_dev / f64::from(count)).sqrt() as f32,
    })
}

/// Computes percentiles with linear interpolation between ranks
///
/// # Arguments
///
/// * `values` - Sample distribution; non-finite samples are skipped
/// * `requested` - Percentiles within `0..=100`
///
/// # Returns
///
/// * `Ok(Vec<Percentile>)` - One entry per requested percentile, in order
/// * `Err(AnalysisError)` - A percentile is out of range, or no finite
///   samples exist
pub fn percentiles(values: &[f32], requested: &[f64]) -> AnalysisResult<Vec<Percentile>> {
    for &p in requested {
        if !(0.0..=100.0).contains(&p) {
            return Err(AnalysisError::InvalidPercentile(p));
        }
    }

    let mut finite: Vec<f32> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return Err(AnalysisError::NoSamples);
    }
    finite.sort_by(|a, b| a.total_cmp(b));

    let result = requested
        .iter()
        .map(|&p| {
            let rank = p / 100.0 * (finite.len() - 1) as f64;
            let lower = rank.floor() as usize;
            let upper = rank.ceil() as usize;
            let weight = (rank - lower as f64) as f32;
            let value = finite[lower] + (finite[upper] - finite[lower]) * weight;
            Percentile {
                percentile: p,
                value,
            }
        })
        .collect();

    Ok(result)
}
