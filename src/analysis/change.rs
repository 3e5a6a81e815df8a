//! Log-ratio change detection

use crate::analysis::{AnalysisError, AnalysisResult};
use crate::loader::SceneStack;
use chrono::{DateTime, Utc};

/// Small value added before taking logarithms to avoid log(0)
pub const DEFAULT_EPSILON: f32 = 1e-10;

/// A change map between two acquisitions
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeMap {
    /// Raster width in samples
    pub width: usize,

    /// Raster height in samples
    pub height: usize,

    /// Per-pixel change in dB, row-major
    pub values: Vec<f32>,

    /// Acquisition time of the reference scene
    pub before: DateTime<Utc>,

    /// Acquisition time of the target scene
    pub after: DateTime<Utc>,
}

/// Computes a log-ratio change map between two rasters
///
/// For linear backscatter the result is `10 * log10((after + eps) / (before
/// + eps))`; when the input is already in dB the ratio reduces to a plain
/// subtraction.
///
/// # Arguments
///
/// * `before` - Reference raster (earlier time)
/// * `after` - Target raster (later time)
/// * `epsilon` - Guard value added to both operands before the ratio
/// * `input_is_db` - True when both rasters are already dB-scaled
///
/// # Returns
///
/// * `Ok(Vec<f32>)` - Change map in dB
/// * `Err(AnalysisError)` - The rasters differ in length
pub fn log_ratio(
    before: &[f32],
    after: &[f32],
    epsilon: f32,
    input_is_db: bool,
) -> AnalysisResult<Vec<f32>> {
    if before.len() != after.len() {
        return Err(AnalysisError::LengthMismatch {
            before: before.len(),
            after: after.len(),
        });
    }

    let values = if input_is_db {
        after.iter().zip(before).map(|(&a, &b)| a - b).collect()
    } else {
        after
            .iter()
            .zip(before)
            .map(|(&a, &b)| 10.0 * ((a + epsilon) / (b + epsilon)).log10())
            .collect()
    };

    Ok(values)
}

/// Computes change between the earliest and latest scene of a stack
///
/// # Returns
///
/// * `Some(ChangeMap)` - The stack holds at least two scenes
/// * `None` - Fewer than two scenes, so no change can be derived
pub fn temporal_change(stack: &SceneStack) -> Option<ChangeMap> {
    if stack.len() < 2 {
        return None;
    }

    let before = stack.scenes().first()?;
    let after = stack.scenes().last()?;

    // Lengths are uniform by stack construction
    let values = log_ratio(before.samples(), after.samples(), DEFAULT_EPSILON, false).ok()?;

    Some(ChangeMap {
        width: stack.width(),
        height: stack.height(),
        values,
        before: before.datetime(),
        after: after.datetime(),
    })
}

/// Converts linear backscatter to dB
pub fn to_db(values: &[f32], epsilon: f32) -> Vec<f32> {
    values
        .iter()
        .map(|&v| 10.0 * (v + epsilon).log10())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::Scene;
    use chrono::TimeZone;

    fn ts(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2022, 1, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_log_ratio_linear_input() {
        let change = log_ratio(&[1.0], &[10.0], 0.0, false).unwrap();
        assert!((change[0] - 10.0).abs() < 1e-5);

        let unchanged = log_ratio(&[4.0], &[4.0], 0.0, false).unwrap();
        assert!(unchanged[0].abs() < 1e-5);
    }

    #[test]
    fn test_log_ratio_db_input_subtracts() {
        let change = log_ratio(&[-12.0, -3.0], &[-10.0, -7.0], DEFAULT_EPSILON, true).unwrap();
        assert_eq!(change, vec![2.0, -4.0]);
    }

    #[test]
    fn test_log_ratio_length_mismatch() {
        assert!(matches!(
            log_ratio(&[1.0, 2.0], &[1.0], DEFAULT_EPSILON, false),
            Err(AnalysisError::LengthMismatch { before: 2, after: 1 })
        ));
    }

    #[test]
    fn test_temporal_change_uses_first_and_last() {
        let stack = SceneStack::new(
            1,
            1,
            vec![
                Scene::new(ts(5), vec![5.0]),
                Scene::new(ts(1), vec![1.0]),
                Scene::new(ts(9), vec![10.0]),
            ],
        )
        .unwrap();

        let change = temporal_change(&stack).unwrap();
        assert_eq!(change.before, ts(1));
        assert_eq!(change.after, ts(9));
        // 10 * log10(10 / 1)
        assert!((change.values[0] - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_temporal_change_requires_two_scenes() {
        let single = SceneStack::new(1, 1, vec![Scene::new(ts(1), vec![1.0])]).unwrap();
        assert!(temporal_change(&single).is_none());

        let empty = SceneStack::new(1, 1, vec![]).unwrap();
        assert!(temporal_change(&empty).is_none());
    }

    #[test]
    fn test_to_db() {
        let db = to_db(&[1.0, 100.0], 0.0);
        assert!((db[0] - 0.0).abs() < 1e-5);
        assert!((db[1] - 20.0).abs() < 1e-5);
    }
}
