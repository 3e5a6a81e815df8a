//! Scene loading seam between catalog items and analysis
//!
//! This module defines the data model the analysis code operates on (a
//! time-ordered stack of equally-sized rasters) and the trait a loader
//! implements to turn signed catalog items into such a stack. The crate
//! ships no raster I/O itself; the runner treats the loader as an optional
//! collaborator.

use crate::catalog::StacItem;
use crate::geo::BoundingBox;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur while assembling a scene stack
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Scene sample count {samples} does not match {width}x{height}")]
    SampleCount {
        samples: usize,
        width: usize,
        height: usize,
    },

    #[error("Scene stack dimensions must be non-zero, got {width}x{height}")]
    ZeroDimension { width: usize, height: usize },

    #[error("Failed to load scene '{id}': {message}")]
    Scene { id: String, message: String },
}

/// Result type for scene loading operations
pub type LoadResult<T> = std::result::Result<T, LoadError>;

/// One single-band raster acquired at a point in time
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    datetime: DateTime<Utc>,
    samples: Vec<f32>,
}

impl Scene {
    /// Creates a scene from its acquisition time and row-major samples
    pub fn new(datetime: DateTime<Utc>, samples: Vec<f32>) -> Self {
        Self { datetime, samples }
    }

    /// Acquisition timestamp
    pub fn datetime(&self) -> DateTime<Utc> {
        self.datetime
    }

    /// Row-major backscatter samples
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }
}

/// A time-ordered stack of equally-sized scenes
///
/// Construction validates that every scene carries exactly `width * height`
/// samples and sorts the scenes by acquisition time, so the first scene is
/// always the earliest.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneStack {
    width: usize,
    height: usize,
    scenes: Vec<Scene>,
}

impl SceneStack {
    /// Creates a stack from uniform scenes
    ///
    /// # Arguments
    ///
    /// * `width` - Raster width in samples
    /// * `height` - Raster height in samples
    /// * `scenes` - Scenes in any order; sorted by time on construction
    ///
    /// # Returns
    ///
    /// * `Ok(SceneStack)` - All scenes match the stack dimensions
    /// * `Err(LoadError)` - Zero dimensions or a sample count mismatch
    pub fn new(width: usize, height: usize, mut scenes: Vec<Scene>) -> LoadResult<Self> {
        if width == 0 || height == 0 {
            return Err(LoadError::ZeroDimension { width, height });
        }

        let expected = width * height;
        for scene in &scenes {
            if scene.samples.len() != expected {
                return Err(LoadError::SampleCount {
                    samples: scene.samples.len(),
                    width,
                    height,
                });
            }
        }

        scenes.sort_by_key(|scene| scene.datetime);

        Ok(Self {
            width,
            height,
            scenes,
        })
    }

    /// Raster width in samples
    pub fn width(&self) -> usize {
        self.width
    }

    /// Raster height in samples
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of scenes (time steps)
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// True when the stack holds no scenes
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Scenes in ascending time order
    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    /// Stack shape as (time, height, width)
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.scenes.len(), self.height, self.width)
    }
}

/// Turns signed catalog items into an analysis-ready scene stack
///
/// Implementations own asset access entirely; the runner only hands them
/// the items the search produced and the task's bounding box.
pub trait SceneLoader: Send + Sync {
    /// Loads the scenes referenced by `items`, clipped to `bbox`
    fn load(&self, items: &[StacItem], bbox: &BoundingBox) -> LoadResult<SceneStack>;
}
