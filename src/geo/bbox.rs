use crate::{GeoError, GeoResult};
use std::fmt;

/// Axis-aligned geographic bounding box in lon/lat degrees
///
/// The box is stored as (west, south, east, north). Construction fails
/// unless `west < east` and `south < north` and all bounds are finite,
/// so any `BoundingBox` in circulation satisfies the invariant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    west: f64,
    south: f64,
    east: f64,
    north: f64,
}

impl BoundingBox {
    /// Creates a bounding box from its four ordered bounds
    ///
    /// # Arguments
    ///
    /// * `west` - Western bound (minimum longitude)
    /// * `south` - Southern bound (minimum latitude)
    /// * `east` - Eastern bound (maximum longitude)
    /// * `north` - Northern bound (maximum latitude)
    ///
    /// # Returns
    ///
    /// * `Ok(BoundingBox)` - The bounds are finite and correctly ordered
    /// * `Err(GeoError)` - A bound is non-finite or the ordering is violated
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> GeoResult<Self> {
        for (name, value) in [
            ("west", west),
            ("south", south),
            ("east", east),
            ("north", north),
        ] {
            if !value.is_finite() {
                return Err(GeoError::InvalidBbox(format!(
                    "{} bound must be finite, got {}",
                    name, value
                )));
            }
        }

        if west >= east {
            return Err(GeoError::InvalidBbox(format!(
                "west ({}) must be less than east ({})",
                west, east
            )));
        }

        if south >= north {
            return Err(GeoError::InvalidBbox(format!(
                "south ({}) must be less than north ({})",
                south, north
            )));
        }

        Ok(Self {
            west,
            south,
            east,
            north,
        })
    }

    /// Creates a bounding box from a `[west, south, east, north]` array
    pub fn from_array(bounds: [f64; 4]) -> GeoResult<Self> {
        Self::new(bounds[0], bounds[1], bounds[2], bounds[3])
    }

    /// Returns the bounds as a `[west, south, east, north]` array
    pub fn to_array(&self) -> [f64; 4] {
        [self.west, self.south, self.east, self.north]
    }

    /// Western bound (minimum longitude)
    pub fn west(&self) -> f64 {
        self.west
    }

    /// Southern bound (minimum latitude)
    pub fn south(&self) -> f64 {
        self.south
    }

    /// Eastern bound (maximum longitude)
    pub fn east(&self) -> f64 {
        self.east
    }

    /// Northern bound (maximum latitude)
    pub fn north(&self) -> f64 {
        self.north
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.west, self.south, self.east, self.north
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_bbox() {
        let bbox = BoundingBox::new(13.0, 52.0, 14.0, 53.0).unwrap();
        assert_eq!(bbox.west(), 13.0);
        assert_eq!(bbox.south(), 52.0);
        assert_eq!(bbox.east(), 14.0);
        assert_eq!(bbox.north(), 53.0);
    }

    #[test]
    fn test_west_east_ordering() {
        assert!(BoundingBox::new(14.0, 52.0, 13.0, 53.0).is_err());
        assert!(BoundingBox::new(13.0, 52.0, 13.0, 53.0).is_err());
    }

    #[test]
    fn test_south_north_ordering() {
        assert!(BoundingBox::new(13.0, 53.0, 14.0, 52.0).is_err());
        assert!(BoundingBox::new(13.0, 53.0, 14.0, 53.0).is_err());
    }

    #[test]
    fn test_non_finite_bounds() {
        assert!(BoundingBox::new(f64::NAN, 52.0, 14.0, 53.0).is_err());
        assert!(BoundingBox::new(13.0, 52.0, f64::INFINITY, 53.0).is_err());
    }

    #[test]
    fn test_array_round_trip() {
        let bbox = BoundingBox::from_array([9.5, 53.3, 10.3, 53.8]).unwrap();
        assert_eq!(bbox.to_array(), [9.5, 53.3, 10.3, 53.8]);
    }
}
