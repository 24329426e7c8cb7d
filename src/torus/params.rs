use std::time::Duration;

use crate::error::ConfigError;

/// Shading ramp, sparsest to densest.
pub const PALETTE: &[char] = &['.', ',', '-', '~', ':', ';', '=', '!', '*', '#', '$', '@'];

pub const TICK_PERIOD: Duration = Duration::from_millis(17);

/// Fixed geometry and animation constants for the torus.
///
/// `Default` carries the canonical values; other values only exist so that
/// startup validation can be exercised.
#[derive(Debug, Clone, PartialEq)]
pub struct TorusParams {
    pub width: usize,
    pub height: usize,
    /// Distance from the torus axis to the tube center (tube radius is 1).
    pub tube_offset: f64,
    pub outer_samples: usize,
    pub inner_samples: usize,
    /// K1: added to the rotated depth before the perspective divide.
    pub viewer_distance: f64,
    /// K2: screen-space scale applied after the divide.
    pub projection_scale: f64,
    /// Per-cell angle increments.
    pub delta_a: f64,
    pub delta_b: f64,
    pub palette: &'static [char],
}

impl Default for TorusParams {
    fn default() -> Self {
        Self {
            width: 80,
            height: 24,
            tube_offset: 2.0,
            outer_samples: 90,
            inner_samples: 314,
            viewer_distance: 5.0,
            projection_scale: 30.0,
            delta_a: 0.000_04,
            delta_b: 0.000_02,
            palette: PALETTE,
        }
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

impl TorusParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroDimension {
                width: self.width,
                height: self.height,
            });
        }
        if self.outer_samples == 0 || self.inner_samples == 0 {
            return Err(ConfigError::ZeroSamples {
                outer: self.outer_samples,
                inner: self.inner_samples,
            });
        }
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        check_positive("tube offset", self.tube_offset)?;
        check_positive("projection scale", self.projection_scale)?;
        check_positive("viewer distance", self.viewer_distance)?;
        for (name, value) in [("angle delta A", self.delta_a), ("angle delta B", self.delta_b)] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name, value });
            }
        }
        // Every rotated point sits within tube_offset + 1 of the origin; the
        // divisor must stay positive for all of them.
        if self.viewer_distance <= self.tube_offset + 1.0 {
            return Err(ConfigError::ViewerInsideTorus {
                viewer_distance: self.viewer_distance,
                extent: self.tube_offset + 1.0,
            });
        }
        Ok(())
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// `floor((len + 1) * 2 / 3)`, the multiplier turning a luminance in
    /// `[-sqrt 2, sqrt 2]` into a palette index.
    pub fn shade_scale(&self) -> f64 {
        (((self.palette.len() + 1) * 2) / 3) as f64
    }

    pub fn outer_step(&self) -> f64 {
        std::f64::consts::TAU / self.outer_samples as f64
    }

    pub fn inner_step(&self) -> f64 {
        std::f64::consts::TAU / self.inner_samples as f64
    }
}
