use super::params::TorusParams;

/// sin/cos of the two rotation angles, computed once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    pub sin_a: f64,
    pub cos_a: f64,
    pub sin_b: f64,
    pub cos_b: f64,
}

impl Rotation {
    pub fn new(angle_a: f64, angle_b: f64) -> Self {
        let (sin_a, cos_a) = angle_a.sin_cos();
        let (sin_b, cos_b) = angle_b.sin_cos();
        Self {
            sin_a,
            cos_a,
            sin_b,
            cos_b,
        }
    }
}

/// One torus surface point after rotation and projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Projected column before flooring.
    pub screen_x: f64,
    /// Projected row before flooring.
    pub screen_y: f64,
    /// `1 / distance`; larger is nearer.
    pub inv_depth: f64,
    /// Cosine between the surface normal and the light, in `[-sqrt 2, sqrt 2]`
    /// (the light vector is not unit length).
    pub luminance: f64,
    pub x: i64,
    pub y: i64,
    /// Unclamped shade index.
    pub shade: i64,
}

impl Sample {
    /// Linear cell index, or `None` when the sample falls outside the canvas.
    pub fn cell_index(&self, width: usize, height: usize) -> Option<usize> {
        if self.x < 0 || self.y < 0 {
            return None;
        }
        let (x, y) = (self.x as usize, self.y as usize);
        if x >= width || y >= height {
            return None;
        }
        Some(x + width * y)
    }
}

/// Clamps a shade index into the palette.
///
/// Luminance never exceeds `sqrt 2`, and `floor(8 * sqrt 2) = 11` is the last
/// index of the 12-entry ramp, so only the lower bound ever bites with the
/// default constants.
pub fn palette_index(shade: i64, palette_len: usize) -> usize {
    let max = palette_len.saturating_sub(1) as i64;
    shade.clamp(0, max) as usize
}

/// Rotates the point at `(theta, phi)` and projects it onto the canvas.
///
/// `theta` walks around the tube cross-section, `phi` sweeps that circle
/// around the torus axis.
pub fn project_sample(params: &TorusParams, rotation: &Rotation, theta: f64, phi: f64) -> Sample {
    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();
    let Rotation {
        sin_a,
        cos_a,
        sin_b,
        cos_b,
    } = *rotation;

    let circle_x = cos_theta + params.tube_offset;
    let inv_depth =
        1.0 / (sin_phi * circle_x * sin_a + sin_theta * cos_a + params.viewer_distance);
    let t = sin_phi * circle_x * cos_a - sin_theta * sin_a;

    let rotated_x = cos_phi * circle_x * cos_b - t * sin_b;
    let rotated_y = cos_phi * circle_x * sin_b + t * cos_b;

    let screen_x = params.width as f64 / 2.0 + params.projection_scale * inv_depth * rotated_x;
    let screen_y =
        params.height as f64 / 2.0 + (params.projection_scale / 2.0) * inv_depth * rotated_y;

    let luminance = (sin_theta * sin_a - sin_phi * cos_theta * cos_a) * cos_b
        - sin_phi * cos_theta * sin_a
        - sin_theta * cos_a
        - cos_phi * cos_theta * sin_b;

    Sample {
        screen_x,
        screen_y,
        inv_depth,
        luminance,
        x: screen_x.floor() as i64,
        y: screen_y.floor() as i64,
        shade: (params.shade_scale() * luminance).floor() as i64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI, SQRT_2};

    const EPS: f64 = 1e-9;

    fn project(theta: f64, phi: f64, a: f64, b: f64) -> Sample {
        project_sample(&TorusParams::default(), &Rotation::new(a, b), theta, phi)
    }

    #[test]
    fn origin_sample_lands_right_of_center() {
        let s = project(0.0, 0.0, 0.0, 0.0);
        assert!((s.inv_depth - 0.2).abs() < EPS);
        assert!((s.screen_x - 58.0).abs() < EPS);
        assert!((s.screen_y - 12.0).abs() < EPS);
        assert!(s.luminance.abs() < EPS);
        assert_eq!((s.x, s.y, s.shade), (58, 12, 0));
    }

    #[test]
    fn top_of_tube_is_farther_and_dark() {
        let s = project(FRAC_PI_2, 0.0, 0.0, 0.0);
        assert!((s.inv_depth - 1.0 / 6.0).abs() < EPS);
        assert!((s.screen_x - 50.0).abs() < EPS);
        assert!((s.screen_y - 12.0).abs() < EPS);
        assert!((s.luminance + 1.0).abs() < EPS);
        assert_eq!(s.shade, -8);
        assert_eq!(palette_index(s.shade, 12), 0);
    }

    #[test]
    fn opposite_side_mirrors_horizontally() {
        let s = project(0.0, PI, 0.0, 0.0);
        assert_eq!(s.x, 22);
        assert!((s.screen_y - 12.0).abs() < EPS);
    }

    #[test]
    fn brightest_point_maps_to_last_palette_entry() {
        let s = project(5.0 * PI / 4.0, 3.0 * PI / 16.0, 0.0, 5.0 * PI / 16.0);
        assert!((s.luminance - SQRT_2).abs() < EPS);
        assert_eq!(s.shade, 11);
        assert_eq!(palette_index(s.shade, 12), 11);
    }

    #[test]
    fn darkest_point_clamps_to_first_palette_entry() {
        let s = project(PI / 4.0, 3.0 * PI / 16.0, 0.0, 5.0 * PI / 16.0);
        assert!((s.luminance + SQRT_2).abs() < EPS);
        assert_eq!(s.shade, -12);
        assert_eq!(palette_index(s.shade, 12), 0);
    }

    #[test]
    fn shade_never_exceeds_palette_over_angle_grid() {
        let params = TorusParams::default();
        let max = params.palette.len() as i64 - 1;
        let steps = 48;
        let angle = |i: usize| std::f64::consts::TAU * i as f64 / steps as f64;
        for ia in 0..steps {
            for ib in 0..steps {
                let rotation = Rotation::new(angle(ia), angle(ib));
                for it in 0..steps {
                    for ip in 0..steps {
                        let s = project_sample(&params, &rotation, angle(it), angle(ip));
                        assert!(s.luminance <= SQRT_2 + EPS);
                        assert!(s.shade <= max, "shade {} at {ia},{ib},{it},{ip}", s.shade);
                    }
                }
            }
        }
    }

    #[test]
    fn palette_index_clamps_both_ends() {
        assert_eq!(palette_index(-3, 12), 0);
        assert_eq!(palette_index(5, 12), 5);
        assert_eq!(palette_index(40, 12), 11);
    }

    #[test]
    fn cell_index_rejects_out_of_range() {
        let mut s = project(0.0, 0.0, 0.0, 0.0);
        assert_eq!(s.cell_index(80, 24), Some(58 + 80 * 12));
        s.x = 80;
        assert_eq!(s.cell_index(80, 24), None);
        s.x = -1;
        assert_eq!(s.cell_index(80, 24), None);
        s.x = 0;
        s.y = 24;
        assert_eq!(s.cell_index(80, 24), None);
        s.y = 0;
        assert_eq!(s.cell_index(80, 24), Some(0));
    }
}
