pub mod params;
pub mod projection;

use rayon::prelude::*;

use crate::error::ConfigError;
use crate::render::CharGrid;
use params::TorusParams;
use projection::{palette_index, project_sample, Rotation, Sample};

// --- Torus rasterizer ---

/// Renders a rotating torus into a character grid, one frame per tick.
///
/// The two rotation angles are the only state carried between frames.
#[derive(Debug, Clone)]
pub struct Rasterizer {
    params: TorusParams,
    angle_a: f64,
    angle_b: f64,
    screen: CharGrid,
    depth: Vec<f64>,
}

impl Rasterizer {
    pub fn new(params: TorusParams) -> Result<Self, ConfigError> {
        Self::with_angles(params, 0.0, 0.0)
    }

    pub fn with_angles(params: TorusParams, angle_a: f64, angle_b: f64) -> Result<Self, ConfigError> {
        params.validate()?;
        let screen = CharGrid::new(params.width, params.height);
        let depth = vec![0.0; params.area()];
        Ok(Self {
            params,
            angle_a,
            angle_b,
            screen,
            depth,
        })
    }

    pub fn params(&self) -> &TorusParams {
        &self.params
    }

    pub fn angles(&self) -> (f64, f64) {
        (self.angle_a, self.angle_b)
    }

    pub fn screen(&self) -> &CharGrid {
        &self.screen
    }

    pub fn depth_buffer(&self) -> &[f64] {
        &self.depth
    }

    /// Every sample of the double sweep at the current angles, in sweep order.
    ///
    /// Rows of the outer sweep are projected in parallel; `collect` keeps
    /// them in order so the depth test sees the same sequence as a serial
    /// loop would.
    pub fn sweep_samples(&self) -> Vec<Sample> {
        let params = &self.params;
        let rotation = Rotation::new(self.angle_a, self.angle_b);
        let outer_step = params.outer_step();
        let inner_step = params.inner_step();

        let rows: Vec<Vec<Sample>> = (0..params.outer_samples)
            .into_par_iter()
            .map(|k| {
                let theta = k as f64 * outer_step;
                (0..params.inner_samples)
                    .map(|j| project_sample(params, &rotation, theta, j as f64 * inner_step))
                    .collect()
            })
            .collect();
        rows.into_iter().flatten().collect()
    }

    /// Depth-tests one sample and writes it if it is the nearest so far.
    /// Returns whether the cell was written.
    pub fn plot(&mut self, sample: &Sample) -> bool {
        let Some(idx) = sample.cell_index(self.params.width, self.params.height) else {
            return false;
        };
        if sample.inv_depth <= self.depth[idx] {
            return false;
        }
        self.depth[idx] = sample.inv_depth;
        let shade = palette_index(sample.shade, self.params.palette.len());
        self.screen.set_index(idx, self.params.palette[shade]);
        true
    }

    pub fn clear(&mut self) {
        self.screen.clear();
        self.depth.fill(0.0);
    }

    /// Clears both buffers and draws the torus at the current angles.
    /// Returns how many cells were written, overwrites included.
    pub fn rasterize(&mut self) -> usize {
        self.clear();
        let samples = self.sweep_samples();
        let mut writes = 0;
        for sample in &samples {
            if self.plot(sample) {
                writes += 1;
            }
        }
        writes
    }

    /// Serializes the screen into rows, advancing the angles once per cell.
    pub fn serialize_and_advance(&mut self) -> Vec<String> {
        let lines = self.screen.to_lines();
        for _ in 0..self.params.area() {
            self.angle_a += self.params.delta_a;
            self.angle_b += self.params.delta_b;
        }
        lines
    }

    /// One full tick: rasterize, serialize, advance.
    pub fn tick(&mut self) -> Vec<String> {
        let writes = self.rasterize();
        log::trace!(
            "torus frame at A={:.5} B={:.5}: {writes} cell writes",
            self.angle_a,
            self.angle_b
        );
        self.serialize_and_advance()
    }
}
