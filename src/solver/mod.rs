mod boundary;
mod core;
pub mod diagnostics;
mod params;

// Re-export public API
pub use boundary::{set_bnd, FieldType};
pub use params::SolverParams;
pub use self::core::{advect, diffuse, lin_solve, project};

use crate::state::{FieldSet, FrameSnapshot, GridLayout};
use params::warn_if_non_physical;

/// Divergence measured around the final projection of the latest `step()`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepStats {
    pub divergence_before_projection: f64,
    pub divergence_after_projection: f64,
}

/// 2-D stable-fluids solver on a padded square grid.
///
/// Sources are accumulated with [`add_density`](Self::add_density) /
/// [`add_velocity`](Self::add_velocity) and consumed by the next
/// [`step`](Self::step); the visible fields are read back with the
/// `dump_*` accessors, indexed through [`ix`](Self::ix).
pub struct FluidGrid {
    layout: GridLayout,
    fields: FieldSet,
    params: SolverParams,
    last_stats: StepStats,
}

impl FluidGrid {
    pub fn new(size: usize, init_diffusion: f64, init_viscosity: f64, time_rate: f64) -> Self {
        Self::with_params(size, SolverParams::new(init_diffusion, init_viscosity, time_rate))
    }

    pub fn with_params(size: usize, params: SolverParams) -> Self {
        let size = if size == 0 {
            log::warn!("grid size 0 requested; using 1");
            1
        } else {
            size
        };
        for name in params.non_physical() {
            log::warn!("initial {} is non-physical; expect unstable output", name);
        }
        log::debug!(
            "fluid grid N={} visc={} diff={} dt={} iters={}/{}",
            size,
            params.viscosity,
            params.diffusion,
            params.time_rate,
            params.diffuse_iter,
            params.project_iter
        );
        let layout = GridLayout::new(size);
        Self {
            layout,
            fields: FieldSet::new(layout),
            params,
            last_stats: StepStats::default(),
        }
    }

    /// Logical side length `N`.
    pub fn size(&self) -> usize {
        self.layout.n()
    }

    pub fn layout(&self) -> GridLayout {
        self.layout
    }

    /// Flat offset of `(x, y)` in the padded buffers returned by `dump_*`.
    pub fn ix(&self, x: usize, y: usize) -> usize {
        self.layout.ix(x, y)
    }

    /// Accumulate a density source at the nearest interior cell.
    pub fn add_density(&mut self, pos: (i32, i32), amount: f64) {
        let (x, y) = self.layout.clamp_interior(pos);
        let ii = self.layout.ix(x, y);
        self.fields.density_prev[ii] += amount;
    }

    /// Accumulate a velocity source at the nearest interior cell.
    pub fn add_velocity(&mut self, pos: (i32, i32), (dx, dy): (f64, f64)) {
        let (x, y) = self.layout.clamp_interior(pos);
        let ii = self.layout.ix(x, y);
        self.fields.vx_prev[ii] += dx;
        self.fields.vy_prev[ii] += dy;
    }

    /// Advance one frame: velocity step, density step, then drop this frame's sources.
    pub fn step(&mut self) {
        let dt = self.params.time_rate;
        let before = vel_step(&mut self.fields, &self.params, dt, self.layout);
        dens_step(&mut self.fields, &self.params, dt, self.layout);
        self.fields.clear_sources();

        let after = diagnostics::divergence_sq(self.layout, &self.fields.vx, &self.fields.vy);
        self.last_stats = StepStats {
            divergence_before_projection: before,
            divergence_after_projection: after,
        };
        log::trace!("step: divergence {:.3e} -> {:.3e}", before, after);
    }

    pub fn last_step_stats(&self) -> StepStats {
        self.last_stats
    }

    pub fn dump_density_array(&self) -> Vec<f64> {
        self.fields.density.clone()
    }

    pub fn dump_vx_array(&self) -> Vec<f64> {
        self.fields.vx.clone()
    }

    pub fn dump_vy_array(&self) -> Vec<f64> {
        self.fields.vy.clone()
    }

    pub fn density(&self) -> &[f64] {
        &self.fields.density
    }

    pub fn velocity_x(&self) -> &[f64] {
        &self.fields.vx
    }

    pub fn velocity_y(&self) -> &[f64] {
        &self.fields.vy
    }

    /// Copy the visible fields into a pre-allocated snapshot, avoiding allocation.
    /// A snapshot sized for a different grid is resized first.
    pub fn snapshot_into(&self, dst: &mut FrameSnapshot) {
        let size = self.layout.len();
        dst.n = self.layout.n();
        dst.density.resize(size, 0.0);
        dst.vx.resize(size, 0.0);
        dst.vy.resize(size, 0.0);
        dst.density.copy_from_slice(&self.fields.density);
        dst.vx.copy_from_slice(&self.fields.vx);
        dst.vy.copy_from_slice(&self.fields.vy);
    }

    /// Zero current fields and pending sources without reallocating.
    pub fn clear_density_and_velocity(&mut self) {
        self.fields.clear();
        self.last_stats = StepStats::default();
    }

    pub fn params(&self) -> &SolverParams {
        &self.params
    }

    pub fn viscosity(&self) -> f64 {
        self.params.viscosity
    }

    pub fn set_viscosity(&mut self, viscosity: f64) {
        warn_if_non_physical("viscosity", viscosity);
        self.params.viscosity = viscosity;
    }

    pub fn diffusion(&self) -> f64 {
        self.params.diffusion
    }

    pub fn set_diffusion(&mut self, diffusion: f64) {
        warn_if_non_physical("diffusion", diffusion);
        self.params.diffusion = diffusion;
    }

    pub fn time_rate(&self) -> f64 {
        self.params.time_rate
    }

    pub fn set_time_rate(&mut self, time_rate: f64) {
        warn_if_non_physical("time_rate", time_rate);
        self.params.time_rate = time_rate;
    }
}

fn add_source(x: &mut [f64], s: &[f64]) {
    for (xi, si) in x.iter_mut().zip(s) {
        *xi += si;
    }
}

/// Velocity half of the step: sources, diffuse, project, self-advect, project.
/// Returns the divergence the final projection started from.
fn vel_step(f: &mut FieldSet, params: &SolverParams, dt: f64, layout: GridLayout) -> f64 {
    add_source(&mut f.vx, &f.vx_prev);
    add_source(&mut f.vy, &f.vy_prev);

    // Diffuse velocity
    std::mem::swap(&mut f.vx, &mut f.vx_prev);
    std::mem::swap(&mut f.vy, &mut f.vy_prev);
    diffuse(FieldType::Vx, &mut f.vx, &f.vx_prev, params.viscosity, dt, params.diffuse_iter, layout);
    diffuse(FieldType::Vy, &mut f.vy, &f.vy_prev, params.viscosity, dt, params.diffuse_iter, layout);

    // Project to make diffused velocity divergence-free
    project(&mut f.vx, &mut f.vy, &mut f.pressure, &mut f.divergence, params.project_iter, layout);

    // Advect velocity through itself
    std::mem::swap(&mut f.vx, &mut f.vx_prev);
    std::mem::swap(&mut f.vy, &mut f.vy_prev);
    advect(FieldType::Vx, &mut f.vx, &f.vx_prev, &f.vx_prev, &f.vy_prev, dt, layout);
    advect(FieldType::Vy, &mut f.vy, &f.vy_prev, &f.vx_prev, &f.vy_prev, dt, layout);

    project(&mut f.vx, &mut f.vy, &mut f.pressure, &mut f.divergence, params.project_iter, layout)
}

/// Density half of the step: sources, diffuse, advect through the final velocity.
fn dens_step(f: &mut FieldSet, params: &SolverParams, dt: f64, layout: GridLayout) {
    add_source(&mut f.density, &f.density_prev);

    std::mem::swap(&mut f.density, &mut f.density_prev);
    diffuse(FieldType::Scalar, &mut f.density, &f.density_prev, params.diffusion, dt, params.diffuse_iter, layout);

    std::mem::swap(&mut f.density, &mut f.density_prev);
    advect(FieldType::Scalar, &mut f.density, &f.density_prev, &f.vx, &f.vy, dt, layout);
}
