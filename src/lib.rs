//! 2-D incompressible fluid solver in the "stable fluids" family.
//!
//! A [`FluidGrid`] owns density and velocity fields on a padded square grid.
//! Each [`FluidGrid::step`] diffuses velocity implicitly, projects it to be
//! divergence-free, self-advects it semi-Lagrangianly, projects again, then
//! diffuses and advects density through the result.
//!
//! ```
//! use fluids::FluidGrid;
//!
//! let mut grid = FluidGrid::new(32, 0.0001, 0.0001, 0.01);
//! grid.add_density((16, 16), 1.0);
//! grid.add_velocity((16, 16), (2.0, 0.0));
//! grid.step();
//!
//! let density = grid.dump_density_array();
//! assert_eq!(density.len(), 34 * 34);
//! assert!(density[grid.ix(16, 16)] > 0.0);
//! ```

pub mod config;
pub mod logging;
pub mod preset;
pub mod solver;
pub mod state;

pub use config::Config;
pub use preset::SquarePreset;
pub use solver::{diagnostics, FieldType, FluidGrid, SolverParams, StepStats};
pub use state::{FrameSnapshot, GridLayout};
