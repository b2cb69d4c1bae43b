use serde::Deserialize;

use crate::solver::FluidGrid;

/// Solid square of dye moving right, with the y velocity modulated by
/// `sin(pi * y / size)` across the square.
///
/// Velocity is only injected inside the square itself, not over the whole grid,
/// so the initial disturbance stays local.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SquarePreset {
    pub enabled: bool,
    pub offset: i32,
    pub size: i32,
    pub density: f64,
    pub velocity_x: f64,
    pub velocity_y: f64,
}

impl Default for SquarePreset {
    fn default() -> Self {
        Self {
            enabled: true,
            offset: 2,
            size: 8,
            density: 1.0,
            velocity_x: 10.0,
            velocity_y: 10.0,
        }
    }
}

impl SquarePreset {
    /// Queue the square as sources; it becomes visible after the next `step()`.
    pub fn apply(&self, grid: &mut FluidGrid) {
        if !self.enabled || self.size <= 0 {
            return;
        }
        let end = self.offset.saturating_add(self.size);
        for x in self.offset..end {
            for y in self.offset..end {
                grid.add_density((x, y), self.density);
            }
        }
        for x in self.offset..end {
            for y in self.offset..end {
                let yn = std::f64::consts::PI * (y as f64 / self.size as f64);
                grid.add_velocity((x, y), (self.velocity_x, self.velocity_y * yn.sin()));
            }
        }
        log::debug!(
            "square preset: {}x{} at ({}, {}), density {}",
            self.size,
            self.size,
            self.offset,
            self.offset,
            self.density
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::diagnostics::total_density;

    fn still_grid(n: usize) -> FluidGrid {
        FluidGrid::new(n, 0.0, 0.0, 0.01)
    }

    #[test]
    fn test_density_fills_square_only() {
        let mut grid = still_grid(16);
        let preset = SquarePreset {
            velocity_x: 0.0,
            velocity_y: 0.0,
            ..SquarePreset::default()
        };
        preset.apply(&mut grid);
        grid.step();

        let d = grid.density();
        for y in 1..=16 {
            for x in 1..=16 {
                let inside = (2..10).contains(&x) && (2..10).contains(&y);
                let expected = if inside { 1.0 } else { 0.0 };
                assert_eq!(d[grid.ix(x, y)], expected, "cell ({}, {})", x, y);
            }
        }
        assert!((total_density(grid.layout(), d) - 64.0).abs() < 1e-12);
    }

    #[test]
    fn test_velocity_localized_to_square() {
        let mut grid = still_grid(32);
        SquarePreset::default().apply(&mut grid);
        grid.step();

        // Far corner of the box sees (almost) nothing after one step.
        let vx = grid.velocity_x();
        let far = vx[grid.ix(30, 30)].abs();
        let near = vx[grid.ix(5, 5)].abs();
        assert!(near > 0.0, "square should carry velocity");
        assert!(far < near, "velocity should stay near the square: near={} far={}", near, far);
    }

    #[test]
    fn test_disabled_is_noop() {
        let mut grid = still_grid(8);
        SquarePreset { enabled: false, ..SquarePreset::default() }.apply(&mut grid);
        grid.step();
        assert!(grid.density().iter().all(|&v| v == 0.0));
        assert!(grid.velocity_x().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_square_past_edge_is_clamped() {
        // 8x8 square at offset 2 on a 4x4 grid: everything lands on the interior.
        let mut grid = still_grid(4);
        let preset = SquarePreset {
            velocity_x: 0.0,
            velocity_y: 0.0,
            ..SquarePreset::default()
        };
        preset.apply(&mut grid);
        grid.step();
        assert!((total_density(grid.layout(), grid.density()) - 64.0).abs() < 1e-12);
        assert_eq!(grid.density()[grid.ix(4, 4)], 36.0);
    }
}
