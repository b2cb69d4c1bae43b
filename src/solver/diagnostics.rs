use crate::state::GridLayout;

/// Sum of a scalar field over interior cells.
pub fn total_density(layout: GridLayout, density: &[f64]) -> f64 {
    let n = layout.n();
    let mut sum = 0.0;
    for j in 1..=n {
        for i in 1..=n {
            sum += density[layout.ix(i, j)];
        }
    }
    sum
}

/// Compute volume-averaged kinetic energy: KE = 0.5 * <vx² + vy²>.
pub fn kinetic_energy(layout: GridLayout, vx: &[f64], vy: &[f64]) -> f64 {
    let n = layout.n();
    let mut sum = 0.0;
    let mut count = 0usize;
    for j in 1..=n {
        for i in 1..=n {
            let ii = layout.ix(i, j);
            sum += vx[ii] * vx[ii] + vy[ii] * vy[ii];
            count += 1;
        }
    }
    if count > 0 { 0.5 * sum / count as f64 } else { 0.0 }
}

/// Sum over interior cells of the squared central-difference divergence,
/// scaled by the grid spacing `1/N` exactly as the projection measures it.
pub fn divergence_sq(layout: GridLayout, vx: &[f64], vy: &[f64]) -> f64 {
    let n = layout.n();
    let h = 1.0 / n as f64;
    let mut sum = 0.0;
    for j in 1..=n {
        for i in 1..=n {
            let d = -0.5
                * h
                * (vx[layout.ix(i + 1, j)] - vx[layout.ix(i - 1, j)]
                    + vy[layout.ix(i, j + 1)] - vy[layout.ix(i, j - 1)]);
            sum += d * d;
        }
    }
    sum
}

/// Interior cell holding the largest value, with that value.
/// NaN cells are skipped; returns `(1, 1)` with NaN if nothing compares.
pub fn peak(layout: GridLayout, field: &[f64]) -> ((usize, usize), f64) {
    let n = layout.n();
    let mut best = ((1, 1), f64::NAN);
    for j in 1..=n {
        for i in 1..=n {
            let v = field[layout.ix(i, j)];
            if v.is_nan() {
                continue;
            }
            if best.1.is_nan() || v > best.1 {
                best = ((i, j), v);
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    const N: usize = 8;

    #[test]
    fn test_total_density_ignores_frame() {
        let layout = GridLayout::new(N);
        let mut density = vec![0.0; layout.len()];
        density[layout.ix(0, 3)] = 100.0;
        density[layout.ix(N + 1, N + 1)] = 100.0;
        density[layout.ix(2, 2)] = 1.5;
        density[layout.ix(7, 5)] = 0.5;
        assert!((total_density(layout, &density) - 2.0).abs() < 1e-15);
    }

    #[test]
    fn test_kinetic_energy_zero() {
        let layout = GridLayout::new(N);
        let vx = vec![0.0; layout.len()];
        let vy = vec![0.0; layout.len()];
        let ke = kinetic_energy(layout, &vx, &vy);
        assert!(ke.abs() < 1e-15, "KE should be 0 with no flow, got {}", ke);
    }

    #[test]
    fn test_kinetic_energy_uniform_flow() {
        let layout = GridLayout::new(N);
        let vx = vec![1.0; layout.len()];
        let vy = vec![0.0; layout.len()];
        let ke = kinetic_energy(layout, &vx, &vy);
        assert!((ke - 0.5).abs() < 1e-10, "KE should be 0.5, got {}", ke);
    }

    #[test]
    fn test_divergence_of_uniform_flow_is_zero() {
        let layout = GridLayout::new(N);
        let vx = vec![2.0; layout.len()];
        let vy = vec![-1.0; layout.len()];
        assert_eq!(divergence_sq(layout, &vx, &vy), 0.0);
    }

    #[test]
    fn test_divergence_of_source_is_positive() {
        let layout = GridLayout::new(N);
        let mut vx = vec![0.0; layout.len()];
        let vy = vec![0.0; layout.len()];
        vx[layout.ix(5, 4)] = 1.0;
        vx[layout.ix(3, 4)] = -1.0;
        // (4,4) sees both cells, (2,4) and (6,4) one each.
        let expected = (0.5 * 0.125 * 2.0_f64).powi(2) + 2.0 * (0.5 * 0.125_f64).powi(2);
        assert!((divergence_sq(layout, &vx, &vy) - expected).abs() < 1e-15);
    }

    #[test]
    fn test_peak_finds_max() {
        let layout = GridLayout::new(N);
        let mut field = vec![0.0; layout.len()];
        field[layout.ix(0, 0)] = 10.0;
        field[layout.ix(6, 2)] = 0.75;
        field[layout.ix(3, 3)] = f64::NAN;
        let (cell, value) = peak(layout, &field);
        assert_eq!(cell, (6, 2));
        assert_eq!(value, 0.75);
    }
}
