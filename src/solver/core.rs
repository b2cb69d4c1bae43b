use crate::state::GridLayout;
use super::boundary::{FieldType, set_bnd};

/// Gauss-Seidel iterative linear solver.
/// Solves: x[i,j] = (x0[i,j] + a * (neighbors)) / c over the interior,
/// refreshing the boundary frame after every sweep.
pub fn lin_solve(field_type: FieldType, x: &mut [f64], x0: &[f64], a: f64, c: f64, iter: usize, layout: GridLayout) {
    let n = layout.n();
    let c_inv = 1.0 / c;
    for _ in 0..iter {
        for j in 1..=n {
            for i in 1..=n {
                let neighbors = x[layout.ix(i - 1, j)]
                    + x[layout.ix(i + 1, j)]
                    + x[layout.ix(i, j - 1)]
                    + x[layout.ix(i, j + 1)];
                let ii = layout.ix(i, j);
                x[ii] = (x0[ii] + a * neighbors) * c_inv;
            }
        }
        set_bnd(field_type, x, layout);
    }
}

/// Implicit diffusion step: solves (I - k * laplacian) x = x0.
/// a = dt * rate * N^2, c = 1 + 4a
pub fn diffuse(field_type: FieldType, x: &mut [f64], x0: &[f64], rate: f64, dt: f64, iter: usize, layout: GridLayout) {
    let n = layout.n() as f64;
    let a = dt * rate * n * n;
    let c = 1.0 + 4.0 * a;
    x.copy_from_slice(x0);
    lin_solve(field_type, x, x0, a, c, iter, layout);
}

/// Semi-Lagrangian advection: traces each cell center backwards through the velocity field
/// and bilinearly samples `d0` there.
pub fn advect(field_type: FieldType, d: &mut [f64], d0: &[f64], vx: &[f64], vy: &[f64], dt: f64, layout: GridLayout) {
    let n = layout.n();
    let dt0 = dt * n as f64;
    let lo = 0.5;
    let hi = n as f64 + 0.5;

    for j in 1..=n {
        for i in 1..=n {
            let ii = layout.ix(i, j);
            let x = (i as f64 - dt0 * vx[ii]).clamp(lo, hi);
            let y = (j as f64 - dt0 * vy[ii]).clamp(lo, hi);

            // `as` saturates (NaN -> 0), so the corners stay inside [0, n + 1].
            let i0 = (x.floor() as usize).min(n);
            let j0 = (y.floor() as usize).min(n);
            let i1 = i0 + 1;
            let j1 = j0 + 1;

            let s1 = x - i0 as f64;
            let s0 = 1.0 - s1;
            let t1 = y - j0 as f64;
            let t0 = 1.0 - t1;

            d[ii] = s0 * (t0 * d0[layout.ix(i0, j0)] + t1 * d0[layout.ix(i0, j1)])
                + s1 * (t0 * d0[layout.ix(i1, j0)] + t1 * d0[layout.ix(i1, j1)]);
        }
    }
    set_bnd(field_type, d, layout);
}

/// Pressure projection: enforces incompressibility (divergence-free velocity field).
/// Returns the sum of squared divergence the projection started from.
pub fn project(vx: &mut [f64], vy: &mut [f64], p: &mut [f64], div: &mut [f64], iter: usize, layout: GridLayout) -> f64 {
    let n = layout.n();
    let h = 1.0 / n as f64;
    let mut div_sq = 0.0;

    // Calculate divergence
    for j in 1..=n {
        for i in 1..=n {
            let d = -0.5
                * h
                * (vx[layout.ix(i + 1, j)] - vx[layout.ix(i - 1, j)]
                    + vy[layout.ix(i, j + 1)] - vy[layout.ix(i, j - 1)]);
            div[layout.ix(i, j)] = d;
            p[layout.ix(i, j)] = 0.0;
            div_sq += d * d;
        }
    }
    set_bnd(FieldType::Scalar, div, layout);
    set_bnd(FieldType::Scalar, p, layout);

    // Solve for pressure
    lin_solve(FieldType::Scalar, p, div, 1.0, 4.0, iter, layout);

    // Subtract pressure gradient from velocity
    for j in 1..=n {
        for i in 1..=n {
            vx[layout.ix(i, j)] -= 0.5 * (p[layout.ix(i + 1, j)] - p[layout.ix(i - 1, j)]) / h;
            vy[layout.ix(i, j)] -= 0.5 * (p[layout.ix(i, j + 1)] - p[layout.ix(i, j - 1)]) / h;
        }
    }
    set_bnd(FieldType::Vx, vx, layout);
    set_bnd(FieldType::Vy, vy, layout);

    div_sq
}
