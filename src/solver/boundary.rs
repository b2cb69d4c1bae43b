use crate::state::GridLayout;

/// Field type for boundary condition dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Density, pressure, divergence: copy the adjacent interior cell.
    Scalar,
    /// X velocity: negated on the left/right walls.
    Vx,
    /// Y velocity: negated on the bottom/top walls.
    Vy,
}

impl FieldType {
    fn x_wall_sign(self) -> f64 {
        if self == FieldType::Vx { -1.0 } else { 1.0 }
    }

    fn y_wall_sign(self) -> f64 {
        if self == FieldType::Vy { -1.0 } else { 1.0 }
    }
}

/// Closed-box boundary conditions on the one-cell frame.
///   - `FieldType::Scalar`: Neumann (copy neighbor) on every wall
///   - `FieldType::Vx`: negate on left/right walls (no penetration), copy top/bottom
///   - `FieldType::Vy`: negate on top/bottom walls (no penetration), copy left/right
///
/// Corners are the average of their two adjacent edge cells, written last.
pub fn set_bnd(field_type: FieldType, x: &mut [f64], layout: GridLayout) {
    let n = layout.n();
    let sx = field_type.x_wall_sign();
    let sy = field_type.y_wall_sign();

    for i in 1..=n {
        x[layout.ix(0, i)] = sx * x[layout.ix(1, i)];
        x[layout.ix(n + 1, i)] = sx * x[layout.ix(n, i)];
        x[layout.ix(i, 0)] = sy * x[layout.ix(i, 1)];
        x[layout.ix(i, n + 1)] = sy * x[layout.ix(i, n)];
    }

    x[layout.ix(0, 0)] = 0.5 * (x[layout.ix(1, 0)] + x[layout.ix(0, 1)]);
    x[layout.ix(0, n + 1)] = 0.5 * (x[layout.ix(1, n + 1)] + x[layout.ix(0, n)]);
    x[layout.ix(n + 1, 0)] = 0.5 * (x[layout.ix(n, 0)] + x[layout.ix(n + 1, 1)]);
    x[layout.ix(n + 1, n + 1)] = 0.5 * (x[layout.ix(n, n + 1)] + x[layout.ix(n + 1, n)]);
}
