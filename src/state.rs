/// Padded square grid: logical side `n`, stored as `(n + 2) x (n + 2)` so the
/// boundary cells form a one-cell frame around the interior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    n: usize,
}

impl GridLayout {
    pub fn new(n: usize) -> Self {
        Self { n }
    }

    /// Logical (interior) side length.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Row stride of the padded buffer.
    pub fn stride(&self) -> usize {
        self.n + 2
    }

    /// Total cell count of the padded buffer, boundary frame included.
    pub fn len(&self) -> usize {
        self.stride() * self.stride()
    }

    /// Flat index of `(x, y)`, both in `[0, n + 1]`.
    #[inline(always)]
    pub const fn ix(&self, x: usize, y: usize) -> usize {
        x + y * (self.n + 2)
    }

    /// Nearest interior cell to `pos`. Anything outside `[1, n]` is pulled in,
    /// so injections can never land on the boundary frame.
    pub fn clamp_interior(&self, pos: (i32, i32)) -> (usize, usize) {
        let hi = self.n.max(1) as i64;
        let x = (pos.0 as i64).clamp(1, hi) as usize;
        let y = (pos.1 as i64).clamp(1, hi) as usize;
        (x, y)
    }
}

/// All per-cell buffers owned by the solver. Every buffer has `layout.len()` cells.
pub struct FieldSet {
    pub density: Vec<f64>,
    /// Density sources for the current frame; scratch input to diffuse/advect inside `step`.
    pub density_prev: Vec<f64>,
    pub vx: Vec<f64>,
    pub vx_prev: Vec<f64>,
    pub vy: Vec<f64>,
    pub vy_prev: Vec<f64>,
    /// Scratch buffer for the pressure solve.
    pub pressure: Vec<f64>,
    /// Scratch buffer for the divergence field.
    pub divergence: Vec<f64>,
}

impl FieldSet {
    pub fn new(layout: GridLayout) -> Self {
        let size = layout.len();
        Self {
            density: vec![0.0; size],
            density_prev: vec![0.0; size],
            vx: vec![0.0; size],
            vx_prev: vec![0.0; size],
            vy: vec![0.0; size],
            vy_prev: vec![0.0; size],
            pressure: vec![0.0; size],
            divergence: vec![0.0; size],
        }
    }

    /// Zero every buffer in place.
    pub fn clear(&mut self) {
        for buf in [
            &mut self.density,
            &mut self.density_prev,
            &mut self.vx,
            &mut self.vx_prev,
            &mut self.vy,
            &mut self.vy_prev,
            &mut self.pressure,
            &mut self.divergence,
        ] {
            buf.fill(0.0);
        }
    }

    /// Zero the source buffers only.
    pub fn clear_sources(&mut self) {
        self.density_prev.fill(0.0);
        self.vx_prev.fill(0.0);
        self.vy_prev.fill(0.0);
    }
}

/// Copy of the visible fields, padded layout included.
#[derive(Debug, Clone)]
pub struct FrameSnapshot {
    pub n: usize,
    pub density: Vec<f64>,
    pub vx: Vec<f64>,
    pub vy: Vec<f64>,
}

impl FrameSnapshot {
    /// Pre-allocate a snapshot buffer matching the given layout.
    pub fn new_empty(layout: GridLayout) -> Self {
        let size = layout.len();
        FrameSnapshot {
            n: layout.n(),
            density: vec![0.0; size],
            vx: vec![0.0; size],
            vy: vec![0.0; size],
        }
    }

    pub fn layout(&self) -> GridLayout {
        GridLayout::new(self.n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ix_row_major_with_padding() {
        let layout = GridLayout::new(8);
        assert_eq!(layout.stride(), 10);
        assert_eq!(layout.len(), 100);
        assert_eq!(layout.ix(0, 0), 0);
        assert_eq!(layout.ix(9, 0), 9);
        assert_eq!(layout.ix(0, 1), 10);
        assert_eq!(layout.ix(3, 4), 43);
        assert_eq!(layout.ix(9, 9), 99);
    }

    #[test]
    fn test_clamp_interior_keeps_frame_untouched() {
        let layout = GridLayout::new(8);
        assert_eq!(layout.clamp_interior((4, 5)), (4, 5));
        assert_eq!(layout.clamp_interior((0, 0)), (1, 1));
        assert_eq!(layout.clamp_interior((-20, 3)), (1, 3));
        assert_eq!(layout.clamp_interior((9, 100)), (8, 8));
        assert_eq!(layout.clamp_interior((i32::MAX, i32::MIN)), (8, 1));
    }

    #[test]
    fn test_field_set_sizes_match() {
        let layout = GridLayout::new(5);
        let fields = FieldSet::new(layout);
        for buf in [
            &fields.density,
            &fields.density_prev,
            &fields.vx,
            &fields.vx_prev,
            &fields.vy,
            &fields.vy_prev,
        ] {
            assert_eq!(buf.len(), 49);
            assert!(buf.iter().all(|&v| v == 0.0));
        }
    }

    #[test]
    fn test_clear_keeps_allocation() {
        let layout = GridLayout::new(4);
        let mut fields = FieldSet::new(layout);
        fields.density[7] = 1.0;
        fields.vx_prev[8] = 2.0;
        fields.pressure[9] = 3.0;
        let ptr = fields.density.as_ptr();
        fields.clear();
        assert_eq!(fields.density.as_ptr(), ptr);
        assert!(fields.density.iter().all(|&v| v == 0.0));
        assert!(fields.vx_prev.iter().all(|&v| v == 0.0));
        assert!(fields.pressure.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_clear_sources_leaves_current_fields() {
        let layout = GridLayout::new(4);
        let mut fields = FieldSet::new(layout);
        fields.density[7] = 1.0;
        fields.density_prev[7] = 0.5;
        fields.vy_prev[3] = -1.0;
        fields.clear_sources();
        assert_eq!(fields.density[7], 1.0);
        assert_eq!(fields.density_prev[7], 0.0);
        assert_eq!(fields.vy_prev[3], 0.0);
    }
}
