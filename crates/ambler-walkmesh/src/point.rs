use core::ops::{Index, IndexMut};

/// Weights below this magnitude are treated as exactly zero when settling.
pub const BARY_EPS: f32 = 1e-6;

/// Barycentric weights, one per triangle corner, in corner order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Barycentric(pub [f32; 3]);

impl Barycentric {
    pub const NAN: Barycentric = Barycentric([f32::NAN; 3]);

    #[inline]
    pub const fn new(a: f32, b: f32, c: f32) -> Self {
        Self([a, b, c])
    }

    #[inline]
    pub fn sum(&self) -> f32 {
        self.0[0] + self.0[1] + self.0[2]
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|w| w.is_finite())
    }

    #[inline]
    pub fn any_negative(&self) -> bool {
        self.0.iter().any(|&w| w < 0.0)
    }

    /// Corner the point sits on exactly, if any.
    #[inline]
    pub fn vertex_axis(&self) -> Option<usize> {
        self.0.iter().position(|&w| w == 1.0)
    }

    /// `self + other * t`, per axis.
    #[inline]
    pub fn add_scaled(&self, other: &Barycentric, t: f32) -> Barycentric {
        Barycentric(core::array::from_fn(|i| self.0[i] + other.0[i] * t))
    }

    #[inline]
    pub fn sub(&self, other: &Barycentric) -> Barycentric {
        Barycentric(core::array::from_fn(|i| self.0[i] - other.0[i]))
    }

    /// Snap near-zero weights to zero and rescale so the triple sums to one.
    /// Weights that are negative beyond `BARY_EPS` are left alone.
    pub fn settle(&mut self) {
        for w in &mut self.0 {
            if w.abs() < BARY_EPS {
                *w = 0.0;
            }
        }
        let s = self.sum();
        if s > 0.0 && s.is_finite() {
            for w in &mut self.0 {
                *w /= s;
            }
        }
    }
}

impl Index<usize> for Barycentric {
    type Output = f32;
    #[inline]
    fn index(&self, i: usize) -> &f32 {
        &self.0[i]
    }
}

impl IndexMut<usize> for Barycentric {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut f32 {
        &mut self.0[i]
    }
}

/// One agent's position on a walk mesh: a triangle (vertex indices) and
/// barycentric weights relative to its corners.
///
/// The default value is the "nowhere" sentinel returned by point location on
/// an empty mesh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WalkPoint {
    pub triangle: [u32; 3],
    pub weights: Barycentric,
}

impl Default for WalkPoint {
    fn default() -> Self {
        Self {
            triangle: [u32::MAX; 3],
            weights: Barycentric::NAN,
        }
    }
}

impl WalkPoint {
    #[inline]
    pub fn new(triangle: [u32; 3], weights: Barycentric) -> Self {
        Self { triangle, weights }
    }

    /// False for the sentinel and for anything with non-finite weights.
    #[inline]
    pub fn is_valid(&self) -> bool {
        !self.triangle.contains(&u32::MAX) && self.weights.is_finite()
    }
}
