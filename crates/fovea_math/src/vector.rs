//! Extension methods on [`Vector3`] that glam does not provide with the
//! semantics the tracer relies on.

use crate::Vector3;

pub trait VectorExt {
    /// Unit vector in the same direction, or `self` unchanged when the
    /// length is zero. Never divides by zero.
    fn normalize_or_self(self) -> Self;

    /// Mirror `self` about the normal `n`: `d - n * 2(d·n)`.
    fn reflect(self, n: Self) -> Self;
}

impl VectorExt for Vector3 {
    #[inline]
    fn normalize_or_self(self) -> Self {
        let length = self.length();
        if length > 0.0 {
            self / length
        } else {
            self
        }
    }

    #[inline]
    fn reflect(self, n: Self) -> Self {
        self - n * (2.0 * self.dot(n))
    }
}
