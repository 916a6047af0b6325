use super::*;
use crate::error::{Result, VectorError};

/// Storage for one vector component: a single `f64`, or one dense column of them.
///
/// This is the only place that knows how a shape stores numbers. Everything in
/// [`Coordinates`] is written against these elementwise primitives.
pub trait Component: Clone + Default + fmt::Debug + PartialEq {
    /// Result of an elementwise comparison: `bool` or `Array1<bool>`.
    type Mask: Clone + fmt::Debug + PartialEq;

    /// `None` for a single value, `Some(n)` for a column of `n` values.
    fn length(&self) -> Option<usize>;

    fn map_values(&self, f: impl Fn(f64) -> f64) -> Self;

    /// Elementwise binary operation. Operands must already have equal lengths.
    fn zip_values(&self, other: &Self, f: impl Fn(f64, f64) -> f64) -> Self;

    /// Elementwise ternary operation. Operands must already have equal lengths.
    fn zip3_values(&self, second: &Self, third: &Self, f: impl Fn(f64, f64, f64) -> f64) -> Self;

    /// In-place elementwise update from another operand of equal length.
    fn update_values(&mut self, other: &Self, f: impl Fn(f64, f64) -> f64);

    fn update_each(&mut self, f: impl Fn(f64) -> f64);

    /// Exact elementwise equality.
    fn eq_values(&self, other: &Self) -> Self::Mask;

    fn and_mask(lhs: &Self::Mask, rhs: &Self::Mask) -> Self::Mask;

    /// Same as [`Component::zip_values`], checking lengths first.
    fn try_zip_values(&self, other: &Self, f: impl Fn(f64, f64) -> f64) -> Result<Self> {
        check_same_length(self, other)?;
        Ok(self.zip_values(other, f))
    }
}

/// Fails with `ShapeMismatch` if both operands are columns of different lengths.
pub fn check_same_length<C: Component>(lhs: &C, rhs: &C) -> Result<()> {
    match (lhs.length(), rhs.length()) {
        (Some(expected), Some(found)) if expected != found => {
            debug!(expected, found, "component lengths differ");
            Err(VectorError::ShapeMismatch { expected, found })
        }
        _ => Ok(()),
    }
}

/// Checks that every column in `components` has the length of the first.
pub fn check_lengths<C: Component>(components: &[&C]) -> Result<()> {
    match components.split_first() {
        Some((first, rest)) => rest.iter().try_for_each(|c| check_same_length(*first, *c)),
        None => Ok(()),
    }
}

impl Component for f64 {
    type Mask = bool;

    fn length(&self) -> Option<usize> {
        None
    }

    fn map_values(&self, f: impl Fn(f64) -> f64) -> f64 {
        f(*self)
    }

    fn zip_values(&self, other: &f64, f: impl Fn(f64, f64) -> f64) -> f64 {
        f(*self, *other)
    }

    fn zip3_values(&self, second: &f64, third: &f64, f: impl Fn(f64, f64, f64) -> f64) -> f64 {
        f(*self, *second, *third)
    }

    fn update_values(&mut self, other: &f64, f: impl Fn(f64, f64) -> f64) {
        *self = f(*self, *other);
    }

    fn update_each(&mut self, f: impl Fn(f64) -> f64) {
        *self = f(*self);
    }

    fn eq_values(&self, other: &f64) -> bool {
        self == other
    }

    fn and_mask(lhs: &bool, rhs: &bool) -> bool {
        *lhs && *rhs
    }
}

impl Component for Array1<f64> {
    type Mask = Array1<bool>;

    fn length(&self) -> Option<usize> {
        Some(self.len())
    }

    fn map_values(&self, f: impl Fn(f64) -> f64) -> Array1<f64> {
        self.mapv(f)
    }

    fn zip_values(&self, other: &Array1<f64>, f: impl Fn(f64, f64) -> f64) -> Array1<f64> {
        Zip::from(self).and(other).map_collect(|&a, &b| f(a, b))
    }

    fn zip3_values(&self, second: &Array1<f64>, third: &Array1<f64>, f: impl Fn(f64, f64, f64) -> f64) -> Array1<f64> {
        Zip::from(self).and(second).and(third).map_collect(|&a, &b, &c| f(a, b, c))
    }

    fn update_values(&mut self, other: &Array1<f64>, f: impl Fn(f64, f64) -> f64) {
        Zip::from(self).and(other).for_each(|a, &b| *a = f(*a, b));
    }

    fn update_each(&mut self, f: impl Fn(f64) -> f64) {
        self.mapv_inplace(f);
    }

    fn eq_values(&self, other: &Array1<f64>) -> Array1<bool> {
        Zip::from(self).and(other).map_collect(|a, b| a == b)
    }

    fn and_mask(lhs: &Array1<bool>, rhs: &Array1<bool>) -> Array1<bool> {
        Zip::from(lhs).and(rhs).map_collect(|&a, &b| a && b)
    }
}
