use super::*;
use crate::error::{unsupported, Result};

/// Arithmetic and geometry shared by every vector kind and every shape.
///
/// A kind supplies three things: its components in axis order, mutable access to
/// them, and [`Coordinates::from_fn`], which rebuilds a value of the same kind and
/// shape from one new component per axis. Everything else is defined here once
/// and works unchanged for single vectors (`Component = f64`) and dense arrays of
/// vectors (`Component = Array1<f64>`).
pub trait Coordinates: Clone {
    type Component: Component;

    /// Axes stored by this kind, always a prefix of `[X, Y, Z, T]`.
    const AXES: &'static [Axis];
    const METRIC: Metric;

    /// Components in `AXES` order.
    fn components(&self) -> Vec<&Self::Component>;

    fn components_mut(&mut self) -> Vec<&mut Self::Component>;

    /// Rebuild a value of this kind, calling `f` once per axis in `AXES` order.
    fn from_fn<F: FnMut(Axis) -> Self::Component>(f: F) -> Self;

    fn component(&self, axis: Axis) -> Option<&Self::Component> {
        self.components().get(axis.index()).copied()
    }

    /// Number of vectors held, `None` for a single vector.
    fn length(&self) -> Option<usize> {
        self.components().first().and_then(|c| c.length())
    }

    /// Every component of both operands must have the length of `self`'s first.
    /// Fields are public, so columns may have been reassigned one at a time.
    fn check_shape(&self, other: &Self) -> Result<()> {
        let columns: Vec<&Self::Component> = self.components().into_iter().chain(other.components()).collect();
        check_lengths(&columns)
    }

    fn map_components<F: Fn(&Self::Component) -> Self::Component>(&self, f: F) -> Self {
        let components = self.components();
        Self::from_fn(|axis| f(components[axis.index()]))
    }

    fn zip_components<F>(&self, other: &Self, f: F) -> Result<Self>
    where
        F: Fn(&Self::Component, &Self::Component) -> Self::Component,
    {
        self.check_shape(other)?;
        let (lhs, rhs) = (self.components(), other.components());
        Ok(Self::from_fn(|axis| f(lhs[axis.index()], rhs[axis.index()])))
    }

    fn try_add(&self, other: &Self) -> Result<Self> {
        self.zip_components(other, |a, b| a.zip_values(b, |p, q| p + q))
    }

    fn try_sub(&self, other: &Self) -> Result<Self> {
        self.zip_components(other, |a, b| a.zip_values(b, |p, q| p - q))
    }

    fn scale(&self, factor: f64) -> Self {
        self.map_components(|c| c.map_values(|v| v * factor))
    }

    /// Divide every component by `divisor`. Division by zero gives IEEE infinities or NaN.
    fn divide(&self, divisor: f64) -> Self {
        self.map_components(|c| c.map_values(|v| v / divisor))
    }

    /// Reflected division `numerator / v`, applied to each component on its own.
    ///
    /// This is not the inverse vector: `1000 / (4.4, 5.5)` is
    /// `(227.27272727272725, 181.8181818181818)`.
    fn rdiv(&self, numerator: f64) -> Self {
        self.map_components(|c| c.map_values(|v| numerator / v))
    }

    fn negate(&self) -> Self {
        self.map_components(|c| c.map_values(|v| -v))
    }

    fn add_assign_from(&mut self, other: &Self) -> Result<()> {
        self.check_shape(other)?;
        for (lhs, rhs) in self.components_mut().into_iter().zip(other.components()) {
            lhs.update_values(rhs, |p, q| p + q);
        }
        Ok(())
    }

    fn sub_assign_from(&mut self, other: &Self) -> Result<()> {
        self.check_shape(other)?;
        for (lhs, rhs) in self.components_mut().into_iter().zip(other.components()) {
            lhs.update_values(rhs, |p, q| p - q);
        }
        Ok(())
    }

    fn scale_assign(&mut self, factor: f64) {
        for c in self.components_mut() {
            c.update_each(|v| v * factor);
        }
    }

    fn divide_assign(&mut self, divisor: f64) {
        for c in self.components_mut() {
            c.update_each(|v| v / divisor);
        }
    }

    /// Exact componentwise equality, one flag per vector.
    fn eq_mask(&self, other: &Self) -> Result<<Self::Component as Component>::Mask> {
        self.check_shape(other)?;
        let (lhs, rhs) = (self.components(), other.components());
        let mut mask = lhs[0].eq_values(rhs[0]);
        for (a, b) in lhs.iter().zip(rhs.iter()).skip(1) {
            mask = <Self::Component as Component>::and_mask(&mask, &a.eq_values(b));
        }
        Ok(mask)
    }

    /// Sum over axes of `weight(axis) * a_axis * b_axis`, skipping axes with no weight.
    fn weighted_sum<W: Fn(Axis) -> Option<f64>>(&self, other: &Self, weight: W) -> Self::Component {
        let (lhs, rhs) = (self.components(), other.components());
        Self::AXES
            .iter()
            .filter_map(|&axis| {
                weight(axis).map(|w| lhs[axis.index()].zip_values(rhs[axis.index()], move |p, q| w * p * q))
            })
            .reduce(|acc, term| acc.zip_values(&term, |p, q| p + q))
            .unwrap_or_default()
    }

    /// Inner product under the kind's metric.
    fn dot(&self, other: &Self) -> Result<Self::Component> {
        self.check_shape(other)?;
        Ok(self.weighted_sum(other, |axis| Some(Self::METRIC.sign(axis))))
    }

    /// `dot(v, v)`. Negative for spacelike Lorentz vectors.
    fn mag2(&self) -> Self::Component {
        self.weighted_sum(self, |axis| Some(Self::METRIC.sign(axis)))
    }

    /// `sqrt(mag2)` for Euclidean kinds, `sign(mag2) * sqrt(|mag2|)` for Lorentz vectors.
    fn mag(&self) -> Self::Component {
        let mag2 = self.mag2();
        match Self::METRIC {
            Metric::EUCLIDEAN => mag2.map_values(f64::sqrt),
            Metric::MINKOWSKI => mag2.map_values(|m| m.signum() * m.abs().sqrt()),
        }
    }

    /// `sqrt(|mag2|)`.
    fn abs(&self) -> Self::Component {
        self.mag2().map_values(|m| m.abs().sqrt())
    }

    /// `v ** p`: `mag2` for `p == 2`, `abs` for `p == 1`, and `abs ** p` otherwise.
    fn pow(&self, exponent: f64) -> Self::Component {
        if exponent == 2. {
            self.mag2()
        } else if exponent == 1. {
            self.abs()
        } else {
            self.abs().map_values(|m| m.powf(exponent))
        }
    }

    /// The vector divided by its magnitude. Null vectors give NaN components.
    fn unit(&self) -> Self {
        let norm = self.abs();
        self.map_components(|c| c.zip_values(&norm, |v, n| v / n))
    }

    fn spatial_dot(&self, other: &Self) -> Result<Self::Component> {
        self.check_shape(other)?;
        Ok(self.weighted_sum(other, |axis| if axis.is_spatial() { Some(1.) } else { None }))
    }

    fn spatial_mag2(&self) -> Self::Component {
        self.weighted_sum(self, |axis| if axis.is_spatial() { Some(1.) } else { None })
    }

    /// Angle between the spatial parts, in `[0, pi]`.
    ///
    /// Defined as exactly 0 wherever either spatial part is the null vector.
    fn angle(&self, other: &Self) -> Result<Self::Component> {
        let dot = self.spatial_dot(other)?;
        let (lhs, rhs) = (self.spatial_mag2(), other.spatial_mag2());
        Ok(dot.zip3_values(&lhs, &rhs, |d, a, b| {
            if a == 0. || b == 0. {
                0.
            } else {
                (d / (a * b).sqrt()).clamp(-1., 1.).acos()
            }
        }))
    }

    /// Cross product of the spatial parts. Needs three spatial components.
    fn cross(&self, other: &Self) -> Result<TVector3<Self::Component>> {
        self.check_shape(other)?;
        let (a, b) = match (spatial_xyz(self), spatial_xyz(other)) {
            (Some(a), Some(b)) => (a, b),
            _ => return Err(unsupported("cross product needs three spatial components")),
        };
        let minor = |p: &Self::Component, q: &Self::Component, r: &Self::Component, s: &Self::Component| {
            p.zip_values(q, |u, v| u * v).zip_values(&r.zip_values(s, |u, v| u * v), |u, v| u - v)
        };
        Ok(TVector3 {
            x: minor(a[1], b[2], a[2], b[1]),
            y: minor(a[2], b[0], a[0], b[2]),
            z: minor(a[0], b[1], a[1], b[0]),
        })
    }

    /// Rotate in the plane from `first` towards `second`. Planes the kind does
    /// not store leave the vector unchanged.
    fn rotated(&self, first: Axis, second: Axis, angle: f64) -> Self {
        let (a, b) = match (self.component(first), self.component(second)) {
            (Some(a), Some(b)) => (a, b),
            _ => return self.clone(),
        };
        let (sin, cos) = angle.sin_cos();
        let mut new_first = a.zip_values(b, |p, q| cos * p - sin * q);
        let mut new_second = a.zip_values(b, |p, q| sin * p + cos * q);
        let components = self.components();
        Self::from_fn(|axis| {
            if axis == first {
                std::mem::take(&mut new_first)
            } else if axis == second {
                std::mem::take(&mut new_second)
            } else {
                components[axis.index()].clone()
            }
        })
    }

    /// Rotation about the z axis: `(x, y)` turn by `angle`, other components untouched.
    fn rotatez(&self, angle: f64) -> Self {
        self.rotated(Axis::X, Axis::Y, angle)
    }
}

fn spatial_xyz<V: Coordinates>(v: &V) -> Option<[&V::Component; 3]> {
    Some([v.component(Axis::X)?, v.component(Axis::Y)?, v.component(Axis::Z)?])
}

/// Azimuthal difference `a - b` wrapped into `[-pi, pi)`.
pub fn wrap_delta_phi<C: Component>(a: &C, b: &C) -> C {
    a.zip_values(b, |p, q| (p - q + PI).rem_euclid(TWO_PI) - PI)
}
