use super::*;
use crate::error::{expect_shape, Result};

/// Two-dimensional Euclidean vector.
///
/// `TVector2` (`C = f64`) is one vector; [`TVector2Array`] (`C = Array1<f64>`) holds
/// one column per component.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TVector2<C = f64> {
    pub x: C,
    pub y: C,
}

/// Columnar array of 2D vectors.
pub type TVector2Array = TVector2<Array1<f64>>;

impl<C: Component> Coordinates for TVector2<C> {
    type Component = C;

    const AXES: &'static [Axis] = &[Axis::X, Axis::Y];
    const METRIC: Metric = Metric::EUCLIDEAN;

    fn components(&self) -> Vec<&C> {
        vec![&self.x, &self.y]
    }

    fn components_mut(&mut self) -> Vec<&mut C> {
        vec![&mut self.x, &mut self.y]
    }

    fn from_fn<F: FnMut(Axis) -> C>(mut f: F) -> TVector2<C> {
        let x = f(Axis::X);
        let y = f(Axis::Y);
        TVector2 { x, y }
    }
}

impl VectorArray for TVector2Array {
    type Element = TVector2;
}

impl<C: Component> TVector2<C> {
    /// # Panics
    /// If `x` and `y` are columns of different lengths. See [`TVector2::try_new`].
    pub fn new(x: C, y: C) -> TVector2<C> {
        assert!(x.length() == y.length(), "Input error: TVector2 components must have equal lengths.");
        TVector2 { x, y }
    }

    pub fn try_new(x: C, y: C) -> Result<TVector2<C>> {
        check_same_length(&x, &y)?;
        Ok(TVector2 { x, y })
    }

    /// Build from polar coordinates `(rho, phi)`.
    ///
    /// # Panics
    /// If `rho` and `phi` are columns of different lengths.
    pub fn from_polar(rho: C, phi: C) -> TVector2<C> {
        expect_shape(check_same_length(&rho, &phi));
        TVector2 {
            x: rho.zip_values(&phi, |r, p| r * p.cos()),
            y: rho.zip_values(&phi, |r, p| r * p.sin()),
        }
    }

    /// Azimuth in `(-pi, pi]`.
    pub fn phi(&self) -> C {
        self.y.zip_values(&self.x, f64::atan2)
    }

    pub fn rho(&self) -> C {
        self.mag()
    }

    pub fn rotate(&self, angle: f64) -> TVector2<C> {
        self.rotatez(angle)
    }

    /// `phi - other.phi` wrapped into `[-pi, pi)`.
    pub fn delta_phi(&self, other: &TVector2<C>) -> Result<C> {
        self.check_shape(other)?;
        Ok(wrap_delta_phi(&self.phi(), &other.phi()))
    }
}

impl fmt::Display for TVector2 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "TVector2({:.5}, {:.5})", self.x, self.y)
    }
}
