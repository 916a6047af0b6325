use super::*;
use crate::error::{expect_shape, Result};

/// Three-dimensional Euclidean vector, single (`C = f64`) or columnar (`C = Array1<f64>`).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TVector3<C = f64> {
    pub x: C,
    pub y: C,
    pub z: C,
}

/// Columnar array of 3D vectors.
pub type TVector3Array = TVector3<Array1<f64>>;

impl<C: Component> Coordinates for TVector3<C> {
    type Component = C;

    const AXES: &'static [Axis] = &[Axis::X, Axis::Y, Axis::Z];
    const METRIC: Metric = Metric::EUCLIDEAN;

    fn components(&self) -> Vec<&C> {
        vec![&self.x, &self.y, &self.z]
    }

    fn components_mut(&mut self) -> Vec<&mut C> {
        vec![&mut self.x, &mut self.y, &mut self.z]
    }

    fn from_fn<F: FnMut(Axis) -> C>(mut f: F) -> TVector3<C> {
        let x = f(Axis::X);
        let y = f(Axis::Y);
        let z = f(Axis::Z);
        TVector3 { x, y, z }
    }
}

impl VectorArray for TVector3Array {
    type Element = TVector3;
}

impl<C: Component> TVector3<C> {
    /// # Panics
    /// If the components are columns of different lengths. See [`TVector3::try_new`].
    pub fn new(x: C, y: C, z: C) -> TVector3<C> {
        assert!(
            x.length() == y.length() && y.length() == z.length(),
            "Input error: TVector3 components must have equal lengths."
        );
        TVector3 { x, y, z }
    }

    pub fn try_new(x: C, y: C, z: C) -> Result<TVector3<C>> {
        check_lengths(&[&x, &y, &z])?;
        Ok(TVector3 { x, y, z })
    }

    /// Build from spherical coordinates: radius, polar angle from +z, azimuth.
    ///
    /// # Panics
    /// If the inputs are columns of different lengths.
    pub fn from_spherical(r: C, theta: C, phi: C) -> TVector3<C> {
        expect_shape(check_lengths(&[&r, &theta, &phi]));
        TVector3 {
            x: r.zip3_values(&theta, &phi, |r, t, p| r * t.sin() * p.cos()),
            y: r.zip3_values(&theta, &phi, |r, t, p| r * t.sin() * p.sin()),
            z: r.zip_values(&theta, |r, t| r * t.cos()),
        }
    }

    /// Build from cylindrical coordinates: transverse radius, azimuth, z.
    ///
    /// # Panics
    /// If the inputs are columns of different lengths.
    pub fn from_cylindrical(rho: C, phi: C, z: C) -> TVector3<C> {
        expect_shape(check_lengths(&[&rho, &phi, &z]));
        TVector3 {
            x: rho.zip_values(&phi, |r, p| r * p.cos()),
            y: rho.zip_values(&phi, |r, p| r * p.sin()),
            z,
        }
    }

    /// Transverse magnitude `hypot(x, y)`.
    pub fn rho(&self) -> C {
        self.x.zip_values(&self.y, f64::hypot)
    }

    pub fn phi(&self) -> C {
        self.y.zip_values(&self.x, f64::atan2)
    }

    /// Polar angle from the +z axis.
    pub fn theta(&self) -> C {
        self.rho().zip_values(&self.z, f64::atan2)
    }

    /// Pseudorapidity `asinh(z / rho)`.
    pub fn eta(&self) -> C {
        self.z.zip_values(&self.rho(), |z, rho| (z / rho).asinh())
    }

    pub fn rotatex(&self, angle: f64) -> TVector3<C> {
        self.rotated(Axis::Y, Axis::Z, angle)
    }

    pub fn rotatey(&self, angle: f64) -> TVector3<C> {
        self.rotated(Axis::Z, Axis::X, angle)
    }

    /// Rotate by `angle` about `axis` (Rodrigues' formula). A zero axis leaves the vector unchanged.
    pub fn rotate_axis(&self, axis: &TVector3, angle: f64) -> TVector3<C> {
        let norm = axis.abs();
        if norm == 0. {
            return self.clone();
        }
        let (kx, ky, kz) = (axis.x / norm, axis.y / norm, axis.z / norm);
        let (sin, cos) = angle.sin_cos();
        let projection = self.x.zip3_values(&self.y, &self.z, |x, y, z| (kx * x + ky * y + kz * z) * (1. - cos));

        let x = self.x.zip3_values(&self.y, &self.z, |x, y, z| x * cos + (ky * z - kz * y) * sin);
        let y = self.x.zip3_values(&self.y, &self.z, |x, y, z| y * cos + (kz * x - kx * z) * sin);
        let z = self.x.zip3_values(&self.y, &self.z, |x, y, z| z * cos + (kx * y - ky * x) * sin);

        TVector3 {
            x: x.zip_values(&projection, |r, d| r + kx * d),
            y: y.zip_values(&projection, |r, d| r + ky * d),
            z: z.zip_values(&projection, |r, d| r + kz * d),
        }
    }

    pub fn delta_phi(&self, other: &TVector3<C>) -> Result<C> {
        self.check_shape(other)?;
        Ok(wrap_delta_phi(&self.phi(), &other.phi()))
    }
}

impl fmt::Display for TVector3 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "TVector3({:.5}, {:.5}, {:.5})", self.x, self.y, self.z)
    }
}
