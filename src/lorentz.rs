use super::*;
use crate::error::{expect_shape, Result};

/// Energy-momentum four-vector with metric signature (-,-,-,+).
///
/// `t` is the energy. Single (`C = f64`) or columnar (`C = Array1<f64>`), like the
/// Euclidean kinds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TLorentzVector<C = f64> {
    pub x: C,
    pub y: C,
    pub z: C,
    pub t: C,
}

/// Columnar array of four-vectors.
pub type TLorentzVectorArray = TLorentzVector<Array1<f64>>;

impl<C: Component> Coordinates for TLorentzVector<C> {
    type Component = C;

    const AXES: &'static [Axis] = &[Axis::X, Axis::Y, Axis::Z, Axis::T];
    const METRIC: Metric = Metric::MINKOWSKI;

    fn components(&self) -> Vec<&C> {
        vec![&self.x, &self.y, &self.z, &self.t]
    }

    fn components_mut(&mut self) -> Vec<&mut C> {
        vec![&mut self.x, &mut self.y, &mut self.z, &mut self.t]
    }

    fn from_fn<F: FnMut(Axis) -> C>(mut f: F) -> TLorentzVector<C> {
        let x = f(Axis::X);
        let y = f(Axis::Y);
        let z = f(Axis::Z);
        let t = f(Axis::T);
        TLorentzVector { x, y, z, t }
    }
}

impl VectorArray for TLorentzVectorArray {
    type Element = TLorentzVector;
}

/// Single four-vector from transverse momentum, pseudorapidity, azimuth and mass.
pub fn PtEtaPhiMassLorentzVector(pt: f64, eta: f64, phi: f64, mass: f64) -> TLorentzVector {
    TLorentzVector::from_ptetaphim(pt, eta, phi, mass)
}

impl<C: Component> TLorentzVector<C> {
    /// # Panics
    /// If the components are columns of different lengths. See [`TLorentzVector::try_new`].
    pub fn new(x: C, y: C, z: C, t: C) -> TLorentzVector<C> {
        assert!(
            x.length() == y.length() && y.length() == z.length() && z.length() == t.length(),
            "Input error: TLorentzVector components must have equal lengths."
        );
        TLorentzVector { x, y, z, t }
    }

    pub fn try_new(x: C, y: C, z: C, t: C) -> Result<TLorentzVector<C>> {
        check_lengths(&[&x, &y, &z, &t])?;
        Ok(TLorentzVector { x, y, z, t })
    }

    /// Build from `(pt, eta, phi, mass)`. The energy is `hypot(pt * cosh(eta), mass)`.
    ///
    /// # Panics
    /// If the inputs are columns of different lengths.
    pub fn from_ptetaphim(pt: C, eta: C, phi: C, mass: C) -> TLorentzVector<C> {
        expect_shape(check_lengths(&[&pt, &eta, &phi, &mass]));
        TLorentzVector {
            x: pt.zip_values(&phi, |pt, phi| pt * phi.cos()),
            y: pt.zip_values(&phi, |pt, phi| pt * phi.sin()),
            z: pt.zip_values(&eta, |pt, eta| pt * eta.sinh()),
            t: pt.zip3_values(&eta, &mass, |pt, eta, m| (pt * eta.cosh()).hypot(m)),
        }
    }

    /// Build from `(pt, eta, phi, energy)`.
    ///
    /// # Panics
    /// If the inputs are columns of different lengths.
    pub fn from_ptetaphie(pt: C, eta: C, phi: C, energy: C) -> TLorentzVector<C> {
        expect_shape(check_lengths(&[&pt, &eta, &phi, &energy]));
        TLorentzVector {
            x: pt.zip_values(&phi, |pt, phi| pt * phi.cos()),
            y: pt.zip_values(&phi, |pt, phi| pt * phi.sin()),
            z: pt.zip_values(&eta, |pt, eta| pt * eta.sinh()),
            t: energy,
        }
    }

    /// Build from a three-momentum and a mass; the energy is `sqrt(p^2 + m^2)`.
    ///
    /// # Panics
    /// If the inputs are columns of different lengths.
    pub fn from_xyzm(x: C, y: C, z: C, mass: C) -> TLorentzVector<C> {
        expect_shape(check_lengths(&[&x, &y, &z, &mass]));
        let p2 = x.zip3_values(&y, &z, |x, y, z| x * x + y * y + z * z);
        let t = p2.zip_values(&mass, |p2, m| (p2 + m * m).sqrt());
        TLorentzVector { x, y, z, t }
    }

    /// # Panics
    /// If `p3` and `t` are columns of different lengths.
    pub fn from_p3(p3: TVector3<C>, t: C) -> TLorentzVector<C> {
        expect_shape(check_same_length(&p3.x, &t));
        TLorentzVector { x: p3.x, y: p3.y, z: p3.z, t }
    }

    /// Spatial part.
    pub fn p3(&self) -> TVector3<C> {
        TVector3 {
            x: self.x.clone(),
            y: self.y.clone(),
            z: self.z.clone(),
        }
    }

    pub fn p2(&self) -> C {
        self.spatial_mag2()
    }

    pub fn p(&self) -> C {
        self.p2().map_values(f64::sqrt)
    }

    pub fn pt2(&self) -> C {
        self.x.zip_values(&self.y, |x, y| x * x + y * y)
    }

    pub fn pt(&self) -> C {
        self.x.zip_values(&self.y, f64::hypot)
    }

    pub fn perp(&self) -> C {
        self.pt()
    }

    pub fn phi(&self) -> C {
        self.y.zip_values(&self.x, f64::atan2)
    }

    pub fn theta(&self) -> C {
        self.pt().zip_values(&self.z, f64::atan2)
    }

    /// Pseudorapidity `asinh(z / pt)`.
    pub fn eta(&self) -> C {
        self.z.zip_values(&self.pt(), |z, pt| (z / pt).asinh())
    }

    /// `0.5 * ln((t + z) / (t - z))`.
    pub fn rapidity(&self) -> C {
        self.t.zip_values(&self.z, |t, z| 0.5 * ((t + z) / (t - z)).ln())
    }

    pub fn energy(&self) -> C {
        self.t.clone()
    }

    pub fn e(&self) -> C {
        self.energy()
    }

    /// Invariant mass; negative for spacelike vectors.
    pub fn mass(&self) -> C {
        self.mag()
    }

    pub fn mass2(&self) -> C {
        self.mag2()
    }

    /// Transverse mass squared, `t^2 - z^2`.
    pub fn mt2(&self) -> C {
        self.t.zip_values(&self.z, |t, z| t * t - z * z)
    }

    pub fn mt(&self) -> C {
        self.mt2().map_values(|m| m.signum() * m.abs().sqrt())
    }

    /// Transverse energy `E * pt / p`.
    pub fn et(&self) -> C {
        self.t.zip3_values(&self.pt(), &self.p(), |e, pt, p| e * pt / p)
    }

    pub fn beta(&self) -> C {
        self.p().zip_values(&self.t, |p, t| p / t)
    }

    pub fn gamma(&self) -> C {
        self.beta().map_values(|b| 1. / (1. - b * b).sqrt())
    }

    /// Velocity of this four-vector's rest frame, `p3 / t`.
    pub fn boostp3(&self) -> TVector3<C> {
        let p3 = self.p3();
        p3.map_components(|c| c.zip_values(&self.t, |p, t| p / t))
    }

    /// Lorentz boost by velocity `b`.
    pub fn boost(&self, b: &TVector3<C>) -> Result<TLorentzVector<C>> {
        let p3 = self.p3();
        let bp = b.dot(&p3)?;
        check_same_length(&b.x, &self.t)?;
        let b2 = b.mag2();
        let gamma = b2.map_values(|b2| 1. / (1. - b2).sqrt());
        let gamma2 = gamma.zip_values(&b2, |g, b2| if b2 > 0. { (g - 1.) / b2 } else { 0. });
        let gamma_t = gamma.zip_values(&self.t, |g, t| g * t);
        let factor = gamma2.zip3_values(&bp, &gamma_t, |g2, bp, gt| g2 * bp + gt);
        Ok(TLorentzVector {
            x: self.x.zip3_values(&b.x, &factor, |x, bx, f| x + bx * f),
            y: self.y.zip3_values(&b.y, &factor, |y, by, f| y + by * f),
            z: self.z.zip3_values(&b.z, &factor, |z, bz, f| z + bz * f),
            t: gamma.zip3_values(&self.t, &bp, |g, t, bp| g * (t + bp)),
        })
    }

    pub fn rotatex(&self, angle: f64) -> TLorentzVector<C> {
        self.rotated(Axis::Y, Axis::Z, angle)
    }

    pub fn rotatey(&self, angle: f64) -> TLorentzVector<C> {
        self.rotated(Axis::Z, Axis::X, angle)
    }

    /// Rotate the spatial part about `axis`; the energy is unchanged.
    pub fn rotate_axis(&self, axis: &TVector3, angle: f64) -> TLorentzVector<C> {
        TLorentzVector::from_p3(self.p3().rotate_axis(axis, angle), self.t.clone())
    }

    pub fn delta_phi(&self, other: &TLorentzVector<C>) -> Result<C> {
        self.check_shape(other)?;
        Ok(wrap_delta_phi(&self.phi(), &other.phi()))
    }

    /// `delta_phi^2 + delta_eta^2`.
    pub fn delta_r2(&self, other: &TLorentzVector<C>) -> Result<C> {
        let dphi = self.delta_phi(other)?;
        Ok(dphi.zip3_values(&self.eta(), &other.eta(), |dphi, a, b| dphi * dphi + (a - b) * (a - b)))
    }

    pub fn delta_r(&self, other: &TLorentzVector<C>) -> Result<C> {
        Ok(self.delta_r2(other)?.map_values(f64::sqrt))
    }
}

impl fmt::Display for TLorentzVector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "TLorentzVector({:.5}, {:.5}, {:.5}, {:.5})", self.x, self.y, self.z, self.t)
    }
}
