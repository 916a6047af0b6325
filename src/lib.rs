#![allow(non_snake_case)]
#![allow(non_camel_case_types)]

use std::fmt;
use std::sync::Arc;

//Serializing/Deserializing crate
use serde::{Deserialize, Serialize};

//Arrays
use ndarray::{s, Array1, Zip};

//itertools
use itertools::izip;

//Logging
use tracing::{debug, info};

//Math
use std::f64::consts::PI;

#[cfg(feature = "python")]
use pyo3::prelude::*;
#[cfg(feature = "python")]
use pyo3::wrap_pyfunction;

//Load internal modules
pub mod error;
pub mod consts;
pub mod enums;
pub mod component;
pub mod coordinates;
pub mod vector2;
pub mod vector3;
pub mod lorentz;
pub mod array;
pub mod jagged;
pub mod ops;
pub mod histogram;
pub mod input;
pub mod analysis;
pub mod output;

#[cfg(test)]
pub mod tests;

pub use crate::error::VectorError;
pub use crate::consts::*;
pub use crate::enums::*;
pub use crate::component::{check_lengths, check_same_length, Component};
pub use crate::coordinates::{wrap_delta_phi, Coordinates};
pub use crate::vector2::{TVector2, TVector2Array};
pub use crate::vector3::{TVector3, TVector3Array};
pub use crate::lorentz::{PtEtaPhiMassLorentzVector, TLorentzVector, TLorentzVectorArray};
pub use crate::array::{column_max, column_min, resolve_index, Elements, VectorArray};
pub use crate::jagged::{Content, JaggedArray, JaggedOperand};
pub use crate::histogram::{BinContent, Histogram, TableRow};
pub use crate::input::{HistogramParameters, Input, Options, ParticleParameters};
pub use crate::analysis::AnalysisResult;

/// Invariant mass of the summed four-momentum of the given particles.
pub fn invariant_mass(pt: Vec<f64>, eta: Vec<f64>, phi: Vec<f64>, mass: Vec<f64>) -> error::Result<f64> {
    let (pt, eta, phi, mass) = (Array1::from(pt), Array1::from(eta), Array1::from(phi), Array1::from(mass));
    check_lengths(&[&pt, &eta, &phi, &mass])?;
    let particles = TLorentzVectorArray::from_ptetaphim(pt, eta, phi, mass);
    Ok(particles.sum().mass())
}

/// Invariant mass of every event; event `i` holds particles `offsets[i]..offsets[i + 1]`.
pub fn event_masses(offsets: Vec<usize>, pt: Vec<f64>, eta: Vec<f64>, phi: Vec<f64>, mass: Vec<f64>) -> error::Result<Vec<f64>> {
    let (pt, eta, phi, mass) = (Array1::from(pt), Array1::from(eta), Array1::from(phi), Array1::from(mass));
    check_lengths(&[&pt, &eta, &phi, &mass])?;
    let particles = TLorentzVectorArray::from_ptetaphim(pt, eta, phi, mass);
    let events = JaggedArray::from_offsets(offsets, particles)?;
    Ok(events.sum().mass().to_vec())
}

/// Invariant mass of a pair of particles given as `(pt, eta, phi, mass)`.
#[no_mangle]
pub extern "C" fn pair_mass_c(pt1: f64, eta1: f64, phi1: f64, m1: f64, pt2: f64, eta2: f64, phi2: f64, m2: f64) -> f64 {
    (PtEtaPhiMassLorentzVector(pt1, eta1, phi1, m1) + PtEtaPhiMassLorentzVector(pt2, eta2, phi2, m2)).mass()
}

#[cfg(feature = "python")]
#[pymodule]
pub fn pyhepvec(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(invariant_mass_py, m)?)?;
    m.add_function(wrap_pyfunction!(event_masses_py, m)?)?;
    Ok(())
}

#[cfg(feature = "python")]
#[pyfunction]
pub fn invariant_mass_py(pt: Vec<f64>, eta: Vec<f64>, phi: Vec<f64>, mass: Vec<f64>) -> PyResult<f64> {
    invariant_mass(pt, eta, phi, mass).map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
}

#[cfg(feature = "python")]
#[pyfunction]
pub fn event_masses_py(offsets: Vec<usize>, pt: Vec<f64>, eta: Vec<f64>, phi: Vec<f64>, mass: Vec<f64>) -> PyResult<Vec<f64>> {
    event_masses(offsets, pt, eta, phi, mass).map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
}
