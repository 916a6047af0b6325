use super::*;

/// Cartesian axis of a vector component. Every vector kind stores a prefix of `[X, Y, Z, T]`.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
    /// Time or energy component of a Lorentz vector.
    T,
}

impl Axis {
    /// Position of this axis in a kind's component list.
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
            Axis::T => 3,
        }
    }

    pub fn is_spatial(self) -> bool {
        self != Axis::T
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
            Axis::T => write!(f, "t"),
        }
    }
}

/// Inner product used by `dot` and `mag2`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Metric {
    /// Positive-definite sum of squares, for 2D and 3D vectors.
    EUCLIDEAN,
    /// Signature (-,-,-,+): spatial components enter negatively, time positively.
    MINKOWSKI,
}

impl Metric {
    /// Sign of the squared term for `axis` under this metric.
    pub fn sign(self, axis: Axis) -> f64 {
        match (self, axis) {
            (Metric::EUCLIDEAN, _) => 1.,
            (Metric::MINKOWSKI, Axis::T) => 1.,
            (Metric::MINKOWSKI, _) => -1.,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Metric::EUCLIDEAN => write!(f, "Euclidean metric"),
            Metric::MINKOWSKI => write!(f, "Minkowski metric (-,-,-,+)"),
        }
    }
}

/// Distribution to draw generated event quantities from.
#[derive(Deserialize, Debug, PartialEq, Clone, Copy)]
pub enum Distributions {
    NORMAL { mean: f64, std: f64 },
    UNIFORM { min: f64, max: f64 },
    POINT(f64),
}

impl fmt::Display for Distributions {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Distributions::NORMAL { mean, std } => write!(f, "Normal distribution with mean {} and standard deviation {}", mean, std),
            Distributions::UNIFORM { min, max } => write!(f, "Uniform distribution on [{}, {})", min, max),
            Distributions::POINT(x) => write!(f, "Fixed value {}", x),
        }
    }
}

/// Per-event quantity histogrammed by the analysis binary.
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Quantity {
    /// Invariant mass of the summed four-momentum.
    MASS,
    /// Transverse momentum of the summed four-momentum.
    PT,
    ETA,
    PHI,
    ENERGY,
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Quantity::MASS => write!(f, "invariant mass"),
            Quantity::PT => write!(f, "transverse momentum"),
            Quantity::ETA => write!(f, "pseudorapidity"),
            Quantity::PHI => write!(f, "azimuthal angle"),
            Quantity::ENERGY => write!(f, "energy"),
        }
    }
}

/// Storage class of a one-dimensional histogram, chosen from the width of its bin contents.
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum HistType {
    /// One byte per bin.
    TH1C,
    /// Two bytes per bin.
    TH1S,
    /// Four-byte integers.
    TH1I,
    /// Four-byte floats.
    TH1F,
    /// Eight-byte floats.
    TH1D,
}

impl HistType {
    /// Bytes used to serialize one bin.
    pub fn width(self) -> usize {
        match self {
            HistType::TH1C => 1,
            HistType::TH1S => 2,
            HistType::TH1I => 4,
            HistType::TH1F => 4,
            HistType::TH1D => 8,
        }
    }
}

impl fmt::Display for HistType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            HistType::TH1C => write!(f, "TH1C"),
            HistType::TH1S => write!(f, "TH1S"),
            HistType::TH1I => write!(f, "TH1I"),
            HistType::TH1F => write!(f, "TH1F"),
            HistType::TH1D => write!(f, "TH1D"),
        }
    }
}
