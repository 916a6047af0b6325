use super::*;

//Angular constants
/// 2 pi, the period of azimuthal angles.
pub const TWO_PI: f64 = 2. * PI;

//Output defaults
/// Width, in characters, of the ASCII histogram rendering.
pub const DEFAULT_SHOW_WIDTH: usize = 80;
/// Headroom added above the tallest bin when rendering a histogram.
pub const SHOW_HEADROOM: f64 = 1.05;
/// Buffer size for histogram output files.
pub const WRITE_BUFFER_SIZE: usize = 8000;
