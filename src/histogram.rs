use super::*;
use crate::error::{Result, VectorError};
use itertools::Itertools;

/// Numeric types a histogram can be built from. The storage class follows the
/// narrowest ROOT type that holds every bin.
pub trait BinContent: Copy {
    fn hist_type(content: &[Self]) -> HistType;

    fn to_f64(self) -> f64;
}

fn integers_fit<T: Copy + Into<i64>>(content: &[T], min: i64, max: i64) -> bool {
    content.iter().all(|&v| {
        let v: i64 = v.into();
        min <= v && v <= max
    })
}

impl BinContent for bool {
    fn hist_type(_: &[bool]) -> HistType {
        HistType::TH1C
    }

    fn to_f64(self) -> f64 {
        if self { 1. } else { 0. }
    }
}

impl BinContent for i8 {
    fn hist_type(_: &[i8]) -> HistType {
        HistType::TH1C
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl BinContent for u8 {
    fn hist_type(content: &[u8]) -> HistType {
        if integers_fit(content, 0, i8::MAX as i64) { HistType::TH1C } else { HistType::TH1S }
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl BinContent for i16 {
    fn hist_type(_: &[i16]) -> HistType {
        HistType::TH1S
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl BinContent for u16 {
    fn hist_type(content: &[u16]) -> HistType {
        if integers_fit(content, 0, i16::MAX as i64) { HistType::TH1S } else { HistType::TH1I }
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl BinContent for i32 {
    fn hist_type(_: &[i32]) -> HistType {
        HistType::TH1I
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl BinContent for u32 {
    fn hist_type(content: &[u32]) -> HistType {
        if integers_fit(content, 0, i32::MAX as i64) { HistType::TH1I } else { HistType::TH1D }
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl BinContent for i64 {
    fn hist_type(content: &[i64]) -> HistType {
        if integers_fit(content, i32::MIN as i64, i32::MAX as i64) { HistType::TH1I } else { HistType::TH1D }
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl BinContent for u64 {
    fn hist_type(content: &[u64]) -> HistType {
        if content.iter().all(|&v| v <= i32::MAX as u64) { HistType::TH1I } else { HistType::TH1D }
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl BinContent for f32 {
    fn hist_type(_: &[f32]) -> HistType {
        HistType::TH1F
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl BinContent for f64 {
    fn hist_type(_: &[f64]) -> HistType {
        HistType::TH1D
    }

    fn to_f64(self) -> f64 {
        self
    }
}

/// One row of the tabular form: bin `[left, right)` with its count and, optionally, variance.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct TableRow {
    pub left: f64,
    pub right: f64,
    pub count: f64,
    pub variance: Option<f64>,
}

/// One-dimensional histogram with underflow and overflow slots.
///
/// `allvalues` and `sumw2` hold `numbins + 2` entries: underflow, the bins, overflow.
/// Regular binning is kept as `(low, high, numbins)`; irregular binning also keeps
/// the explicit edges.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Histogram {
    pub title: String,
    pub classname: HistType,
    numbins: usize,
    low: f64,
    high: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    edges: Option<Vec<f64>>,
    allvalues: Vec<f64>,
    sumw2: Vec<f64>,
    pub entries: f64,
    pub tsumw: f64,
    pub tsumw2: f64,
    pub tsumwx: f64,
    pub tsumwx2: f64,
}

fn check_edges(edges: &[f64]) -> Result<()> {
    if edges.len() < 2 {
        return Err(VectorError::InvalidBinning(format!("need at least 2 edges, found {}", edges.len())));
    }
    if let Some(i) = (1..edges.len()).find(|&i| !(edges[i] > edges[i - 1])) {
        return Err(VectorError::InvalidBinning(format!(
            "edges must increase, found {} after {}",
            edges[i],
            edges[i - 1]
        )));
    }
    Ok(())
}

/// `numbins + 1` evenly spaced edges from `low` to `high`, last edge exact.
fn linspace(low: f64, high: f64, numbins: usize) -> Vec<f64> {
    let step = (high - low) / numbins as f64;
    (0..=numbins)
        .map(|i| if i == numbins { high } else { i as f64 * step + low })
        .collect()
}

impl Histogram {
    /// Build from bin contents and `content.len() + 1` increasing edges.
    ///
    /// Edges that exactly match an even spacing are stored as a regular axis.
    pub fn from_numpy<T: BinContent>(content: &[T], edges: &[f64], title: &str) -> Result<Histogram> {
        check_edges(edges)?;
        if content.len() != edges.len() - 1 {
            return Err(VectorError::InvalidBinning(format!(
                "{} bins need {} edges, found {}",
                content.len(),
                content.len() + 1,
                edges.len()
            )));
        }
        let numbins = content.len();
        let (low, high) = (edges[0], edges[numbins]);
        let regular = linspace(low, high, numbins) == edges;

        let values: Vec<f64> = content.iter().map(|&v| v.to_f64()).collect();
        let centers: Vec<f64> = edges.windows(2).map(|w| (w[0] + w[1]) / 2.).collect();
        let total: f64 = values.iter().sum();

        let allvalues: Vec<f64> = std::iter::once(0.).chain(values.iter().copied()).chain(std::iter::once(0.)).collect();
        let sumw2 = allvalues.iter().map(|v| v * v).collect();

        debug!(numbins, regular, "histogram from bin contents");
        Ok(Histogram {
            title: title.to_string(),
            classname: T::hist_type(content),
            numbins,
            low,
            high,
            edges: if regular { None } else { Some(edges.to_vec()) },
            allvalues,
            sumw2,
            entries: total,
            tsumw: total,
            tsumw2: total,
            tsumwx: izip!(&values, &centers).map(|(v, c)| v * c).sum(),
            tsumwx2: izip!(&values, &centers).map(|(v, c)| v * c * c).sum(),
        })
    }

    /// Empty histogram with `numbins` regular bins on `[low, high)`.
    pub fn new(numbins: usize, low: f64, high: f64, title: &str) -> Result<Histogram> {
        if numbins == 0 {
            return Err(VectorError::InvalidBinning("need at least one bin".to_string()));
        }
        let zeros = vec![0_f64; numbins];
        Histogram::from_numpy(&zeros, &linspace(low, high, numbins), title)
    }

    /// Rebuild from table rows. Rows are sorted by left edge, gaps between finite
    /// intervals become empty bins, and infinite edges feed the underflow or overflow.
    pub fn from_table(rows: &[TableRow], title: &str) -> Result<Histogram> {
        let mut rows = rows.to_vec();
        rows.sort_by(|a, b| a.left.total_cmp(&b.left));
        if let Some((a, b)) = rows.iter().tuple_windows().find(|(a, b)| a.right > b.left) {
            debug!(left = b.left, right = a.right, "overlapping table rows");
            return Err(VectorError::InvalidBinning("intervals overlap; cannot form a histogram".to_string()));
        }

        let sparse: Vec<&TableRow> = rows.iter().filter(|r| r.left.is_finite() && r.right.is_finite()).collect();
        if sparse.is_empty() {
            return Err(VectorError::InvalidBinning("no finite intervals".to_string()));
        }
        let contiguous = sparse.iter().tuple_windows().all(|(a, b)| a.right == b.left);
        let edges: Vec<f64> = if contiguous {
            sparse.iter().map(|r| r.left).chain(sparse.last().map(|r| r.right)).collect()
        } else {
            let mut pairs: Vec<f64> = sparse.iter().flat_map(|r| [r.left, r.right]).collect();
            pairs.dedup();
            pairs
        };
        check_edges(&edges)?;

        let has_variance = rows.iter().any(|r| r.variance.is_some());
        let weight2 = |r: &TableRow| if has_variance { r.variance.unwrap_or(0.) } else { r.count };

        let numbins = edges.len() - 1;
        let mut allvalues = vec![0.; numbins + 2];
        let mut sumw2 = vec![0.; numbins + 2];
        for row in rows.iter() {
            let slot = if row.left == f64::NEG_INFINITY {
                0
            } else if row.right == f64::INFINITY {
                numbins + 1
            } else {
                match edges[..numbins].iter().position(|&e| e == row.left) {
                    Some(i) => i + 1,
                    None => continue,
                }
            };
            allvalues[slot] = row.count;
            sumw2[slot] = weight2(row);
        }

        let values = &allvalues[1..=numbins];
        let centers: Vec<f64> = edges.windows(2).map(|w| (w[0] + w[1]) / 2.).collect();
        let total: f64 = values.iter().sum();
        Ok(Histogram {
            title: title.to_string(),
            classname: HistType::TH1D,
            numbins,
            low: edges[0],
            high: edges[numbins],
            tsumwx: izip!(values, &centers).map(|(v, c)| v * c).sum(),
            tsumwx2: izip!(values, &centers).map(|(v, c)| v * c * c).sum(),
            tsumw2: sumw2.iter().sum(),
            entries: total,
            tsumw: total,
            edges: Some(edges),
            allvalues,
            sumw2,
        })
    }

    pub fn numbins(&self) -> usize {
        self.numbins
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    /// Number of slots including underflow and overflow.
    pub fn len(&self) -> usize {
        self.numbins + 2
    }

    pub fn is_regular(&self) -> bool {
        self.edges.is_none()
    }

    /// The `numbins + 1` bin edges.
    pub fn edges(&self) -> Vec<f64> {
        match &self.edges {
            Some(edges) => edges.clone(),
            None => linspace(self.low, self.high, self.numbins),
        }
    }

    pub fn values(&self) -> &[f64] {
        &self.allvalues[1..=self.numbins]
    }

    pub fn allvalues(&self) -> &[f64] {
        &self.allvalues
    }

    pub fn variances(&self) -> &[f64] {
        &self.sumw2[1..=self.numbins]
    }

    pub fn allvariances(&self) -> &[f64] {
        &self.sumw2
    }

    pub fn underflows(&self) -> f64 {
        self.allvalues[0]
    }

    pub fn overflows(&self) -> f64 {
        self.allvalues[self.numbins + 1]
    }

    /// `[left, right)` of slot `index`; slot 0 is the underflow and the last slot the overflow.
    pub fn interval(&self, index: isize) -> Result<(f64, f64)> {
        let i = resolve_index(index, self.len())?;
        Ok(if i == 0 {
            (f64::NEG_INFINITY, self.low)
        } else if i == self.len() - 1 {
            (self.high, f64::INFINITY)
        } else {
            match &self.edges {
                Some(edges) => (edges[i - 1], edges[i]),
                None => {
                    let norm = (self.high - self.low) / self.numbins as f64;
                    ((i - 1) as f64 * norm + self.low, i as f64 * norm + self.low)
                }
            }
        })
    }

    /// Slot that `value` falls in, `None` for NaN.
    pub fn index(&self, value: f64) -> Option<usize> {
        if value.is_nan() {
            None
        } else if value < self.low {
            Some(0)
        } else if value >= self.high {
            Some(self.len() - 1)
        } else {
            match &self.edges {
                Some(edges) => Some(edges.partition_point(|&e| e <= value)),
                None => {
                    let bin = (self.numbins as f64 * (value - self.low) / (self.high - self.low)).floor() as usize;
                    Some(bin.min(self.numbins - 1) + 1)
                }
            }
        }
    }

    /// Add `weight` at `value`. In-range fills also update the running sums; NaN is ignored.
    pub fn fill(&mut self, value: f64, weight: f64) {
        if let Some(i) = self.index(value) {
            self.allvalues[i] += weight;
            self.sumw2[i] += weight * weight;
            self.entries += 1.;
            if (1..=self.numbins).contains(&i) {
                self.tsumw += weight;
                self.tsumw2 += weight * weight;
                self.tsumwx += weight * value;
                self.tsumwx2 += weight * value * value;
            }
        }
    }

    /// Bin values and edges.
    pub fn numpy(&self) -> (Vec<f64>, Vec<f64>) {
        (self.values().to_vec(), self.edges())
    }

    /// Nonzero slots as `[left, right)` rows, optionally with underflow, overflow and variances.
    pub fn to_table(&self, underflow: bool, overflow: bool, variance: bool) -> Vec<TableRow> {
        let edges: Vec<f64> = std::iter::once(f64::NEG_INFINITY)
            .chain(self.edges())
            .chain(std::iter::once(f64::INFINITY))
            .collect();
        let first = if underflow { 0 } else { 1 };
        let last = if overflow { self.numbins + 1 } else { self.numbins };
        (first..=last)
            .filter(|&i| self.allvalues[i] != 0.)
            .map(|i| TableRow {
                left: edges[i],
                right: edges[i + 1],
                count: self.allvalues[i],
                variance: if variance { Some(self.sumw2[i]) } else { None },
            })
            .collect()
    }

    /// Big-endian bin values, underflow and overflow included, at the width of `classname`.
    pub fn to_be_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.len() * self.classname.width());
        for &v in self.allvalues.iter() {
            match self.classname {
                HistType::TH1C => bytes.extend_from_slice(&(v as i8).to_be_bytes()),
                HistType::TH1S => bytes.extend_from_slice(&(v as i16).to_be_bytes()),
                HistType::TH1I => bytes.extend_from_slice(&(v as i32).to_be_bytes()),
                HistType::TH1F => bytes.extend_from_slice(&(v as f32).to_be_bytes()),
                HistType::TH1D => bytes.extend_from_slice(&v.to_be_bytes()),
            }
        }
        bytes
    }

    /// Text rendering with one row per slot, `width` characters wide.
    pub fn show(&self, width: usize) -> String {
        let smallest = column_min(&Array1::from(self.allvalues.clone())).unwrap_or(0.);
        let largest = column_max(&Array1::from(self.allvalues.clone())).unwrap_or(0.);
        let mut minimum = if smallest < 0. { smallest * SHOW_HEADROOM } else { 0. };
        let mut maximum = largest * SHOW_HEADROOM;
        if maximum <= minimum {
            let average = (minimum + maximum) / 2.;
            minimum = average - 0.5;
            maximum = average + 0.5;
        }

        let mut intervals: Vec<String> = (0..self.len())
            .map(|i| {
                let (left, right) = self.interval(i as isize).unwrap_or((f64::NAN, f64::NAN));
                format!("[{}, {})", format_g(left), format_g(right))
            })
            .collect();
        if let Some(last) = intervals.last_mut() {
            last.pop();
            last.push(']');
        }
        let intervals_width = intervals.iter().map(|s| s.len()).max().unwrap_or(0);

        let values: Vec<String> = self.allvalues.iter().map(|&v| format_g(v)).collect();
        let values_width = values.iter().map(|s| s.len()).max().unwrap_or(0);

        let minimum_text = format_g(minimum);
        let maximum_text = format_g(maximum);
        let plot_width = (minimum_text.len() + maximum_text.len())
            .max(width.saturating_sub(intervals_width + 1 + values_width + 1 + 2));
        let scale = format!(
            "{}{}{}",
            minimum_text,
            " ".repeat(plot_width + 2 - minimum_text.len() - maximum_text.len()),
            maximum_text
        );

        let norm = plot_width as f64 / (maximum - minimum);
        let zero = ((0. - minimum) * norm).round() as isize;
        let zero_visible = minimum != 0. && 0 <= zero && zero < plot_width as isize;

        let mut line = vec!['-'; plot_width];
        if zero_visible {
            line[zero as usize] = '+';
        }
        let capstone = format!(
            "{}+{}+",
            " ".repeat(intervals_width + 1 + values_width + 1),
            line.iter().collect::<String>()
        );

        let mut out = vec![format!("{}{}", " ".repeat(intervals_width + values_width + 2), scale), capstone.clone()];
        for (interval, text, &x) in izip!(&intervals, &values, &self.allvalues) {
            line.iter_mut().for_each(|c| *c = ' ');
            let pos = ((x - minimum) * norm).round() as isize;
            if x < 0. {
                mark(&mut line, pos, zero);
            } else {
                mark(&mut line, zero, pos);
            }
            if zero_visible {
                line[zero as usize] = '|';
            }
            out.push(format!(
                "{:<iw$} {:<vw$} |{}|",
                interval,
                text,
                line.iter().collect::<String>(),
                iw = intervals_width,
                vw = values_width
            ));
        }
        out.push(capstone);
        out.join("\n")
    }
}

impl fmt::Display for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.show(DEFAULT_SHOW_WIDTH))
    }
}

/// Fill `line[from..to]` with `*`, clamped to the line.
fn mark(line: &mut [char], from: isize, to: isize) {
    let len = line.len() as isize;
    let (from, to) = (from.clamp(0, len) as usize, to.clamp(0, len) as usize);
    if from < to {
        line[from..to].iter_mut().for_each(|c| *c = '*');
    }
}

/// General-format number with five significant digits, trailing zeros removed.
fn format_g(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0. { "inf".to_string() } else { "-inf".to_string() };
    }
    if value == 0. {
        return "0".to_string();
    }
    let scientific = format!("{:.4e}", value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m.to_string(), e.parse::<i32>().unwrap_or(0)),
        None => (scientific.clone(), 0),
    };
    if exponent < -4 || exponent >= 5 {
        format!(
            "{}e{}{:02}",
            trim_zeros(&mantissa),
            if exponent < 0 { '-' } else { '+' },
            exponent.abs()
        )
    } else {
        let decimals = (4 - exponent).max(0) as usize;
        trim_zeros(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_zeros(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}
