use super::*;
use crate::error::{Result, VectorError};
use std::ops::Range;

/// Dense, columnar array of vectors: one `Array1<f64>` per component, all of one length.
///
/// Every [`Coordinates`] operation already works elementwise on these columns; this
/// trait adds what only makes sense for a collection: indexing to a single
/// [`VectorArray::Element`], slicing, gathering and reductions.
pub trait VectorArray: Coordinates<Component = Array1<f64>> {
    /// The single-vector kind stored at each position.
    type Element: Coordinates<Component = f64>;

    fn len(&self) -> usize {
        self.length().unwrap_or(0)
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Vector at `index`; negative indices count from the end.
    fn get(&self, index: isize) -> Result<Self::Element> {
        let position = resolve_index(index, self.len())?;
        Ok(element_at(self, position))
    }

    fn iter(&self) -> Elements<'_, Self> {
        Elements { array: self, position: 0 }
    }

    fn tolist(&self) -> Vec<Self::Element> {
        self.iter().collect()
    }

    /// Contiguous sub-array `range.start..range.end`.
    fn slice(&self, range: Range<usize>) -> Result<Self> {
        let len = self.len();
        if range.start > range.end || range.end > len {
            return Err(VectorError::IndexOutOfBounds { index: range.end as isize, len });
        }
        let components = self.components();
        Ok(Self::from_fn(|axis| components[axis.index()].slice(s![range.start..range.end]).to_owned()))
    }

    /// Gather the vectors at `indices`, in order, repeats allowed.
    fn take(&self, indices: &[usize]) -> Result<Self> {
        let len = self.len();
        if let Some(&bad) = indices.iter().find(|&&i| i >= len) {
            return Err(VectorError::IndexOutOfBounds { index: bad as isize, len });
        }
        let components = self.components();
        Ok(Self::from_fn(|axis| components[axis.index()].select(ndarray::Axis(0), indices)))
    }

    /// `n` copies of `element`.
    fn splat(element: &Self::Element, n: usize) -> Self {
        let components = element.components();
        Self::from_fn(|axis| Array1::from_elem(n, *components[axis.index()]))
    }

    fn from_elements(elements: &[Self::Element]) -> Self {
        Self::from_fn(|axis| elements.iter().map(|e| *e.components()[axis.index()]).collect())
    }

    fn concat(&self, other: &Self) -> Self {
        let (lhs, rhs) = (self.components(), other.components());
        Self::from_fn(|axis| lhs[axis.index()].iter().chain(rhs[axis.index()].iter()).copied().collect())
    }

    /// Componentwise sum over all vectors.
    fn sum(&self) -> Self::Element {
        let components = self.components();
        Self::Element::from_fn(|axis| components[axis.index()].sum())
    }
}

fn element_at<A: VectorArray>(array: &A, position: usize) -> A::Element {
    let components = array.components();
    A::Element::from_fn(|axis| components[axis.index()][position])
}

/// Iterator over the vectors of a [`VectorArray`].
pub struct Elements<'a, A: VectorArray> {
    array: &'a A,
    position: usize,
}

impl<'a, A: VectorArray> Iterator for Elements<'a, A> {
    type Item = A::Element;

    fn next(&mut self) -> Option<A::Element> {
        if self.position >= self.array.len() {
            return None;
        }
        let element = element_at(self.array, self.position);
        self.position += 1;
        Some(element)
    }
}

/// Resolve a possibly negative index against `len`.
pub fn resolve_index(index: isize, len: usize) -> Result<usize> {
    let resolved = if index < 0 { index + len as isize } else { index };
    if resolved < 0 || resolved as usize >= len {
        debug!(index, len, "index out of bounds");
        return Err(VectorError::IndexOutOfBounds { index, len });
    }
    Ok(resolved as usize)
}

/// Smallest value of a column, `None` when empty. NaN entries are skipped.
pub fn column_min(column: &Array1<f64>) -> Option<f64> {
    if column.is_empty() {
        None
    } else {
        Some(column.fold(f64::INFINITY, |m, &v| m.min(v)))
    }
}

pub fn column_max(column: &Array1<f64>) -> Option<f64> {
    if column.is_empty() {
        None
    } else {
        Some(column.fold(f64::NEG_INFINITY, |m, &v| m.max(v)))
    }
}
