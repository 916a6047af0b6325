use super::*;
use crate::error::{expect_shape, Result, VectorError};
use itertools::Itertools;
use std::ops::{Add, Div, Mul, Neg, Range, Sub};

/// Flat storage a [`JaggedArray`] can partition into groups.
pub trait Content: Clone {
    /// What one position of the content holds.
    type Item: Clone;

    fn content_len(&self) -> usize;

    fn content_slice(&self, range: Range<usize>) -> Result<Self>;

    fn content_take(&self, indices: &[usize]) -> Result<Self>;

    fn items(&self) -> Vec<Self::Item>;
}

impl<A: Clone> Content for Array1<A> {
    type Item = A;

    fn content_len(&self) -> usize {
        self.len()
    }

    fn content_slice(&self, range: Range<usize>) -> Result<Array1<A>> {
        check_range(&range, self.len())?;
        Ok(self.slice(s![range.start..range.end]).to_owned())
    }

    fn content_take(&self, indices: &[usize]) -> Result<Array1<A>> {
        if let Some(&bad) = indices.iter().find(|&&i| i >= self.len()) {
            return Err(VectorError::IndexOutOfBounds { index: bad as isize, len: self.len() });
        }
        Ok(self.select(ndarray::Axis(0), indices))
    }

    fn items(&self) -> Vec<A> {
        self.to_vec()
    }
}

fn check_range(range: &Range<usize>, len: usize) -> Result<()> {
    if range.start > range.end || range.end > len {
        return Err(VectorError::IndexOutOfBounds { index: range.end as isize, len });
    }
    Ok(())
}

/// Flat content partitioned into consecutive, possibly empty, groups.
///
/// Group `i` covers `content[offsets[i]..offsets[i + 1]]`. Offsets are shared through
/// an `Arc` by every array derived from this one, so elementwise operations only
/// allocate new content.
#[derive(Debug, Clone, PartialEq)]
pub struct JaggedArray<V> {
    offsets: Arc<[usize]>,
    content: V,
}

impl<V: Content> JaggedArray<V> {
    /// Offsets must start at 0, never decrease, and end at the content length.
    pub fn from_offsets(offsets: impl Into<Arc<[usize]>>, content: V) -> Result<JaggedArray<V>> {
        let offsets: Arc<[usize]> = offsets.into();
        match offsets.first() {
            None => return Err(VectorError::InvalidOffsets("offsets must not be empty".to_string())),
            Some(&first) if first != 0 => {
                return Err(VectorError::InvalidOffsets(format!("offsets must start at 0, found {}", first)))
            }
            _ => (),
        }
        if let Some((i, (a, b))) = offsets.iter().tuple_windows().find_position(|(a, b)| b < a) {
            return Err(VectorError::InvalidOffsets(format!(
                "offsets decrease from {} to {} at position {}",
                a,
                b,
                i + 1
            )));
        }
        let last = offsets[offsets.len() - 1];
        if last != content.content_len() {
            return Err(VectorError::InvalidOffsets(format!(
                "last offset {} does not match content length {}",
                last,
                content.content_len()
            )));
        }
        Ok(JaggedArray { offsets, content })
    }

    pub fn from_counts(counts: &[usize], content: V) -> Result<JaggedArray<V>> {
        let offsets: Vec<usize> = std::iter::once(0)
            .chain(counts.iter().scan(0, |total, &count| {
                *total += count;
                Some(*total)
            }))
            .collect();
        JaggedArray::from_offsets(offsets, content)
    }

    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    pub fn num_groups(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Total number of elements across all groups.
    pub fn content_len(&self) -> usize {
        self.content.content_len()
    }

    pub fn is_empty(&self) -> bool {
        self.num_groups() == 0
    }

    pub fn counts(&self) -> Vec<usize> {
        self.offsets.iter().tuple_windows().map(|(start, stop)| stop - start).collect()
    }

    /// Group index of every element of the flat content.
    pub fn parents(&self) -> Vec<usize> {
        self.counts()
            .into_iter()
            .enumerate()
            .flat_map(|(group, count)| std::iter::repeat(group).take(count))
            .collect()
    }

    pub fn content(&self) -> &V {
        &self.content
    }

    /// The flat content with grouping discarded.
    pub fn flatten(&self) -> V {
        self.content.clone()
    }

    pub fn into_content(self) -> V {
        self.content
    }

    /// Contents of one group; negative indices count from the end.
    pub fn group(&self, index: isize) -> Result<V> {
        let g = resolve_index(index, self.num_groups())?;
        self.content.content_slice(self.offsets[g]..self.offsets[g + 1])
    }

    /// Groups `range.start..range.end` as a new ragged array with rebased offsets.
    pub fn slice_groups(&self, range: Range<usize>) -> Result<JaggedArray<V>> {
        check_range(&range, self.num_groups())?;
        let base = self.offsets[range.start];
        let offsets: Vec<usize> = self.offsets[range.start..=range.end].iter().map(|o| o - base).collect();
        let content = self.content.content_slice(base..self.offsets[range.end])?;
        Ok(JaggedArray { offsets: offsets.into(), content })
    }

    pub fn tolist(&self) -> Vec<Vec<V::Item>> {
        let items = self.content.items();
        self.offsets
            .iter()
            .tuple_windows()
            .map(|(&start, &stop)| items[start..stop].to_vec())
            .collect()
    }

    /// Apply an operation to the flat content and keep this grouping.
    ///
    /// The operation must return one output per input element.
    pub fn apply<W: Content, F: FnOnce(&V) -> W>(&self, f: F) -> Result<JaggedArray<W>> {
        self.with_content(f(&self.content))
    }

    /// Same grouping over new content of equal flat length.
    pub fn with_content<W: Content>(&self, content: W) -> Result<JaggedArray<W>> {
        if content.content_len() != self.content_len() {
            return Err(VectorError::ShapeMismatch {
                expected: self.content_len(),
                found: content.content_len(),
            });
        }
        Ok(self.regroup(content))
    }

    fn regroup<W>(&self, content: W) -> JaggedArray<W> {
        JaggedArray { offsets: Arc::clone(&self.offsets), content }
    }

    /// Fails unless `other` has exactly this grouping.
    pub fn check_counts<W: Content>(&self, other: &JaggedArray<W>) -> Result<()> {
        if self.num_groups() != other.num_groups() {
            return Err(VectorError::ShapeMismatch {
                expected: self.num_groups(),
                found: other.num_groups(),
            });
        }
        match self.counts().into_iter().zip(other.counts()).find(|(a, b)| a != b) {
            Some((expected, found)) => Err(VectorError::ShapeMismatch { expected, found }),
            None => Ok(()),
        }
    }
}

/// Anything that can be lined up element-for-element with a ragged array of `V`.
pub trait JaggedOperand<V> {
    fn align_to(&self, target: &JaggedArray<V>) -> Result<V>;
}

impl<V: VectorArray + Content> JaggedOperand<V> for JaggedArray<V> {
    fn align_to(&self, target: &JaggedArray<V>) -> Result<V> {
        target.check_counts(self)?;
        Ok(self.content.clone())
    }
}

/// A dense array is applied one vector per group when its length equals the
/// number of groups, otherwise positionally when it equals the flat length.
/// When both lengths match, one vector per group wins, even if some groups are empty.
impl<V: VectorArray + Content> JaggedOperand<V> for V {
    fn align_to(&self, target: &JaggedArray<V>) -> Result<V> {
        let len = VectorArray::len(self);
        if len == target.num_groups() {
            debug!(groups = len, "broadcasting one vector per group");
            self.take(&target.parents())
        } else if len == target.content_len() {
            debug!(elements = len, "applying dense operand positionally");
            Ok(self.clone())
        } else {
            debug!(groups = target.num_groups(), elements = target.content_len(), found = len, "dense operand fits neither");
            Err(VectorError::ShapeMismatch { expected: target.num_groups(), found: len })
        }
    }
}

impl<V: VectorArray + Content> JaggedArray<V> {
    pub fn try_add<O: JaggedOperand<V>>(&self, other: &O) -> Result<JaggedArray<V>> {
        let aligned = other.align_to(self)?;
        Ok(self.regroup(self.content.try_add(&aligned)?))
    }

    pub fn try_sub<O: JaggedOperand<V>>(&self, other: &O) -> Result<JaggedArray<V>> {
        let aligned = other.align_to(self)?;
        Ok(self.regroup(self.content.try_sub(&aligned)?))
    }

    pub fn scale(&self, factor: f64) -> JaggedArray<V> {
        self.regroup(self.content.scale(factor))
    }

    pub fn divide(&self, divisor: f64) -> JaggedArray<V> {
        self.regroup(self.content.divide(divisor))
    }

    /// Componentwise `numerator / v`, as for the dense and single kinds.
    pub fn rdiv(&self, numerator: f64) -> JaggedArray<V> {
        self.regroup(self.content.rdiv(numerator))
    }

    pub fn negate(&self) -> JaggedArray<V> {
        self.regroup(self.content.negate())
    }

    pub fn eq_mask<O: JaggedOperand<V>>(&self, other: &O) -> Result<JaggedArray<Array1<bool>>> {
        let aligned = other.align_to(self)?;
        Ok(self.regroup(self.content.eq_mask(&aligned)?))
    }

    pub fn dot<O: JaggedOperand<V>>(&self, other: &O) -> Result<JaggedArray<Array1<f64>>> {
        let aligned = other.align_to(self)?;
        Ok(self.regroup(self.content.dot(&aligned)?))
    }

    pub fn angle<O: JaggedOperand<V>>(&self, other: &O) -> Result<JaggedArray<Array1<f64>>> {
        let aligned = other.align_to(self)?;
        Ok(self.regroup(self.content.angle(&aligned)?))
    }

    pub fn cross<O: JaggedOperand<V>>(&self, other: &O) -> Result<JaggedArray<TVector3Array>> {
        let aligned = other.align_to(self)?;
        Ok(self.regroup(self.content.cross(&aligned)?))
    }

    pub fn mag2(&self) -> JaggedArray<Array1<f64>> {
        self.regroup(self.content.mag2())
    }

    pub fn mag(&self) -> JaggedArray<Array1<f64>> {
        self.regroup(self.content.mag())
    }

    pub fn abs(&self) -> JaggedArray<Array1<f64>> {
        self.regroup(self.content.abs())
    }

    pub fn pow(&self, exponent: f64) -> JaggedArray<Array1<f64>> {
        self.regroup(self.content.pow(exponent))
    }

    pub fn unit(&self) -> JaggedArray<V> {
        self.regroup(self.content.unit())
    }

    pub fn rotatez(&self, angle: f64) -> JaggedArray<V> {
        self.regroup(self.content.rotatez(angle))
    }

    /// One component as a ragged numeric array, `None` if the kind lacks `axis`.
    pub fn component(&self, axis: Axis) -> Option<JaggedArray<Array1<f64>>> {
        self.content.component(axis).map(|c| self.regroup(c.clone()))
    }

    pub fn x(&self) -> JaggedArray<Array1<f64>> {
        self.regroup(self.content.components()[Axis::X.index()].clone())
    }

    pub fn y(&self) -> JaggedArray<Array1<f64>> {
        self.regroup(self.content.components()[Axis::Y.index()].clone())
    }

    /// Vector sum of each group; empty groups sum to the zero vector.
    pub fn sum(&self) -> V {
        let components = self.content.components();
        let offsets = &self.offsets;
        V::from_fn(|axis| {
            offsets
                .iter()
                .tuple_windows()
                .map(|(&start, &stop)| components[axis.index()].slice(s![start..stop]).sum())
                .collect()
        })
    }
}

impl JaggedArray<TVector2Array> {
    pub fn phi(&self) -> JaggedArray<Array1<f64>> {
        self.regroup(self.content.phi())
    }

    pub fn rho(&self) -> JaggedArray<Array1<f64>> {
        self.regroup(self.content.rho())
    }

    pub fn rotate(&self, angle: f64) -> JaggedArray<TVector2Array> {
        self.regroup(self.content.rotate(angle))
    }

    pub fn delta_phi<O: JaggedOperand<TVector2Array>>(&self, other: &O) -> Result<JaggedArray<Array1<f64>>> {
        let aligned = other.align_to(self)?;
        Ok(self.regroup(self.content.delta_phi(&aligned)?))
    }
}

impl JaggedArray<TVector3Array> {
    pub fn z(&self) -> JaggedArray<Array1<f64>> {
        self.regroup(self.content.z.clone())
    }

    pub fn rho(&self) -> JaggedArray<Array1<f64>> {
        self.regroup(self.content.rho())
    }

    pub fn phi(&self) -> JaggedArray<Array1<f64>> {
        self.regroup(self.content.phi())
    }

    pub fn theta(&self) -> JaggedArray<Array1<f64>> {
        self.regroup(self.content.theta())
    }

    pub fn eta(&self) -> JaggedArray<Array1<f64>> {
        self.regroup(self.content.eta())
    }

    pub fn rotatex(&self, angle: f64) -> JaggedArray<TVector3Array> {
        self.regroup(self.content.rotatex(angle))
    }

    pub fn rotatey(&self, angle: f64) -> JaggedArray<TVector3Array> {
        self.regroup(self.content.rotatey(angle))
    }

    pub fn rotate_axis(&self, axis: &TVector3, angle: f64) -> JaggedArray<TVector3Array> {
        self.regroup(self.content.rotate_axis(axis, angle))
    }

    pub fn delta_phi<O: JaggedOperand<TVector3Array>>(&self, other: &O) -> Result<JaggedArray<Array1<f64>>> {
        let aligned = other.align_to(self)?;
        Ok(self.regroup(self.content.delta_phi(&aligned)?))
    }
}

impl JaggedArray<TLorentzVectorArray> {
    pub fn z(&self) -> JaggedArray<Array1<f64>> {
        self.regroup(self.content.z.clone())
    }

    pub fn t(&self) -> JaggedArray<Array1<f64>> {
        self.regroup(self.content.t.clone())
    }

    /// Spatial parts, same grouping.
    pub fn p3(&self) -> JaggedArray<TVector3Array> {
        self.regroup(self.content.p3())
    }

    pub fn p(&self) -> JaggedArray<Array1<f64>> {
        self.regroup(self.content.p())
    }

    pub fn p2(&self) -> JaggedArray<Array1<f64>> {
        self.regroup(self.content.p2())
    }

    pub fn mass(&self) -> JaggedArray<Array1<f64>> {
        self.regroup(self.content.mass())
    }

    pub fn mass2(&self) -> JaggedArray<Array1<f64>> {
        self.regroup(self.content.mass2())
    }

    pub fn pt(&self) -> JaggedArray<Array1<f64>> {
        self.regroup(self.content.pt())
    }

    pub fn eta(&self) -> JaggedArray<Array1<f64>> {
        self.regroup(self.content.eta())
    }

    pub fn phi(&self) -> JaggedArray<Array1<f64>> {
        self.regroup(self.content.phi())
    }

    pub fn theta(&self) -> JaggedArray<Array1<f64>> {
        self.regroup(self.content.theta())
    }

    pub fn rapidity(&self) -> JaggedArray<Array1<f64>> {
        self.regroup(self.content.rapidity())
    }

    pub fn energy(&self) -> JaggedArray<Array1<f64>> {
        self.regroup(self.content.energy())
    }

    pub fn mt(&self) -> JaggedArray<Array1<f64>> {
        self.regroup(self.content.mt())
    }

    pub fn et(&self) -> JaggedArray<Array1<f64>> {
        self.regroup(self.content.et())
    }

    pub fn beta(&self) -> JaggedArray<Array1<f64>> {
        self.regroup(self.content.beta())
    }

    pub fn gamma(&self) -> JaggedArray<Array1<f64>> {
        self.regroup(self.content.gamma())
    }

    pub fn boostp3(&self) -> JaggedArray<TVector3Array> {
        self.regroup(self.content.boostp3())
    }

    /// Boost by a velocity broadcast like any other operand: one for all, one per
    /// group, one per element, or a ragged array of matching counts.
    pub fn boost<O: JaggedOperand<TVector3Array>>(&self, velocity: &O) -> Result<JaggedArray<TLorentzVectorArray>> {
        let velocity = velocity.align_to(&self.p3())?;
        Ok(self.regroup(self.content.boost(&velocity)?))
    }

    pub fn rotatex(&self, angle: f64) -> JaggedArray<TLorentzVectorArray> {
        self.regroup(self.content.rotatex(angle))
    }

    pub fn rotatey(&self, angle: f64) -> JaggedArray<TLorentzVectorArray> {
        self.regroup(self.content.rotatey(angle))
    }

    pub fn rotate_axis(&self, axis: &TVector3, angle: f64) -> JaggedArray<TLorentzVectorArray> {
        self.regroup(self.content.rotate_axis(axis, angle))
    }

    pub fn delta_phi<O: JaggedOperand<TLorentzVectorArray>>(&self, other: &O) -> Result<JaggedArray<Array1<f64>>> {
        let aligned = other.align_to(self)?;
        Ok(self.regroup(self.content.delta_phi(&aligned)?))
    }

    pub fn delta_r2<O: JaggedOperand<TLorentzVectorArray>>(&self, other: &O) -> Result<JaggedArray<Array1<f64>>> {
        let aligned = other.align_to(self)?;
        Ok(self.regroup(self.content.delta_r2(&aligned)?))
    }

    pub fn delta_r<O: JaggedOperand<TLorentzVectorArray>>(&self, other: &O) -> Result<JaggedArray<Array1<f64>>> {
        let aligned = other.align_to(self)?;
        Ok(self.regroup(self.content.delta_r(&aligned)?))
    }
}

impl<V: VectorArray + Content, O: JaggedOperand<V>> Add<O> for JaggedArray<V> {
    type Output = JaggedArray<V>;

    fn add(self, other: O) -> JaggedArray<V> {
        expect_shape(self.try_add(&other))
    }
}

impl<'a, V: VectorArray + Content, O: JaggedOperand<V>> Add<&'a O> for &'a JaggedArray<V> {
    type Output = JaggedArray<V>;

    fn add(self, other: &'a O) -> JaggedArray<V> {
        expect_shape(self.try_add(other))
    }
}

impl<V: VectorArray + Content, O: JaggedOperand<V>> Sub<O> for JaggedArray<V> {
    type Output = JaggedArray<V>;

    fn sub(self, other: O) -> JaggedArray<V> {
        expect_shape(self.try_sub(&other))
    }
}

impl<'a, V: VectorArray + Content, O: JaggedOperand<V>> Sub<&'a O> for &'a JaggedArray<V> {
    type Output = JaggedArray<V>;

    fn sub(self, other: &'a O) -> JaggedArray<V> {
        expect_shape(self.try_sub(other))
    }
}

impl<V: VectorArray + Content> Mul<f64> for JaggedArray<V> {
    type Output = JaggedArray<V>;

    fn mul(self, factor: f64) -> JaggedArray<V> {
        self.scale(factor)
    }
}

impl<V: VectorArray + Content> Mul<JaggedArray<V>> for f64 {
    type Output = JaggedArray<V>;

    fn mul(self, array: JaggedArray<V>) -> JaggedArray<V> {
        array.scale(self)
    }
}

impl<V: VectorArray + Content> Div<f64> for JaggedArray<V> {
    type Output = JaggedArray<V>;

    fn div(self, divisor: f64) -> JaggedArray<V> {
        self.divide(divisor)
    }
}

/// Componentwise reflected division, not the inverse vector.
impl<V: VectorArray + Content> Div<JaggedArray<V>> for f64 {
    type Output = JaggedArray<V>;

    fn div(self, array: JaggedArray<V>) -> JaggedArray<V> {
        array.rdiv(self)
    }
}

impl<V: VectorArray + Content> Neg for JaggedArray<V> {
    type Output = JaggedArray<V>;

    fn neg(self) -> JaggedArray<V> {
        self.negate()
    }
}
