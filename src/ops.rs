use super::*;
use crate::error::{expect_shape, Result};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Range, Sub, SubAssign};

/// Operator overloads for one vector kind, its dense array and its ragged content.
///
/// Operators panic with the error message on shape mismatch; the named `try_*`
/// methods on [`Coordinates`] return it instead. `f64 / v` divides componentwise.
macro_rules! impl_vector_operators {
    ($kind:ident, $array:ident) => {
        impl<C: Component> Add for $kind<C> {
            type Output = $kind<C>;

            fn add(self, other: $kind<C>) -> $kind<C> {
                expect_shape(self.try_add(&other))
            }
        }

        impl<'a, C: Component> Add<&'a $kind<C>> for &'a $kind<C> {
            type Output = $kind<C>;

            fn add(self, other: &'a $kind<C>) -> $kind<C> {
                expect_shape(self.try_add(other))
            }
        }

        impl<C: Component> Sub for $kind<C> {
            type Output = $kind<C>;

            fn sub(self, other: $kind<C>) -> $kind<C> {
                expect_shape(self.try_sub(&other))
            }
        }

        impl<'a, C: Component> Sub<&'a $kind<C>> for &'a $kind<C> {
            type Output = $kind<C>;

            fn sub(self, other: &'a $kind<C>) -> $kind<C> {
                expect_shape(self.try_sub(other))
            }
        }

        impl<C: Component> Mul<f64> for $kind<C> {
            type Output = $kind<C>;

            fn mul(self, factor: f64) -> $kind<C> {
                self.scale(factor)
            }
        }

        impl<'a, C: Component> Mul<f64> for &'a $kind<C> {
            type Output = $kind<C>;

            fn mul(self, factor: f64) -> $kind<C> {
                self.scale(factor)
            }
        }

        impl<C: Component> Mul<$kind<C>> for f64 {
            type Output = $kind<C>;

            fn mul(self, vector: $kind<C>) -> $kind<C> {
                vector.scale(self)
            }
        }

        impl<'a, C: Component> Mul<&'a $kind<C>> for f64 {
            type Output = $kind<C>;

            fn mul(self, vector: &'a $kind<C>) -> $kind<C> {
                vector.scale(self)
            }
        }

        impl<C: Component> Div<f64> for $kind<C> {
            type Output = $kind<C>;

            fn div(self, divisor: f64) -> $kind<C> {
                self.divide(divisor)
            }
        }

        impl<'a, C: Component> Div<f64> for &'a $kind<C> {
            type Output = $kind<C>;

            fn div(self, divisor: f64) -> $kind<C> {
                self.divide(divisor)
            }
        }

        impl<C: Component> Div<$kind<C>> for f64 {
            type Output = $kind<C>;

            fn div(self, vector: $kind<C>) -> $kind<C> {
                vector.rdiv(self)
            }
        }

        impl<'a, C: Component> Div<&'a $kind<C>> for f64 {
            type Output = $kind<C>;

            fn div(self, vector: &'a $kind<C>) -> $kind<C> {
                vector.rdiv(self)
            }
        }

        impl<C: Component> Neg for $kind<C> {
            type Output = $kind<C>;

            fn neg(self) -> $kind<C> {
                self.negate()
            }
        }

        impl<'a, C: Component> Neg for &'a $kind<C> {
            type Output = $kind<C>;

            fn neg(self) -> $kind<C> {
                self.negate()
            }
        }

        impl<C: Component> AddAssign for $kind<C> {
            fn add_assign(&mut self, other: $kind<C>) {
                expect_shape(self.add_assign_from(&other))
            }
        }

        impl<'a, C: Component> AddAssign<&'a $kind<C>> for $kind<C> {
            fn add_assign(&mut self, other: &'a $kind<C>) {
                expect_shape(self.add_assign_from(other))
            }
        }

        impl<C: Component> SubAssign for $kind<C> {
            fn sub_assign(&mut self, other: $kind<C>) {
                expect_shape(self.sub_assign_from(&other))
            }
        }

        impl<'a, C: Component> SubAssign<&'a $kind<C>> for $kind<C> {
            fn sub_assign(&mut self, other: &'a $kind<C>) {
                expect_shape(self.sub_assign_from(other))
            }
        }

        impl<C: Component> MulAssign<f64> for $kind<C> {
            fn mul_assign(&mut self, factor: f64) {
                self.scale_assign(factor)
            }
        }

        impl<C: Component> DivAssign<f64> for $kind<C> {
            fn div_assign(&mut self, divisor: f64) {
                self.divide_assign(divisor)
            }
        }

        // A single vector broadcasts against every element of a dense array.
        impl Add<$kind> for $array {
            type Output = $array;

            fn add(self, other: $kind) -> $array {
                let n = VectorArray::len(&self);
                expect_shape(self.try_add(&$array::splat(&other, n)))
            }
        }

        impl<'a> Add<$kind> for &'a $array {
            type Output = $array;

            fn add(self, other: $kind) -> $array {
                expect_shape(self.try_add(&$array::splat(&other, VectorArray::len(self))))
            }
        }

        impl Add<$array> for $kind {
            type Output = $array;

            fn add(self, other: $array) -> $array {
                expect_shape($array::splat(&self, VectorArray::len(&other)).try_add(&other))
            }
        }

        impl Sub<$kind> for $array {
            type Output = $array;

            fn sub(self, other: $kind) -> $array {
                let n = VectorArray::len(&self);
                expect_shape(self.try_sub(&$array::splat(&other, n)))
            }
        }

        impl<'a> Sub<$kind> for &'a $array {
            type Output = $array;

            fn sub(self, other: $kind) -> $array {
                expect_shape(self.try_sub(&$array::splat(&other, VectorArray::len(self))))
            }
        }

        impl Sub<$array> for $kind {
            type Output = $array;

            fn sub(self, other: $array) -> $array {
                expect_shape($array::splat(&self, VectorArray::len(&other)).try_sub(&other))
            }
        }

        impl AddAssign<$kind> for $array {
            fn add_assign(&mut self, other: $kind) {
                let n = VectorArray::len(self);
                expect_shape(self.add_assign_from(&$array::splat(&other, n)))
            }
        }

        impl SubAssign<$kind> for $array {
            fn sub_assign(&mut self, other: $kind) {
                let n = VectorArray::len(self);
                expect_shape(self.sub_assign_from(&$array::splat(&other, n)))
            }
        }

        impl Content for $array {
            type Item = $kind;

            fn content_len(&self) -> usize {
                VectorArray::len(self)
            }

            fn content_slice(&self, range: Range<usize>) -> Result<$array> {
                VectorArray::slice(self, range)
            }

            fn content_take(&self, indices: &[usize]) -> Result<$array> {
                VectorArray::take(self, indices)
            }

            fn items(&self) -> Vec<$kind> {
                self.tolist()
            }
        }

        // A single vector applies to every element regardless of group.
        impl JaggedOperand<$array> for $kind {
            fn align_to(&self, target: &JaggedArray<$array>) -> Result<$array> {
                Ok($array::splat(self, target.content_len()))
            }
        }
    };
}

impl_vector_operators!(TVector2, TVector2Array);
impl_vector_operators!(TVector3, TVector3Array);
impl_vector_operators!(TLorentzVector, TLorentzVectorArray);
