//! Serial kernels shared by every backend.
//!
//! [`apply`] is the one loop behind all operations, shapes and element types.
//! Backends reach it whenever nothing faster is registered for a call.

use crate::numerics::{Error, Operands, Operation, Result};
use crate::scalars::Element;

/// Writes `ans[i] = O(x[i], y[i])` for every index, broadcasting scalars.
///
/// Callers have already matched every vector operand against `ans.len()`;
/// this is only re-checked in debug builds. `ans` is written in index order
/// and never read.
///
/// # Errors
///
/// [`Error::Unsupported`] if `T` lacks the operator `O` needs. This is
/// detected before any element is written.
///
/// # Panics
///
/// Integer division by zero panics, like the native `/` operator.
pub fn apply<O: Operation, T: Element>(
    operands: Operands<'_, T>,
    ans: &mut [O::Output<T>],
) -> Result<()> {
    if !O::KIND.supported_by::<T>() {
        tracing::debug!(
            op = %O::KIND,
            ty = core::any::type_name::<T>(),
            "element type lacks the operator"
        );
        return Err(Error::unsupported::<T>(O::KIND));
    }
    debug_assert!(operands.validate(ans.len()).is_ok());

    let op = |x: T, y: T| O::apply(x, y).ok_or_else(|| Error::unsupported::<T>(O::KIND));
    match operands {
        Operands::ScalarVector(x, y) => {
            for (slot, &y) in ans.iter_mut().zip(y) {
                *slot = op(x, y)?;
            }
        }
        Operands::VectorScalar(x, y) => {
            for (slot, &x) in ans.iter_mut().zip(x) {
                *slot = op(x, y)?;
            }
        }
        Operands::VectorVector(x, y) => {
            for ((slot, &x), &y) in ans.iter_mut().zip(x).zip(y) {
                *slot = op(x, y)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerics::{Add, BitAnd, Divide, GreaterThan, LessThan, OpKind, Subtract};

    #[test]
    fn vector_vector() {
        let mut ans = [0_i32; 3];
        apply::<Add, i32>(Operands::VectorVector(&[1, 2, 3], &[10, 20, 30]), &mut ans).unwrap();
        assert_eq!(ans, [11, 22, 33]);
    }

    #[test]
    fn scalar_sides_are_not_commuted() {
        let mut left = [0_i64; 3];
        let mut right = [0_i64; 3];
        apply::<Subtract, i64>(Operands::ScalarVector(10, &[1, 2, 3]), &mut left).unwrap();
        apply::<Subtract, i64>(Operands::VectorScalar(&[1, 2, 3], 10), &mut right).unwrap();
        assert_eq!(left, [9, 8, 7]);
        assert_eq!(right, [-9, -8, -7]);
    }

    #[test]
    fn comparisons_write_booleans() {
        let mut ans = [false; 4];
        apply::<LessThan, f32>(
            Operands::VectorScalar(&[0.5, 1.0, f32::NAN, -3.0], 1.0),
            &mut ans,
        )
        .unwrap();
        assert_eq!(ans, [true, false, false, true]);

        apply::<GreaterThan, u8>(Operands::ScalarVector(5, &[4, 5, 6, 0]), &mut ans).unwrap();
        assert_eq!(ans, [true, false, false, true]);
    }

    #[test]
    fn float_division_follows_ieee() {
        let mut ans = [0.0_f64; 3];
        apply::<Divide, f64>(Operands::VectorScalar(&[1.0, -1.0, 0.0], 0.0), &mut ans).unwrap();
        assert_eq!(ans[0], f64::INFINITY);
        assert_eq!(ans[1], f64::NEG_INFINITY);
        assert!(ans[2].is_nan());
    }

    #[test]
    fn unsupported_is_reported_before_writing() {
        let mut ans = [7.0_f32; 2];
        let result = apply::<BitAnd, f32>(Operands::VectorVector(&[1.0, 2.0], &[3.0, 4.0]), &mut ans);
        assert_eq!(
            result,
            Err(Error::Unsupported {
                op: OpKind::BitAnd,
                type_name: "f32"
            })
        );
        assert_eq!(ans, [7.0, 7.0]);
    }

    #[test]
    fn unsupported_is_reported_for_empty_buffers() {
        let mut ans: [f64; 0] = [];
        assert!(apply::<BitAnd, f64>(Operands::VectorVector(&[], &[]), &mut ans).is_err());
    }
}
