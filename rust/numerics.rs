//! Operation kinds, operand shapes and errors.
//!
//! This module provides:
//!
//! - **Operation kinds**: [`OpKind`], the closed set of twelve element-wise operations
//! - **Operation tags**: [`Add`], [`Subtract`], [`Multiply`], [`Divide`],
//!   [`BitAnd`], [`BitOr`], [`BitXor`], [`Equals`], [`LessThan`],
//!   [`LessOrEqual`], [`GreaterThan`], [`GreaterOrEqual`]
//! - **Operand shapes**: [`Operands`], one of scalar⊗vector, vector⊗scalar or vector⊗vector,
//!   and its value-free [`Shape`]
//! - **Errors**: [`Error`] and the crate [`Result`]
//!
//! Arithmetic and bitwise tags write `T` into the answer, comparison tags
//! write `bool`.

use core::any::type_name;
use core::fmt;

use crate::scalars::{reinterpret, reinterpret_value, Element};

// region: Operation Kinds

/// One of the twelve element-wise operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OpKind {
    Add,
    Subtract,
    Multiply,
    Divide,
    BitAnd,
    BitOr,
    BitXor,
    Equals,
    LessThan,
    LessOrEqual,
    GreaterThan,
    GreaterOrEqual,
}

impl OpKind {
    pub const COUNT: usize = 12;

    pub const ALL: [OpKind; OpKind::COUNT] = [
        OpKind::Add,
        OpKind::Subtract,
        OpKind::Multiply,
        OpKind::Divide,
        OpKind::BitAnd,
        OpKind::BitOr,
        OpKind::BitXor,
        OpKind::Equals,
        OpKind::LessThan,
        OpKind::LessOrEqual,
        OpKind::GreaterThan,
        OpKind::GreaterOrEqual,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            OpKind::Add => "add",
            OpKind::Subtract => "subtract",
            OpKind::Multiply => "multiply",
            OpKind::Divide => "divide",
            OpKind::BitAnd => "bitwise-and",
            OpKind::BitOr => "bitwise-or",
            OpKind::BitXor => "bitwise-xor",
            OpKind::Equals => "equals",
            OpKind::LessThan => "less-than",
            OpKind::LessOrEqual => "less-or-equal",
            OpKind::GreaterThan => "greater-than",
            OpKind::GreaterOrEqual => "greater-or-equal",
        }
    }

    pub const fn is_arithmetic(self) -> bool {
        matches!(
            self,
            OpKind::Add | OpKind::Subtract | OpKind::Multiply | OpKind::Divide
        )
    }

    pub const fn is_bitwise(self) -> bool {
        matches!(self, OpKind::BitAnd | OpKind::BitOr | OpKind::BitXor)
    }

    pub const fn is_comparison(self) -> bool {
        !self.is_arithmetic() && !self.is_bitwise()
    }

    /// Whether `T` implements the operator family this kind needs.
    #[inline(always)]
    pub fn supported_by<T: Element>(self) -> bool {
        if self.is_arithmetic() {
            T::ARITHMETIC
        } else if self.is_bitwise() {
            T::BITWISE
        } else {
            true
        }
    }

    #[inline(always)]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// endregion: Operation Kinds

// region: Operation Tags

/// A zero-sized tag selecting one [`OpKind`] at compile time.
///
/// Kernels are generic over the tag, so every `(operation, type)` pair is
/// monomorphized into its own loop and the per-element call inlines.
pub trait Operation: Copy + Default + fmt::Debug + Send + Sync + 'static {
    const KIND: OpKind;

    /// Element type written into the answer: `T` for arithmetic and bitwise
    /// operations, `bool` for comparisons.
    type Output<T: Element>: Copy + Default + PartialEq + fmt::Debug + Send + Sync + 'static;

    /// Applies the operation to one pair of elements, or `None` if `T` lacks
    /// the operator.
    fn apply<T: Element>(x: T, y: T) -> Option<Self::Output<T>>;
}

macro_rules! value_operations {
    ($($(#[$meta:meta])* $name:ident => $method:ident;)*) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
            pub struct $name;

            impl Operation for $name {
                const KIND: OpKind = OpKind::$name;
                type Output<T: Element> = T;

                #[inline(always)]
                fn apply<T: Element>(x: T, y: T) -> Option<T> {
                    x.$method(y)
                }
            }
        )*
    };
}

macro_rules! comparison_operations {
    ($($(#[$meta:meta])* $name:ident => $op:tt;)*) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
            pub struct $name;

            impl Operation for $name {
                const KIND: OpKind = OpKind::$name;
                type Output<T: Element> = bool;

                #[inline(always)]
                fn apply<T: Element>(x: T, y: T) -> Option<bool> {
                    Some(x $op y)
                }
            }
        )*
    };
}

value_operations! {
    /// `x + y`, wrapping for integers.
    Add => try_add;
    /// `x - y`, wrapping for integers.
    Subtract => try_sub;
    /// `x * y`, wrapping for integers.
    Multiply => try_mul;
    /// `x / y`, wrapping for integers. Integer division by zero panics.
    Divide => try_div;
    /// `x & y`.
    BitAnd => try_bitand;
    /// `x | y`.
    BitOr => try_bitor;
    /// `x ^ y`.
    BitXor => try_bitxor;
}

comparison_operations! {
    /// `x == y`. NaN is never equal to anything.
    Equals => ==;
    /// `x < y`.
    LessThan => <;
    /// `x <= y`.
    LessOrEqual => <=;
    /// `x > y`.
    GreaterThan => >;
    /// `x >= y`.
    GreaterOrEqual => >=;
}

/// Expands `$callback!` with one entry per operation tag: the tag and the
/// names of its vector⊗vector, vector⊗scalar and scalar⊗vector entry points.
/// Doc attributes in front of an entry are appended to all three.
macro_rules! for_each_operation {
    ($callback:ident) => {
        $callback! {
            (Add, add, add_scalar, scalar_add),
            (Subtract, subtract, subtract_scalar, scalar_subtract),
            (Multiply, multiply, multiply_scalar, scalar_multiply),
            ///
            /// # Panics
            ///
            /// Integer division by zero panics, like the `/` operator.
            (Divide, divide, divide_scalar, scalar_divide),
            (BitAnd, bitand, bitand_scalar, scalar_bitand),
            (BitOr, bitor, bitor_scalar, scalar_bitor),
            (BitXor, bitxor, bitxor_scalar, scalar_bitxor),
            (Equals, equals, equals_scalar, scalar_equals),
            (LessThan, less_than, less_than_scalar, scalar_less_than),
            (LessOrEqual, less_or_equal, less_or_equal_scalar, scalar_less_or_equal),
            (GreaterThan, greater_than, greater_than_scalar, scalar_greater_than),
            (GreaterOrEqual, greater_or_equal, greater_or_equal_scalar, scalar_greater_or_equal),
        }
    };
}

pub(crate) use for_each_operation;

// endregion: Operation Tags

// region: Operands

/// Which side of an operation disagrees with the answer's length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operand {
    X,
    Y,
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::X => f.write_str("x"),
            Operand::Y => f.write_str("y"),
        }
    }
}

/// Which operands are vectors, independent of the element values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Shape {
    ScalarVector,
    VectorScalar,
    VectorVector,
}

impl Shape {
    pub const COUNT: usize = 3;

    pub const ALL: [Shape; Shape::COUNT] =
        [Shape::ScalarVector, Shape::VectorScalar, Shape::VectorVector];

    pub const fn name(self) -> &'static str {
        match self {
            Shape::ScalarVector => "scalar-vector",
            Shape::VectorScalar => "vector-scalar",
            Shape::VectorVector => "vector-vector",
        }
    }

    #[inline(always)]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The two inputs of an element-wise operation.
///
/// A scalar is broadcast against every element of the vector it is paired
/// with, so `ScalarVector(s, y)` behaves like `VectorVector(&[s; y.len()], y)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operands<'a, T> {
    ScalarVector(T, &'a [T]),
    VectorScalar(&'a [T], T),
    VectorVector(&'a [T], &'a [T]),
}

impl<'a, T: Copy> Operands<'a, T> {
    #[inline(always)]
    pub fn shape(&self) -> Shape {
        match self {
            Operands::ScalarVector(..) => Shape::ScalarVector,
            Operands::VectorScalar(..) => Shape::VectorScalar,
            Operands::VectorVector(..) => Shape::VectorVector,
        }
    }

    /// Number of elements the answer must hold, taken from the left-most vector.
    #[inline]
    pub fn len(&self) -> usize {
        match *self {
            Operands::ScalarVector(_, y) => y.len(),
            Operands::VectorScalar(x, _) => x.len(),
            Operands::VectorVector(x, _) => x.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the `(x, y)` pair at `index`, broadcasting scalars.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds for a vector operand.
    #[inline(always)]
    pub fn get(&self, index: usize) -> (T, T) {
        match *self {
            Operands::ScalarVector(x, y) => (x, y[index]),
            Operands::VectorScalar(x, y) => (x[index], y),
            Operands::VectorVector(x, y) => (x[index], y[index]),
        }
    }

    /// Checks every vector operand against an answer of `expected` elements.
    ///
    /// For vector⊗vector shapes `x` is checked before `y`, so the error names
    /// the first offending operand.
    pub fn validate(&self, expected: usize) -> Result<()> {
        let check = |operand, len: usize| {
            if len == expected {
                Ok(())
            } else {
                Err(Error::LengthMismatch {
                    operand,
                    len,
                    expected,
                })
            }
        };
        match *self {
            Operands::ScalarVector(_, y) => check(Operand::Y, y.len()),
            Operands::VectorScalar(x, _) => check(Operand::X, x.len()),
            Operands::VectorVector(x, y) => {
                check(Operand::X, x.len())?;
                check(Operand::Y, y.len())
            }
        }
    }

    /// Same operands viewed as `D`, if `T` is `D`.
    #[inline(always)]
    pub(crate) fn reinterpret<D: Copy + 'static>(self) -> Option<Operands<'a, D>>
    where
        T: 'static,
    {
        Some(match self {
            Operands::ScalarVector(x, y) => {
                Operands::ScalarVector(reinterpret_value(x)?, reinterpret(y)?)
            }
            Operands::VectorScalar(x, y) => {
                Operands::VectorScalar(reinterpret(x)?, reinterpret_value(y)?)
            }
            Operands::VectorVector(x, y) => Operands::VectorVector(reinterpret(x)?, reinterpret(y)?),
        })
    }
}

// endregion: Operands

// region: Error Types

/// Error type for element-wise operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A vector operand and the answer have different lengths.
    #[error("length mismatch: operand {operand} has {len} elements, answer has {expected}")]
    LengthMismatch {
        operand: Operand,
        len: usize,
        expected: usize,
    },
    /// The element type lacks the operator the operation needs.
    #[error("{op} is not supported for {type_name}")]
    Unsupported {
        op: OpKind,
        type_name: &'static str,
    },
}

impl Error {
    pub(crate) fn unsupported<T>(op: OpKind) -> Self {
        Error::Unsupported {
            op,
            type_name: type_name::<T>(),
        }
    }
}

pub type Result<T, E = Error> = core::result::Result<T, E>;

// endregion: Error Types

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_partition_into_families() {
        for (i, kind) in OpKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            let families = [kind.is_arithmetic(), kind.is_bitwise(), kind.is_comparison()];
            assert_eq!(families.iter().filter(|&&f| f).count(), 1, "{kind}");
        }
    }

    #[test]
    fn tags_match_their_kinds() {
        assert_eq!(Add::KIND, OpKind::Add);
        assert_eq!(BitXor::KIND, OpKind::BitXor);
        assert_eq!(GreaterOrEqual::KIND, OpKind::GreaterOrEqual);
        assert_eq!(Subtract::apply(5_u8, 7), Some(254));
        assert_eq!(LessOrEqual::apply(2.0_f32, 2.0), Some(true));
        assert_eq!(Equals::apply(f64::NAN, f64::NAN), Some(false));
        assert_eq!(BitOr::apply(1.0_f32, 2.0), None);
    }

    #[test]
    fn supported_by_follows_element_flags() {
        assert!(OpKind::BitAnd.supported_by::<u16>());
        assert!(!OpKind::BitAnd.supported_by::<f64>());
        assert!(OpKind::Divide.supported_by::<f32>());
        assert!(OpKind::LessThan.supported_by::<f32>());
    }

    #[test]
    fn operands_broadcast_scalars() {
        let y = [10, 20, 30];
        let operands = Operands::ScalarVector(1, &y[..]);
        assert_eq!(operands.len(), 3);
        assert_eq!(operands.get(2), (1, 30));
        assert_eq!(Operands::VectorScalar(&y[..], 4).get(0), (10, 4));
    }

    #[test]
    fn operands_report_their_shape() {
        let y = [1_u8, 2];
        assert_eq!(Operands::ScalarVector(0, &y[..]).shape(), Shape::ScalarVector);
        assert_eq!(Operands::VectorScalar(&y[..], 0).shape(), Shape::VectorScalar);
        assert_eq!(Operands::VectorVector(&y[..], &y[..]).shape(), Shape::VectorVector);
        for (i, shape) in Shape::ALL.iter().enumerate() {
            assert_eq!(shape.index(), i);
        }
        assert_eq!(Shape::VectorScalar.to_string(), "vector-scalar");
    }

    #[test]
    fn validate_names_the_offending_operand() {
        let short = [1, 2];
        let long = [1, 2, 3];
        assert_eq!(
            Operands::VectorVector(&long[..], &short[..]).validate(3),
            Err(Error::LengthMismatch {
                operand: Operand::Y,
                len: 2,
                expected: 3
            })
        );
        assert_eq!(
            Operands::VectorVector(&short[..], &short[..]).validate(3),
            Err(Error::LengthMismatch {
                operand: Operand::X,
                len: 2,
                expected: 3
            })
        );
        assert!(Operands::ScalarVector(0, &long[..]).validate(3).is_ok());
        assert!(Operands::VectorScalar(&long[..], 0).validate(2).is_err());
    }

    #[test]
    fn errors_render() {
        let error = Error::LengthMismatch {
            operand: Operand::X,
            len: 3,
            expected: 4,
        };
        assert_eq!(
            error.to_string(),
            "length mismatch: operand x has 3 elements, answer has 4"
        );
        assert_eq!(
            Error::unsupported::<f32>(OpKind::BitXor).to_string(),
            "bitwise-xor is not supported for f32"
        );
    }
}
