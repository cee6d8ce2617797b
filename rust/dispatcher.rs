//! Public entry points.
//!
//! A [`Dispatcher`] validates operand lengths and hands the call to its
//! [`Backend`]. Every operation has three entry points, one per shape:
//!
//! | Shape          | Example                      | Requirement                          |
//! |----------------|------------------------------|--------------------------------------|
//! | vector⊗vector  | `add(x, y, ans)`             | `x.len() == ans.len() == y.len()`    |
//! | vector⊗scalar  | `add_scalar(x, s, ans)`      | `x.len() == ans.len()`               |
//! | scalar⊗vector  | `scalar_add(s, y, ans)`      | `y.len() == ans.len()`               |
//!
//! Length errors are returned before the backend runs, so `ans` is left
//! untouched.

use crate::dispatch::{Backend, Fallback, Kernels, Route, Specialized};
use crate::numerics::{for_each_operation, Operands, Operation, Result, Shape};
use crate::numerics::{
    Add, BitAnd, BitOr, BitXor, Divide, Equals, GreaterOrEqual, GreaterThan, LessOrEqual,
    LessThan, Multiply, Subtract,
};
use crate::scalars::Element;

/// Validating front-end over a [`Backend`].
///
/// # Example
///
/// ```
/// use eachops::Dispatcher;
///
/// let dispatcher = Dispatcher::new();
/// let mut sums = [0_u8; 3];
/// dispatcher.add(&[1_u8, 2, 255], &[10, 20, 1], &mut sums).unwrap();
/// assert_eq!(sums, [11, 22, 0]);
///
/// let mut below = [false; 3];
/// dispatcher.less_than_scalar(&[1.0_f32, 2.0, 3.0], 2.5, &mut below).unwrap();
/// assert_eq!(below, [true, true, false]);
///
/// let mut short = [0_u8; 2];
/// assert!(dispatcher.add(&[1_u8, 2, 3], &[1, 2, 3], &mut short).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Dispatcher<B = Fallback> {
    backend: B,
}

impl Dispatcher<Fallback> {
    /// A dispatcher running the serial fallback for every call.
    pub const fn new() -> Self {
        Self { backend: Fallback }
    }
}

impl<K: Kernels> Dispatcher<Specialized<K>> {
    /// A dispatcher routing registry types to `kernels`.
    pub const fn specialized(kernels: K) -> Self {
        Self {
            backend: Specialized::new(kernels),
        }
    }
}

impl<B: Backend> Dispatcher<B> {
    pub const fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Reports the path a call of `O` over `T` in `shape` would take.
    pub fn route<O: Operation, T: Element>(&self, shape: Shape) -> Route {
        self.backend.route::<O, T>(shape)
    }

    /// Validates `operands` against `ans` and computes `O` element-wise.
    ///
    /// # Errors
    ///
    /// - [`Error::LengthMismatch`](crate::Error::LengthMismatch) naming the
    ///   first vector operand whose length differs from `ans.len()`.
    /// - Whatever the backend returns, unchanged, typically
    ///   [`Error::Unsupported`](crate::Error::Unsupported).
    ///
    /// # Panics
    ///
    /// Integer [`Divide`] by zero panics, like the `/` operator. So can a
    /// backend kernel.
    #[inline]
    pub fn apply<O: Operation, T: Element>(
        &self,
        operands: Operands<'_, T>,
        ans: &mut [O::Output<T>],
    ) -> Result<()> {
        if let Err(error) = operands.validate(ans.len()) {
            tracing::debug!(op = %O::KIND, %error, "rejected element-wise call");
            return Err(error);
        }
        self.backend.core::<O, T>(operands, ans)
    }

    /// `ans[i] = O(x, y[i])`; requires `y.len() == ans.len()`.
    #[inline]
    pub fn scalar_vector<O: Operation, T: Element>(
        &self,
        x: T,
        y: &[T],
        ans: &mut [O::Output<T>],
    ) -> Result<()> {
        self.apply::<O, T>(Operands::ScalarVector(x, y), ans)
    }

    /// `ans[i] = O(x[i], y)`; requires `x.len() == ans.len()`.
    #[inline]
    pub fn vector_scalar<O: Operation, T: Element>(
        &self,
        x: &[T],
        y: T,
        ans: &mut [O::Output<T>],
    ) -> Result<()> {
        self.apply::<O, T>(Operands::VectorScalar(x, y), ans)
    }

    /// `ans[i] = O(x[i], y[i])`; requires `x.len() == ans.len()` and `y.len() == ans.len()`.
    #[inline]
    pub fn vector_vector<O: Operation, T: Element>(
        &self,
        x: &[T],
        y: &[T],
        ans: &mut [O::Output<T>],
    ) -> Result<()> {
        self.apply::<O, T>(Operands::VectorVector(x, y), ans)
    }
}

macro_rules! entry_points {
    ($($(#[$meta:meta])* ($op:ident, $vv:ident, $vs:ident, $sv:ident)),* $(,)?) => {
        impl<B: Backend> Dispatcher<B> {
            $(
                #[doc = concat!("[`", stringify!($op), "`] of two vectors.")]
                $(#[$meta])*
                #[inline]
                pub fn $vv<T: Element>(
                    &self,
                    x: &[T],
                    y: &[T],
                    ans: &mut [<$op as Operation>::Output<T>],
                ) -> Result<()> {
                    self.vector_vector::<$op, T>(x, y, ans)
                }

                #[doc = concat!("[`", stringify!($op), "`] of a vector and a broadcast scalar.")]
                $(#[$meta])*
                #[inline]
                pub fn $vs<T: Element>(
                    &self,
                    x: &[T],
                    y: T,
                    ans: &mut [<$op as Operation>::Output<T>],
                ) -> Result<()> {
                    self.vector_scalar::<$op, T>(x, y, ans)
                }

                #[doc = concat!("[`", stringify!($op), "`] of a broadcast scalar and a vector.")]
                $(#[$meta])*
                #[inline]
                pub fn $sv<T: Element>(
                    &self,
                    x: T,
                    y: &[T],
                    ans: &mut [<$op as Operation>::Output<T>],
                ) -> Result<()> {
                    self.scalar_vector::<$op, T>(x, y, ans)
                }
            )*
        }
    };
}

for_each_operation!(entry_points);
