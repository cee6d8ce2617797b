//! # EachOps - Element-wise Kernels with Per-Type Specialization
//!
//! * Arithmetic, bitwise and comparison operations over borrowed slices.
//! * Scalar⊗vector, vector⊗scalar and vector⊗vector shapes for every operation.
//! * Ten primitive types eligible for specialization: `i8`-`i64`, `u8`-`u64`, `f32`, `f64`.
//! * Serial fallback for everything else, including `f16` and `bf16` from the `half` crate.
//!
//! ## Implemented operations
//!
//! * Add, subtract, multiply and divide, wrapping for integers.
//! * Bitwise and, or and xor for integers.
//! * Equals, less-than, less-or-equal, greater-than and greater-or-equal, writing `bool`.
//!
//! ## Example
//!
//! ```rust
//! let x = [1_i32, 2, 3];
//! let y = [10_i32, 20, 30];
//! let mut sums = [0_i32; 3];
//! eachops::add(&x, &y, &mut sums).unwrap();
//! assert_eq!(sums, [11, 22, 33]);
//!
//! let mut flags = [false; 3];
//! eachops::greater_than_scalar(&y, 15, &mut flags).unwrap();
//! assert_eq!(flags, [false, true, true]);
//! ```
//!
//! ## Specialization
//!
//! A [`Dispatcher`] validates lengths and hands the call to a [`Backend`].
//! The [`Fallback`] backend runs one serial loop for every type. A
//! [`Specialized`] backend checks the runtime identity of the element type
//! against [`Dtype`], reinterprets the buffers as that concrete type and calls
//! the matching [`Kernels`] hook. A [`Registry`] is the table-driven
//! [`Kernels`] implementation: register a function for one
//! `(operation, type)` pair, in every [`Shape`] or just one, and everything
//! else keeps the fallback.
//!
//! ```rust
//! use eachops::{Dispatcher, Dtype, Multiply, Operands, Registry, Result, Route, Shape};
//!
//! fn multiply_f32(operands: Operands<'_, f32>, ans: &mut [f32]) -> Result<()> {
//!     for (i, slot) in ans.iter_mut().enumerate() {
//!         let (x, y) = operands.get(i);
//!         *slot = x * y;
//!     }
//!     Ok(())
//! }
//!
//! let dispatcher = Dispatcher::specialized(Registry::new().with::<Multiply, f32>(multiply_f32));
//! assert_eq!(
//!     dispatcher.route::<Multiply, f32>(Shape::ScalarVector),
//!     Route::Specialized(Dtype::F32)
//! );
//!
//! let mut ans = [0.0_f32; 2];
//! dispatcher.scalar_multiply(2.0_f32, &[1.5, -4.0], &mut ans).unwrap();
//! assert_eq!(ans, [3.0, -8.0]);
//! ```
//!
//! ## Errors
//!
//! Every entry point returns [`Result`]. A vector operand whose length
//! differs from the answer yields [`Error::LengthMismatch`] before anything
//! is written. An operation the element type lacks, like bitwise-and on
//! floats, yields [`Error::Unsupported`].
//!

// Module declarations
pub mod dispatch;
pub mod dispatcher;
pub mod fallback;
pub mod numerics;
pub mod registry;
pub mod scalars;

// Re-export the element model
pub use scalars::{reinterpret, reinterpret_mut, Dtype, Element};
pub use scalars::{reinterpret_unchecked, reinterpret_unchecked_mut};

// Re-export operations, shapes and errors
pub use numerics::{
    Add, BitAnd, BitOr, BitXor, Divide, Equals, GreaterOrEqual, GreaterThan, LessOrEqual,
    LessThan, Multiply, OpKind, Operand, Operands, Operation, Shape, Subtract,
};
pub use numerics::{Error, Result};

// Re-export dispatch
pub use dispatch::{Backend, Fallback, Kernels, Route, Specialized};
pub use dispatcher::Dispatcher;
pub use registry::{KernelFn, Registry};

// region: Free Functions

macro_rules! free_functions {
    ($($(#[$meta:meta])* ($op:ident, $vv:ident, $vs:ident, $sv:ident)),* $(,)?) => {
        $(
            #[doc = concat!("[`", stringify!($op), "`] of two vectors on the serial fallback.")]
            $(#[$meta])*
            #[inline]
            pub fn $vv<T: Element>(
                x: &[T],
                y: &[T],
                ans: &mut [<$op as Operation>::Output<T>],
            ) -> Result<()> {
                Dispatcher::new().$vv(x, y, ans)
            }

            #[doc = concat!("[`", stringify!($op), "`] of a vector and a broadcast scalar on the serial fallback.")]
            $(#[$meta])*
            #[inline]
            pub fn $vs<T: Element>(
                x: &[T],
                y: T,
                ans: &mut [<$op as Operation>::Output<T>],
            ) -> Result<()> {
                Dispatcher::new().$vs(x, y, ans)
            }

            #[doc = concat!("[`", stringify!($op), "`] of a broadcast scalar and a vector on the serial fallback.")]
            $(#[$meta])*
            #[inline]
            pub fn $sv<T: Element>(
                x: T,
                y: &[T],
                ans: &mut [<$op as Operation>::Output<T>],
            ) -> Result<()> {
                Dispatcher::new().$sv(x, y, ans)
            }
        )*
    };
}

numerics::for_each_operation!(free_functions);

// endregion: Free Functions

// region: Tests


// endregion: Tests
