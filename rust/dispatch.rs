//! Backends: where a validated call is actually computed.
//!
//! - [`Backend`]: the generic `core` hook, forwarding to the serial fallback by default
//! - [`Fallback`]: the base backend, serial loops for every type
//! - [`Kernels`]: ten concrete-type hooks, one per [`Dtype`], each defaulting to the fallback
//! - [`Specialized`]: a backend that resolves the runtime identity of `T`,
//!   reinterprets the buffers and calls the matching [`Kernels`] hook
//!
//! ```text
//! Dispatcher::add ─ validate ─ Backend::core ─┬─ Fallback ──────────────── fallback::apply::<O, T>
//!                                             └─ Specialized ─ Dtype::of::<T>()
//!                                                  ├─ Some(I32) ─ Kernels::each_i32::<O>
//!                                                  ├─ ...
//!                                                  └─ None ────── fallback::apply::<O, T>
//! ```

use crate::fallback;
use crate::numerics::{Operands, Operation, Result, Shape};
use crate::scalars::{for_each_dtype, reinterpret_mut, Dtype, Element};

// region: Backend

/// Which path a call of operation `O` over `T` in one [`Shape`] takes
/// through a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// The serial loop, monomorphized over the generic `T`.
    Generic,
    /// A concrete-type hook that still uses its default, the serial loop.
    Concrete(Dtype),
    /// A concrete-type hook replaced by a faster kernel.
    Specialized(Dtype),
}

/// The computation step behind every public entry point.
///
/// [`Dispatcher`](crate::Dispatcher) calls [`Backend::core`] only after every
/// vector operand has been matched against the answer's length, so
/// implementations never re-validate. Errors are returned to the caller as is.
pub trait Backend: Send + Sync {
    /// Computes `ans[i] = O(x, y)` element-wise.
    #[inline]
    fn core<O: Operation, T: Element>(
        &self,
        operands: Operands<'_, T>,
        ans: &mut [O::Output<T>],
    ) -> Result<()> {
        fallback::apply::<O, T>(operands, ans)
    }

    /// Reports the path [`Backend::core`] takes for `O` over `T` in `shape`.
    fn route<O: Operation, T: Element>(&self, _shape: Shape) -> Route {
        Route::Generic
    }
}

/// The base backend: every call runs the serial loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fallback;

impl Backend for Fallback {}

// endregion: Backend

// region: Kernels

macro_rules! kernel_hooks {
    ($(($variant:ident, $ty:ty, $hook:ident)),* $(,)?) => {
        /// Concrete-type hooks, one per [`Dtype`].
        ///
        /// Every hook defaults to the serial fallback, so an implementation
        /// overrides only the types it accelerates. Inside a hook, `O::KIND`
        /// selects the operation and [`Operands::shape`] the shape; anything
        /// not handled should be forwarded to
        /// [`fallback::apply`](crate::fallback::apply).
        ///
        /// [`Kernels::is_specialized`] has no default: it must name exactly
        /// the `(operation, shape, type)` triples the overridden hooks handle.
        ///
        /// Hooks receive lengths that have already been validated.
        ///
        /// # Example
        ///
        /// ```
        /// use eachops::{fallback, reinterpret_mut};
        /// use eachops::{Add, Dispatcher, Dtype, Element, Kernels, OpKind, Operands, Operation};
        /// use eachops::{Result, Route, Shape};
        ///
        /// struct FastI32Add;
        ///
        /// impl Kernels for FastI32Add {
        ///     fn each_i32<O: Operation>(
        ///         &self,
        ///         operands: Operands<'_, i32>,
        ///         ans: &mut [O::Output<i32>],
        ///     ) -> Result<()> {
        ///         if let (OpKind::Add, Operands::VectorVector(x, y)) = (O::KIND, operands) {
        ///             if let Some(ans) = reinterpret_mut::<_, i32>(&mut *ans) {
        ///                 for ((slot, a), b) in ans.iter_mut().zip(x).zip(y) {
        ///                     *slot = a.wrapping_add(*b);
        ///                 }
        ///                 return Ok(());
        ///             }
        ///         }
        ///         fallback::apply::<O, i32>(operands, ans)
        ///     }
        ///
        ///     fn is_specialized<O: Operation, T: Element>(&self, shape: Shape) -> bool {
        ///         O::KIND == OpKind::Add
        ///             && shape == Shape::VectorVector
        ///             && Dtype::of::<T>() == Some(Dtype::I32)
        ///     }
        /// }
        ///
        /// let dispatcher = Dispatcher::specialized(FastI32Add);
        /// let mut ans = [0_i32; 3];
        /// dispatcher.add(&[1_i32, 2, 3], &[10, 20, 30], &mut ans).unwrap();
        /// assert_eq!(ans, [11, 22, 33]);
        /// assert_eq!(
        ///     dispatcher.route::<Add, i32>(Shape::VectorVector),
        ///     Route::Specialized(Dtype::I32)
        /// );
        /// assert_eq!(dispatcher.route::<Add, i32>(Shape::ScalarVector), Route::Concrete(Dtype::I32));
        /// ```
        pub trait Kernels: Send + Sync {
            $(
                #[doc = concat!("Computes `O` over `", stringify!($ty), "` operands.")]
                #[inline]
                fn $hook<O: Operation>(
                    &self,
                    operands: Operands<'_, $ty>,
                    ans: &mut [O::Output<$ty>],
                ) -> Result<()> {
                    fallback::apply::<O, $ty>(operands, ans)
                }
            )*

            /// Whether the hook for `T` replaces the fallback for `O` in `shape`.
            ///
            /// Only used for [`Route`] reporting; dispatch never consults it.
            fn is_specialized<O: Operation, T: Element>(&self, shape: Shape) -> bool;
        }
    };
}

for_each_dtype!(kernel_hooks);

// endregion: Kernels

// region: Specialized

/// A backend routing the ten registry types to their [`Kernels`] hooks.
///
/// The type switch is exhaustive over [`Dtype`] and each arm returns, so a
/// call reaches exactly one hook. Element types outside the registry fall
/// through to the serial loop with their original buffers.
#[derive(Debug, Clone, Default)]
pub struct Specialized<K> {
    kernels: K,
}

impl<K: Kernels> Specialized<K> {
    pub const fn new(kernels: K) -> Self {
        Self { kernels }
    }

    pub fn kernels(&self) -> &K {
        &self.kernels
    }

    pub fn into_inner(self) -> K {
        self.kernels
    }
}

impl<K: Kernels> Backend for Specialized<K> {
    #[inline]
    fn core<O: Operation, T: Element>(
        &self,
        operands: Operands<'_, T>,
        ans: &mut [O::Output<T>],
    ) -> Result<()> {
        macro_rules! switch {
            ($(($variant:ident, $ty:ty, $hook:ident)),* $(,)?) => {
                match Dtype::of::<T>() {
                    $(
                        Some(Dtype::$variant) => {
                            if let (Some(operands), Some(ans)) = (
                                operands.reinterpret::<$ty>(),
                                reinterpret_mut::<O::Output<T>, O::Output<$ty>>(&mut *ans),
                            ) {
                                tracing::trace!(op = %O::KIND, dtype = %Dtype::$variant, "concrete dispatch");
                                return self.kernels.$hook::<O>(operands, ans);
                            }
                        }
                    )*
                    None => {}
                }
            };
        }
        for_each_dtype!(switch);
        fallback::apply::<O, T>(operands, ans)
    }

    fn route<O: Operation, T: Element>(&self, shape: Shape) -> Route {
        match Dtype::of::<T>() {
            None => Route::Generic,
            Some(dtype) if self.kernels.is_specialized::<O, T>(shape) => Route::Specialized(dtype),
            Some(dtype) => Route::Concrete(dtype),
        }
    }
}

// endregion: Specialized
