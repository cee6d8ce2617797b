//! Table-driven concrete-type kernels.
//!
//! A [`Registry`] holds at most one function pointer per
//! `(operation, shape, type)` triple and implements [`Kernels`] by looking the
//! triple up. Missing entries behave exactly like the serial fallback, so
//! registering vector⊗vector `i32` addition leaves the scalar shapes, every
//! other operation and every other type untouched.
//!
//! # Example
//!
//! ```
//! use eachops::{Add, Dispatcher, Operands, Registry, Result, Shape};
//!
//! fn add_i32(operands: Operands<'_, i32>, ans: &mut [i32]) -> Result<()> {
//!     for (i, slot) in ans.iter_mut().enumerate() {
//!         let (x, y) = operands.get(i);
//!         *slot = x.wrapping_add(y);
//!     }
//!     Ok(())
//! }
//!
//! let registry = Registry::new().with_shape::<Add, i32>(Shape::VectorScalar, add_i32);
//! let dispatcher = Dispatcher::specialized(registry);
//!
//! let mut ans = [0_i32; 3];
//! dispatcher.add_scalar(&[1_i32, 2, 3], 10, &mut ans).unwrap();
//! assert_eq!(ans, [11, 12, 13]);
//! ```

use core::any::Any;
use core::fmt;

use crate::dispatch::Kernels;
use crate::fallback;
use crate::numerics::{OpKind, Operands, Operation, Result, Shape};
use crate::scalars::{for_each_dtype, Dtype, Element};

/// A concrete kernel for operation `O` over `T`.
///
/// It receives operands whose lengths already match `ans`, in the shape it
/// was registered for.
pub type KernelFn<O, T> =
    for<'a, 'b> fn(Operands<'a, T>, &'b mut [<O as Operation>::Output<T>]) -> Result<()>;

type Slot = Option<Box<dyn Any + Send + Sync>>;

/// Optional kernels indexed by [`OpKind`], [`Shape`] and [`Dtype`].
pub struct Registry {
    slots: [[[Slot; Dtype::COUNT]; Shape::COUNT]; OpKind::COUNT],
}

impl Registry {
    /// An empty registry: every call takes the serial fallback.
    pub fn new() -> Self {
        Self {
            slots: core::array::from_fn(|_| {
                core::array::from_fn(|_| core::array::from_fn(|_| None))
            }),
        }
    }

    /// Builder form of [`Registry::register`].
    #[must_use]
    pub fn with<O: Operation, T: Element>(mut self, kernel: KernelFn<O, T>) -> Self {
        self.register::<O, T>(kernel);
        self
    }

    /// Builder form of [`Registry::register_shape`].
    #[must_use]
    pub fn with_shape<O: Operation, T: Element>(
        mut self,
        shape: Shape,
        kernel: KernelFn<O, T>,
    ) -> Self {
        self.register_shape::<O, T>(shape, kernel);
        self
    }

    /// Installs `kernel` for `O` over `T` in all three shapes, replacing any
    /// previous entries.
    ///
    /// Returns `false` and keeps the registry unchanged if `T` is not one of
    /// the [`Dtype`] entries, since such types never reach a concrete hook.
    pub fn register<O: Operation, T: Element>(&mut self, kernel: KernelFn<O, T>) -> bool {
        Shape::ALL
            .into_iter()
            .all(|shape| self.register_shape::<O, T>(shape, kernel))
    }

    /// Installs `kernel` for `O` over `T` in `shape` only.
    pub fn register_shape<O: Operation, T: Element>(
        &mut self,
        shape: Shape,
        kernel: KernelFn<O, T>,
    ) -> bool {
        let Some(dtype) = Dtype::of::<T>() else {
            tracing::warn!(
                op = %O::KIND,
                ty = core::any::type_name::<T>(),
                "ignoring kernel for a type outside the registry"
            );
            return false;
        };
        let slot = &mut self.slots[O::KIND.index()][shape.index()][dtype.index()];
        if slot.is_some() {
            tracing::debug!(op = %O::KIND, %shape, %dtype, "replacing registered kernel");
        }
        *slot = Some(Box::new(kernel));
        true
    }

    /// Removes the kernels for `O` over `T` in every shape, returning whether
    /// any was present.
    pub fn unregister<O: Operation, T: Element>(&mut self) -> bool {
        Shape::ALL
            .into_iter()
            .fold(false, |removed, shape| self.unregister_shape::<O, T>(shape) || removed)
    }

    pub fn unregister_shape<O: Operation, T: Element>(&mut self, shape: Shape) -> bool {
        match Dtype::of::<T>() {
            Some(dtype) => self.slots[O::KIND.index()][shape.index()][dtype.index()]
                .take()
                .is_some(),
            None => false,
        }
    }

    pub fn contains<O: Operation, T: Element>(&self, shape: Shape) -> bool {
        self.lookup::<O, T>(shape).is_some()
    }

    /// Number of registered kernels, counting each shape separately.
    pub fn len(&self) -> usize {
        self.slots
            .iter()
            .flatten()
            .flatten()
            .filter(|slot| slot.is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every registered `(operation, shape, type)` triple, ordered by operation
    /// then shape.
    pub fn entries(&self) -> impl Iterator<Item = (OpKind, Shape, Dtype)> + '_ {
        OpKind::ALL.into_iter().flat_map(move |op| {
            Shape::ALL.into_iter().flat_map(move |shape| {
                Dtype::ALL
                    .into_iter()
                    .filter(move |dtype| {
                        self.slots[op.index()][shape.index()][dtype.index()].is_some()
                    })
                    .map(move |dtype| (op, shape, dtype))
            })
        })
    }

    #[inline(always)]
    fn lookup<O: Operation, T: Element>(&self, shape: Shape) -> Option<KernelFn<O, T>> {
        let dtype = Dtype::of::<T>()?;
        self.slots[O::KIND.index()][shape.index()][dtype.index()]
            .as_deref()?
            .downcast_ref::<KernelFn<O, T>>()
            .copied()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(
                self.entries()
                    .map(|(op, shape, dtype)| format!("{op}/{shape}/{dtype}")),
            )
            .finish()
    }
}

macro_rules! registry_hooks {
    ($(($variant:ident, $ty:ty, $hook:ident)),* $(,)?) => {
        $(
            #[inline]
            fn $hook<O: Operation>(
                &self,
                operands: Operands<'_, $ty>,
                ans: &mut [O::Output<$ty>],
            ) -> Result<()> {
                match self.lookup::<O, $ty>(operands.shape()) {
                    Some(kernel) => kernel(operands, ans),
                    None => fallback::apply::<O, $ty>(operands, ans),
                }
            }
        )*
    };
}

impl Kernels for Registry {
    for_each_dtype!(registry_hooks);

    fn is_specialized<O: Operation, T: Element>(&self, shape: Shape) -> bool {
        self.contains::<O, T>(shape)
    }
}
