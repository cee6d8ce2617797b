//! Element types and the concrete-type registry.
//!
//! This module provides:
//!
//! - [`Element`]: any `Copy` numeric type the serial kernels can iterate over
//! - [`Dtype`]: the closed set of ten primitive types eligible for specialization
//! - [`reinterpret`] / [`reinterpret_mut`]: zero-copy slice views used by the type switch
//!
//! Only the ten [`Dtype`] entries are ever routed to concrete-type kernels.
//! Every other [`Element`], like `half::f16` with the `half` feature enabled,
//! always takes the serial fallback.

use core::any::TypeId;
use core::fmt;

// region: Registry

/// Expands `$callback!` with one `(Variant, type, hook)` triple per registry entry.
///
/// Every place that needs to enumerate the concrete types (the [`Dtype`]
/// identity check, the kernel hooks, the type switch and the kernel table) goes through
/// this list, so adding a type is a one-line change.
macro_rules! for_each_dtype {
    ($callback:ident) => {
        $callback! {
            (I8, i8, each_i8),
            (I16, i16, each_i16),
            (I32, i32, each_i32),
            (I64, i64, each_i64),
            (U8, u8, each_u8),
            (U16, u16, each_u16),
            (U32, u32, each_u32),
            (U64, u64, each_u64),
            (F32, f32, each_f32),
            (F64, f64, each_f64),
        }
    };
}

pub(crate) use for_each_dtype;

/// A primitive numeric type eligible for concrete-type specialization.
///
/// The set is closed: signed and unsigned integers of 8, 16, 32 and 64 bits,
/// plus single- and double-precision floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dtype {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
}

impl Dtype {
    /// Number of registry entries.
    pub const COUNT: usize = 10;

    /// Every registry entry, in declaration order.
    pub const ALL: [Dtype; Dtype::COUNT] = [
        Dtype::I8,
        Dtype::I16,
        Dtype::I32,
        Dtype::I64,
        Dtype::U8,
        Dtype::U16,
        Dtype::U32,
        Dtype::U64,
        Dtype::F32,
        Dtype::F64,
    ];

    /// Resolves the runtime identity of `T` against the registry.
    ///
    /// Returns `None` for any type outside the registry, including
    /// layout-compatible ones like `usize` or `half::f16`.
    ///
    /// # Example
    ///
    /// ```
    /// use eachops::Dtype;
    ///
    /// assert_eq!(Dtype::of::<i32>(), Some(Dtype::I32));
    /// assert_eq!(Dtype::of::<usize>(), None);
    /// ```
    #[inline]
    pub fn of<T: 'static>() -> Option<Self> {
        let id = TypeId::of::<T>();
        macro_rules! identify {
            ($(($variant:ident, $ty:ty, $hook:ident)),* $(,)?) => {
                $(
                    if id == TypeId::of::<$ty>() {
                        return Some(Dtype::$variant);
                    }
                )*
            };
        }
        for_each_dtype!(identify);
        None
    }

    /// Lower-case Rust name of the type, like `"i32"`.
    pub const fn name(self) -> &'static str {
        match self {
            Dtype::I8 => "i8",
            Dtype::I16 => "i16",
            Dtype::I32 => "i32",
            Dtype::I64 => "i64",
            Dtype::U8 => "u8",
            Dtype::U16 => "u16",
            Dtype::U32 => "u32",
            Dtype::U64 => "u64",
            Dtype::F32 => "f32",
            Dtype::F64 => "f64",
        }
    }

    /// Size of one element in bytes.
    pub const fn size(self) -> usize {
        match self {
            Dtype::I8 | Dtype::U8 => 1,
            Dtype::I16 | Dtype::U16 => 2,
            Dtype::I32 | Dtype::U32 | Dtype::F32 => 4,
            Dtype::I64 | Dtype::U64 | Dtype::F64 => 8,
        }
    }

    /// Whether the type is `f32` or `f64`.
    pub const fn is_float(self) -> bool {
        matches!(self, Dtype::F32 | Dtype::F64)
    }

    /// Whether the type can hold negative values: the signed integers and
    /// both float types.
    pub const fn is_signed(self) -> bool {
        !matches!(self, Dtype::U8 | Dtype::U16 | Dtype::U32 | Dtype::U64)
    }

    #[inline(always)]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Dtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// endregion: Registry

// region: Element Trait

/// A value the element-wise kernels can operate on.
///
/// Comparisons come from [`PartialOrd`] and are available for every element.
/// Arithmetic and bitwise operators are opt-in: a type advertises them with
/// [`Element::ARITHMETIC`] and [`Element::BITWISE`] and overrides the
/// matching `try_*` methods. The defaults return `None`, which the serial
/// kernels report as [`Error::Unsupported`](crate::Error::Unsupported).
///
/// # Example
///
/// ```
/// use eachops::Element;
///
/// #[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
/// struct Celsius(f32);
///
/// impl Element for Celsius {
///     const ARITHMETIC: bool = true;
///     fn try_add(self, rhs: Self) -> Option<Self> {
///         Some(Celsius(self.0 + rhs.0))
///     }
///     fn try_sub(self, rhs: Self) -> Option<Self> {
///         Some(Celsius(self.0 - rhs.0))
///     }
///     fn try_mul(self, rhs: Self) -> Option<Self> {
///         Some(Celsius(self.0 * rhs.0))
///     }
///     fn try_div(self, rhs: Self) -> Option<Self> {
///         Some(Celsius(self.0 / rhs.0))
///     }
/// }
/// ```
pub trait Element: Copy + Default + PartialOrd + fmt::Debug + Send + Sync + 'static {
    /// Whether `try_add`, `try_sub`, `try_mul` and `try_div` are implemented.
    const ARITHMETIC: bool = false;
    /// Whether `try_bitand`, `try_bitor` and `try_bitxor` are implemented.
    const BITWISE: bool = false;

    #[inline]
    fn try_add(self, _rhs: Self) -> Option<Self> {
        None
    }

    #[inline]
    fn try_sub(self, _rhs: Self) -> Option<Self> {
        None
    }

    #[inline]
    fn try_mul(self, _rhs: Self) -> Option<Self> {
        None
    }

    #[inline]
    fn try_div(self, _rhs: Self) -> Option<Self> {
        None
    }

    #[inline]
    fn try_bitand(self, _rhs: Self) -> Option<Self> {
        None
    }

    #[inline]
    fn try_bitor(self, _rhs: Self) -> Option<Self> {
        None
    }

    #[inline]
    fn try_bitxor(self, _rhs: Self) -> Option<Self> {
        None
    }
}

/// Integers wrap on overflow regardless of the build profile.
/// Division by zero panics, exactly like the `/` operator.
macro_rules! impl_integer_element {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Element for $ty {
                const ARITHMETIC: bool = true;
                const BITWISE: bool = true;

                #[inline(always)]
                fn try_add(self, rhs: Self) -> Option<Self> {
                    Some(self.wrapping_add(rhs))
                }

                #[inline(always)]
                fn try_sub(self, rhs: Self) -> Option<Self> {
                    Some(self.wrapping_sub(rhs))
                }

                #[inline(always)]
                fn try_mul(self, rhs: Self) -> Option<Self> {
                    Some(self.wrapping_mul(rhs))
                }

                #[inline(always)]
                fn try_div(self, rhs: Self) -> Option<Self> {
                    Some(self.wrapping_div(rhs))
                }

                #[inline(always)]
                fn try_bitand(self, rhs: Self) -> Option<Self> {
                    Some(self & rhs)
                }

                #[inline(always)]
                fn try_bitor(self, rhs: Self) -> Option<Self> {
                    Some(self | rhs)
                }

                #[inline(always)]
                fn try_bitxor(self, rhs: Self) -> Option<Self> {
                    Some(self ^ rhs)
                }
            }
        )*
    };
}

macro_rules! impl_float_element {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Element for $ty {
                const ARITHMETIC: bool = true;

                #[inline(always)]
                fn try_add(self, rhs: Self) -> Option<Self> {
                    Some(self + rhs)
                }

                #[inline(always)]
                fn try_sub(self, rhs: Self) -> Option<Self> {
                    Some(self - rhs)
                }

                #[inline(always)]
                fn try_mul(self, rhs: Self) -> Option<Self> {
                    Some(self * rhs)
                }

                #[inline(always)]
                fn try_div(self, rhs: Self) -> Option<Self> {
                    Some(self / rhs)
                }
            }
        )*
    };
}

impl_integer_element!(i8, i16, i32, i64, u8, u16, u32, u64);
impl_float_element!(f32, f64);

#[cfg(feature = "half")]
impl_float_element!(half::f16, half::bf16);

// endregion: Element Trait

// region: Reinterpretation

/// Views `slice` as a slice of `D` over the same memory.
///
/// The returned slice has the same address and the same number of elements;
/// no value is converted.
///
/// # Safety
///
/// `S` and `D` must have identical size and alignment, and every bit pattern
/// valid for `S` must be valid for `D`. In this crate the two are always the
/// same type, which [`reinterpret`] checks before calling this.
#[inline(always)]
pub unsafe fn reinterpret_unchecked<S, D>(slice: &[S]) -> &[D] {
    debug_assert_eq!(core::mem::size_of::<S>(), core::mem::size_of::<D>());
    debug_assert_eq!(core::mem::align_of::<S>(), core::mem::align_of::<D>());
    unsafe { core::slice::from_raw_parts(slice.as_ptr().cast::<D>(), slice.len()) }
}

/// Mutable counterpart of [`reinterpret_unchecked`].
///
/// # Safety
///
/// Same contract as [`reinterpret_unchecked`]. Additionally every value
/// written through the returned slice must be valid for `S`.
#[inline(always)]
pub unsafe fn reinterpret_unchecked_mut<S, D>(slice: &mut [S]) -> &mut [D] {
    debug_assert_eq!(core::mem::size_of::<S>(), core::mem::size_of::<D>());
    debug_assert_eq!(core::mem::align_of::<S>(), core::mem::align_of::<D>());
    unsafe { core::slice::from_raw_parts_mut(slice.as_mut_ptr().cast::<D>(), slice.len()) }
}

/// Views `slice` as `&[D]` if `S` and `D` are the same type.
///
/// This is how a generic `&[T]` becomes a concrete `&[i32]` once the runtime
/// identity of `T` is known.
///
/// # Example
///
/// ```
/// use eachops::reinterpret;
///
/// let data = [1_i32, -2, 3];
/// let view: &[i32] = reinterpret::<i32, i32>(&data).unwrap();
/// assert_eq!(view.as_ptr(), data.as_ptr());
/// assert!(reinterpret::<i32, u32>(&data).is_none());
/// ```
#[inline(always)]
pub fn reinterpret<S: 'static, D: 'static>(slice: &[S]) -> Option<&[D]> {
    if TypeId::of::<S>() == TypeId::of::<D>() {
        // SAFETY: `S` and `D` are the same type.
        Some(unsafe { reinterpret_unchecked(slice) })
    } else {
        None
    }
}

/// Views `slice` as `&mut [D]` if `S` and `D` are the same type.
#[inline(always)]
pub fn reinterpret_mut<S: 'static, D: 'static>(slice: &mut [S]) -> Option<&mut [D]> {
    if TypeId::of::<S>() == TypeId::of::<D>() {
        // SAFETY: `S` and `D` are the same type.
        Some(unsafe { reinterpret_unchecked_mut(slice) })
    } else {
        None
    }
}

/// Moves a scalar between two names of the same type.
#[inline(always)]
pub(crate) fn reinterpret_value<S: Copy + 'static, D: Copy + 'static>(value: S) -> Option<D> {
    if TypeId::of::<S>() == TypeId::of::<D>() {
        // SAFETY: `S` and `D` are the same type.
        Some(unsafe { core::mem::transmute_copy::<S, D>(&value) })
    } else {
        None
    }
}

// endregion: Reinterpretation

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dtype_of_covers_the_registry() {
        assert_eq!(Dtype::of::<i8>(), Some(Dtype::I8));
        assert_eq!(Dtype::of::<i16>(), Some(Dtype::I16));
        assert_eq!(Dtype::of::<i32>(), Some(Dtype::I32));
        assert_eq!(Dtype::of::<i64>(), Some(Dtype::I64));
        assert_eq!(Dtype::of::<u8>(), Some(Dtype::U8));
        assert_eq!(Dtype::of::<u16>(), Some(Dtype::U16));
        assert_eq!(Dtype::of::<u32>(), Some(Dtype::U32));
        assert_eq!(Dtype::of::<u64>(), Some(Dtype::U64));
        assert_eq!(Dtype::of::<f32>(), Some(Dtype::F32));
        assert_eq!(Dtype::of::<f64>(), Some(Dtype::F64));
    }

    #[test]
    fn dtype_of_rejects_lookalikes() {
        assert_eq!(Dtype::of::<usize>(), None);
        assert_eq!(Dtype::of::<isize>(), None);
        assert_eq!(Dtype::of::<bool>(), None);
        assert_eq!(Dtype::of::<i128>(), None);
        assert_eq!(Dtype::of::<core::num::Wrapping<i32>>(), None);
        #[cfg(feature = "half")]
        assert_eq!(Dtype::of::<half::f16>(), None);
    }

    #[test]
    fn dtype_table_is_consistent() {
        for (i, dtype) in Dtype::ALL.iter().enumerate() {
            assert_eq!(dtype.index(), i);
        }
        assert_eq!(Dtype::I32.size(), core::mem::size_of::<i32>());
        assert_eq!(Dtype::U64.size(), core::mem::size_of::<u64>());
        assert_eq!(Dtype::F32.to_string(), "f32");
        assert!(Dtype::F64.is_float() && Dtype::F64.is_signed());
        assert!(Dtype::F32.is_signed());
        assert!(Dtype::I8.is_signed() && !Dtype::I8.is_float());
        assert!(!Dtype::U8.is_signed());
    }

    #[test]
    fn integers_wrap() {
        assert_eq!(i8::MAX.try_add(1), Some(i8::MIN));
        assert_eq!(0_u8.try_sub(1), Some(u8::MAX));
        assert_eq!(i32::MIN.try_div(-1), Some(i32::MIN));
        assert_eq!(0b1100_u8.try_bitxor(0b1010), Some(0b0110));
    }

    #[test]
    #[should_panic]
    fn integer_division_by_zero_panics() {
        let _ = 1_i32.try_div(0);
    }

    #[test]
    fn floats_have_no_bitwise() {
        assert!(f32::ARITHMETIC && !f32::BITWISE);
        assert_eq!(1.5_f64.try_mul(2.0), Some(3.0));
        assert_eq!(1.5_f32.try_bitand(2.0), None);
    }

    #[test]
    fn reinterpret_preserves_address_length_and_bits() {
        let data = [f32::NAN, -0.0, f32::INFINITY, 1.0e-40];
        let view = reinterpret::<f32, f32>(&data).unwrap();
        assert_eq!(view.as_ptr(), data.as_ptr());
        assert_eq!(view.len(), data.len());
        for (a, b) in data.iter().zip(view) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn reinterpret_rejects_other_types() {
        let mut data = [1_u32, 2, 3];
        assert!(reinterpret::<u32, i32>(&data).is_none());
        assert!(reinterpret_mut::<u32, f32>(&mut data).is_none());
        assert_eq!(reinterpret_value::<u32, i32>(7), None);
        assert_eq!(reinterpret_value::<u32, u32>(7), Some(7));
    }

    #[test]
    fn reinterpret_mut_writes_through() {
        let mut data = [0_i16; 4];
        reinterpret_mut::<i16, i16>(&mut data).unwrap()[2] = -5;
        assert_eq!(data, [0, 0, -5, 0]);
    }
}
