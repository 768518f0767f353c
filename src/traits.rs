use core::fmt::Debug;
use num_traits::Float;

/// Trait for the floating-point types accepted by the distribution layer.
///
/// The numerical kernels in [`crate::special`] are written for `f64` (their
/// rational approximations carry double-precision constants). `FloatScalar`
/// lets `f32` callers reuse them: arguments are widened with [`widen`],
/// results narrowed with [`narrow`].
///
/// [`widen`]: FloatScalar::widen
/// [`narrow`]: FloatScalar::narrow
pub trait FloatScalar: Float + Copy + PartialEq + Debug {
    /// Widen to `f64` for a kernel call.
    fn widen(self) -> f64;
    /// Narrow a kernel result back into `Self`.
    fn narrow(v: f64) -> Self;
}

/// Concrete impls for real floats.
macro_rules! impl_float_scalar {
    ($($t:ty),*) => {
        $(
            impl FloatScalar for $t {
                #[inline] fn widen(self) -> f64 { self as f64 }
                #[inline] fn narrow(v: f64) -> $t { v as $t }
            }
        )*
    };
}

impl_float_scalar!(f32, f64);
