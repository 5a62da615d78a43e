use std::fmt::Debug;

use num_traits::{Bounded, Num, NumCast, ToPrimitive};

/// A trait for types that can be used as point coordinates.
///
/// This trait is sealed and cannot be implemented for external types. Every implementor converts
/// to `f64` without failing, which is what distance computations are carried out in. That way
/// unsigned and narrow integer coordinates never wrap while taking differences.
pub trait IndexableNum:
    private::Sealed
    + Num
    + NumCast
    + ToPrimitive
    + PartialOrd
    + Debug
    + Send
    + Sync
    + bytemuck::Pod
    + Bounded
{
    /// Widen this value to `f64`.
    fn as_f64(self) -> f64;
}

impl IndexableNum for i8 {
    #[inline]
    fn as_f64(self) -> f64 {
        self as f64
    }
}

impl IndexableNum for u8 {
    #[inline]
    fn as_f64(self) -> f64 {
        self as f64
    }
}

impl IndexableNum for i16 {
    #[inline]
    fn as_f64(self) -> f64 {
        self as f64
    }
}

impl IndexableNum for u16 {
    #[inline]
    fn as_f64(self) -> f64 {
        self as f64
    }
}

impl IndexableNum for i32 {
    #[inline]
    fn as_f64(self) -> f64 {
        self as f64
    }
}

impl IndexableNum for u32 {
    #[inline]
    fn as_f64(self) -> f64 {
        self as f64
    }
}

impl IndexableNum for f32 {
    #[inline]
    fn as_f64(self) -> f64 {
        self as f64
    }
}

impl IndexableNum for f64 {
    #[inline]
    fn as_f64(self) -> f64 {
        self
    }
}

// https://rust-lang.github.io/api-guidelines/future-proofing.html#sealed-traits-protect-against-downstream-implementations-c-sealed
mod private {
    pub trait Sealed {}

    impl Sealed for i8 {}
    impl Sealed for u8 {}
    impl Sealed for i16 {}
    impl Sealed for u16 {}
    impl Sealed for i32 {}
    impl Sealed for u32 {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

#[cfg(test)]
mod test {
    use super::IndexableNum;

    #[test]
    fn widens_without_wrapping() {
        assert_eq!(u8::MAX.as_f64(), 255.0);
        assert_eq!(i8::MIN.as_f64(), -128.0);
        assert_eq!(u32::MAX.as_f64(), 4294967295.0);
        assert_eq!(1.5f32.as_f64(), 1.5);
    }
}
