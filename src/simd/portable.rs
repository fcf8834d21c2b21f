use std::array;

/// Scalar stand-in for a 128-bit vector, used when no SIMD backend is available
#[derive(Debug, Clone, Copy)]
#[repr(C, align(16))]
pub struct PortableVector([i16; 8]);

impl PortableVector {
    #[inline(always)]
    fn zip(self, other: Self, f: impl Fn(i16, i16) -> i16) -> Self {
        Self(array::from_fn(|lane| f(self.0[lane], other.0[lane])))
    }

    #[inline(always)]
    fn mask(set: bool) -> i16 {
        if set { -1 } else { 0 }
    }
}

impl super::Vector for PortableVector {
    const LANES: usize = 8;

    #[inline]
    fn is_available() -> bool {
        true
    }

    #[inline(always)]
    unsafe fn zero() -> Self {
        Self([0; 8])
    }

    #[inline(always)]
    unsafe fn splat_i16(value: i16) -> Self {
        Self([value; 8])
    }

    #[inline(always)]
    unsafe fn load_unaligned(data: *const i16) -> Self {
        Self((data as *const [i16; 8]).read_unaligned())
    }

    #[inline(always)]
    unsafe fn store_unaligned(self, data: *mut i16) {
        (data as *mut [i16; 8]).write_unaligned(self.0)
    }

    #[inline(always)]
    unsafe fn adds_i16(self, other: Self) -> Self {
        self.zip(other, i16::saturating_add)
    }

    #[inline(always)]
    unsafe fn subs_i16(self, other: Self) -> Self {
        self.zip(other, i16::saturating_sub)
    }

    #[inline(always)]
    unsafe fn max_i16(self, other: Self) -> Self {
        self.zip(other, i16::max)
    }

    #[inline(always)]
    unsafe fn eq_i16(self, other: Self) -> Self {
        self.zip(other, |a, b| Self::mask(a == b))
    }

    #[inline(always)]
    unsafe fn gt_i16(self, other: Self) -> Self {
        self.zip(other, |a, b| Self::mask(a > b))
    }

    #[inline(always)]
    unsafe fn and(self, other: Self) -> Self {
        self.zip(other, |a, b| a & b)
    }

    #[inline(always)]
    unsafe fn or(self, other: Self) -> Self {
        self.zip(other, |a, b| a | b)
    }

    #[inline(always)]
    unsafe fn andnot(self, other: Self) -> Self {
        self.zip(other, |a, b| !a & b)
    }

    #[inline(always)]
    unsafe fn shift_right_padded_i16(self, other: Self) -> Self {
        Self(array::from_fn(|lane| match lane {
            0 => other.0[7],
            _ => self.0[lane - 1],
        }))
    }

    #[inline(always)]
    unsafe fn smax_i16(self) -> i16 {
        self.0.into_iter().fold(i16::MIN, i16::max)
    }

    #[inline(always)]
    unsafe fn movemask(self) -> u32 {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, lane)| **lane != 0)
            .fold(0, |mask, (lane, _)| mask | (1 << lane))
    }
}
