use std::arch::x86_64::*;

#[derive(Debug, Clone, Copy)]
#[repr(transparent)]
pub struct SSEVector(__m128i);

impl super::Vector for SSEVector {
    const LANES: usize = 8;

    #[inline]
    fn is_available() -> bool {
        raw_cpuid::CpuId::new()
            .get_feature_info()
            .is_some_and(|info| info.has_sse2())
    }

    #[inline(always)]
    unsafe fn zero() -> Self {
        Self(_mm_setzero_si128())
    }

    #[inline(always)]
    unsafe fn splat_i16(value: i16) -> Self {
        Self(_mm_set1_epi16(value))
    }

    #[inline(always)]
    unsafe fn load_unaligned(data: *const i16) -> Self {
        Self(_mm_loadu_si128(data as *const __m128i))
    }

    #[inline(always)]
    unsafe fn store_unaligned(self, data: *mut i16) {
        _mm_storeu_si128(data as *mut __m128i, self.0)
    }

    #[inline(always)]
    unsafe fn adds_i16(self, other: Self) -> Self {
        Self(_mm_adds_epi16(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn subs_i16(self, other: Self) -> Self {
        Self(_mm_subs_epi16(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn max_i16(self, other: Self) -> Self {
        Self(_mm_max_epi16(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn eq_i16(self, other: Self) -> Self {
        Self(_mm_cmpeq_epi16(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn gt_i16(self, other: Self) -> Self {
        Self(_mm_cmpgt_epi16(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn and(self, other: Self) -> Self {
        Self(_mm_and_si128(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn or(self, other: Self) -> Self {
        Self(_mm_or_si128(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn andnot(self, other: Self) -> Self {
        Self(_mm_andnot_si128(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn shift_right_padded_i16(self, other: Self) -> Self {
        // SSE2 has no alignr, so combine the two byte shifts by hand
        Self(_mm_or_si128(
            _mm_slli_si128::<2>(self.0),
            _mm_srli_si128::<14>(other.0),
        ))
    }

    #[inline(always)]
    unsafe fn smax_i16(self) -> i16 {
        let max = _mm_max_epi16(self.0, _mm_srli_si128::<8>(self.0));
        let max = _mm_max_epi16(max, _mm_srli_si128::<4>(max));
        let max = _mm_max_epi16(max, _mm_srli_si128::<2>(max));
        _mm_extract_epi16::<0>(max) as i16
    }

    #[inline(always)]
    unsafe fn movemask(self) -> u32 {
        _mm_movemask_epi8(self.0) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::Vector;

    impl SSEVector {
        fn from_array(arr: [i16; 8]) -> Self {
            Self(unsafe { _mm_loadu_si128(arr.as_ptr() as *const __m128i) })
        }
        fn to_array(self) -> [i16; 8] {
            let mut arr = [0i16; 8];
            unsafe { _mm_storeu_si128(arr.as_mut_ptr() as *mut __m128i, self.0) };
            arr
        }
    }

    #[test]
    fn test_shift_carries_top_lane() {
        let a = SSEVector::from_array([1, 2, 3, 4, 5, 6, 7, 8]);
        let b = SSEVector::from_array([-1, -2, -3, -4, -5, -6, -7, -8]);
        let shifted = unsafe { a.shift_right_padded_i16(b) };
        assert_eq!(shifted.to_array(), [-8, 1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_smax_negative_lanes() {
        let a = SSEVector::from_array([-9, -3, -300, i16::MIN, -4, -5, -6, -7]);
        assert_eq!(unsafe { a.smax_i16() }, -3);
    }
}
