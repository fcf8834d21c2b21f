use std::arch::x86_64::*;

#[derive(Debug, Clone, Copy)]
#[repr(transparent)]
pub struct AVXVector(pub __m256i);

impl super::Vector for AVXVector {
    const LANES: usize = 16;

    #[inline]
    fn is_available() -> bool {
        let cpuid = raw_cpuid::CpuId::new();
        let os_saves_ymm = cpuid
            .get_feature_info()
            .is_some_and(|info| info.has_avx() && info.has_oxsave());
        os_saves_ymm
            && cpuid
                .get_extended_feature_info()
                .is_some_and(|info| info.has_avx2())
    }

    #[inline(always)]
    unsafe fn zero() -> Self {
        Self(_mm256_setzero_si256())
    }

    #[inline(always)]
    unsafe fn splat_i16(value: i16) -> Self {
        Self(_mm256_set1_epi16(value))
    }

    #[inline(always)]
    unsafe fn load_unaligned(data: *const i16) -> Self {
        Self(_mm256_loadu_si256(data as *const __m256i))
    }

    #[inline(always)]
    unsafe fn store_unaligned(self, data: *mut i16) {
        _mm256_storeu_si256(data as *mut __m256i, self.0)
    }

    #[inline(always)]
    unsafe fn adds_i16(self, other: Self) -> Self {
        Self(_mm256_adds_epi16(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn subs_i16(self, other: Self) -> Self {
        Self(_mm256_subs_epi16(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn max_i16(self, other: Self) -> Self {
        Self(_mm256_max_epi16(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn eq_i16(self, other: Self) -> Self {
        Self(_mm256_cmpeq_epi16(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn gt_i16(self, other: Self) -> Self {
        Self(_mm256_cmpgt_epi16(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn and(self, other: Self) -> Self {
        Self(_mm256_and_si256(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn or(self, other: Self) -> Self {
        Self(_mm256_or_si256(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn andnot(self, other: Self) -> Self {
        Self(_mm256_andnot_si256(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn shift_right_padded_i16(self, other: Self) -> Self {
        // alignr works per 128-bit lane, so pair the low half of self with the high half of other
        let carried = _mm256_permute2x128_si256::<0x21>(other.0, self.0);
        Self(_mm256_alignr_epi8::<14>(self.0, carried))
    }

    #[inline(always)]
    unsafe fn smax_i16(self) -> i16 {
        let high = _mm256_extracti128_si256::<1>(self.0);
        let low = _mm256_castsi256_si128(self.0);
        let max = _mm_max_epi16(high, low);
        let max = _mm_max_epi16(max, _mm_srli_si128::<8>(max));
        let max = _mm_max_epi16(max, _mm_srli_si128::<4>(max));
        let max = _mm_max_epi16(max, _mm_srli_si128::<2>(max));
        _mm_extract_epi16::<0>(max) as i16
    }

    #[inline(always)]
    unsafe fn movemask(self) -> u32 {
        _mm256_movemask_epi8(self.0) as u32
    }
}
