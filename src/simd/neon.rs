use std::arch::aarch64::*;

#[derive(Debug, Clone, Copy)]
#[repr(transparent)]
pub struct NEONVector(int16x8_t);

/// Distinct bit per lane, used to emulate `movemask`
const LANE_BITS: [u16; 8] = [1, 2, 4, 8, 16, 32, 64, 128];

impl super::Vector for NEONVector {
    const LANES: usize = 8;

    #[inline]
    fn is_available() -> bool {
        // NEON is mandatory on aarch64
        cfg!(target_arch = "aarch64")
    }

    #[inline(always)]
    unsafe fn zero() -> Self {
        Self(vdupq_n_s16(0))
    }

    #[inline(always)]
    unsafe fn splat_i16(value: i16) -> Self {
        Self(vdupq_n_s16(value))
    }

    #[inline(always)]
    unsafe fn load_unaligned(data: *const i16) -> Self {
        Self(vld1q_s16(data))
    }

    #[inline(always)]
    unsafe fn store_unaligned(self, data: *mut i16) {
        vst1q_s16(data, self.0)
    }

    #[inline(always)]
    unsafe fn adds_i16(self, other: Self) -> Self {
        Self(vqaddq_s16(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn subs_i16(self, other: Self) -> Self {
        Self(vqsubq_s16(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn max_i16(self, other: Self) -> Self {
        Self(vmaxq_s16(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn eq_i16(self, other: Self) -> Self {
        Self(vreinterpretq_s16_u16(vceqq_s16(self.0, other.0)))
    }

    #[inline(always)]
    unsafe fn gt_i16(self, other: Self) -> Self {
        Self(vreinterpretq_s16_u16(vcgtq_s16(self.0, other.0)))
    }

    #[inline(always)]
    unsafe fn and(self, other: Self) -> Self {
        Self(vandq_s16(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn or(self, other: Self) -> Self {
        Self(vorrq_s16(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn andnot(self, other: Self) -> Self {
        // vbic computes a & !b
        Self(vbicq_s16(other.0, self.0))
    }

    #[inline(always)]
    unsafe fn shift_right_padded_i16(self, other: Self) -> Self {
        Self(vextq_s16::<7>(other.0, self.0))
    }

    #[inline(always)]
    unsafe fn smax_i16(self) -> i16 {
        vmaxvq_s16(self.0)
    }

    #[inline(always)]
    unsafe fn movemask(self) -> u32 {
        let bits = vandq_u16(vreinterpretq_u16_s16(self.0), vld1q_u16(LANE_BITS.as_ptr()));
        vaddvq_u16(bits) as u32
    }
}
