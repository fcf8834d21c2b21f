#[cfg(target_arch = "x86_64")]
mod avx;
#[cfg(target_arch = "aarch64")]
mod neon;
mod portable;
#[cfg(target_arch = "x86_64")]
mod sse;

#[cfg(target_arch = "x86_64")]
pub use avx::AVXVector;
#[cfg(target_arch = "aarch64")]
pub use neon::NEONVector;
pub use portable::PortableVector;
#[cfg(target_arch = "x86_64")]
pub use sse::SSEVector;

/// Vector of signed 16-bit lanes. Every arithmetic operation saturates at
/// `i16::MIN`/`i16::MAX` rather than wrapping.
///
/// Lane 0 is the lowest lane in memory order. Comparisons produce masks with
/// every bit of a matching lane set (`-1`) and every bit of a non-matching
/// lane cleared.
pub trait Vector: Copy + core::fmt::Debug {
    /// Number of 16-bit lanes in the vector
    const LANES: usize;

    /// Whether the running CPU supports the instructions this vector uses
    fn is_available() -> bool;

    /// Create a vector with zeros in all lanes.
    unsafe fn zero() -> Self;
    /// Create a vector with the given value repeated into each lane.
    unsafe fn splat_i16(value: i16) -> Self;

    /// Read `LANES` values from the given pointer. The pointer does not need to
    /// be aligned.
    ///
    /// # Safety
    ///
    /// Callers must guarantee that at least `LANES` values are readable from
    /// `data`.
    unsafe fn load_unaligned(data: *const i16) -> Self;

    /// Write `LANES` values to the given pointer. The pointer does not need to
    /// be aligned.
    ///
    /// # Safety
    ///
    /// Callers must guarantee that at least `LANES` values are writable at
    /// `data`.
    unsafe fn store_unaligned(self, data: *mut i16);

    unsafe fn adds_i16(self, other: Self) -> Self;
    unsafe fn subs_i16(self, other: Self) -> Self;
    unsafe fn max_i16(self, other: Self) -> Self;

    unsafe fn eq_i16(self, other: Self) -> Self;
    unsafe fn gt_i16(self, other: Self) -> Self;

    unsafe fn and(self, other: Self) -> Self;
    unsafe fn or(self, other: Self) -> Self;
    /// `!self & other`
    unsafe fn andnot(self, other: Self) -> Self;

    /// Shift every lane up by one (lane `k` moves to lane `k + 1`), filling lane 0
    /// with the highest lane of `other`
    unsafe fn shift_right_padded_i16(self, other: Self) -> Self;

    /// Get the maximum value in the vector as a scalar
    unsafe fn smax_i16(self) -> i16;

    /// Bitmask of the set lanes. The number of bits per lane differs between
    /// backends, so the result is only meaningful when compared against zero.
    unsafe fn movemask(self) -> u32;
}

/// Views a slice of vectors as the 16-bit lanes they hold, in memory order
#[inline(always)]
pub fn as_lanes<V: Vector>(vectors: &[V]) -> &[i16] {
    debug_assert_eq!(
        core::mem::size_of::<V>(),
        V::LANES * core::mem::size_of::<i16>()
    );
    // SAFETY: every vector type is a plain bundle of `LANES` i16 values with no padding
    unsafe { core::slice::from_raw_parts(vectors.as_ptr().cast::<i16>(), vectors.len() * V::LANES) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_lanes<V: Vector>(lanes: &[i16]) -> V {
        assert_eq!(lanes.len(), V::LANES);
        unsafe { V::load_unaligned(lanes.as_ptr()) }
    }

    fn to_lanes<V: Vector>(vector: V) -> Vec<i16> {
        let mut lanes = vec![0; V::LANES];
        unsafe { vector.store_unaligned(lanes.as_mut_ptr()) };
        lanes
    }

    fn ramp<V: Vector>() -> V {
        let lanes: Vec<i16> = (0..V::LANES as i16).map(|i| i * 3 - 7).collect();
        from_lanes(&lanes)
    }

    fn check_saturation<V: Vector>() {
        unsafe {
            let high = V::splat_i16(i16::MAX - 1);
            assert!(to_lanes(high.adds_i16(V::splat_i16(5))).iter().all(|&v| v == i16::MAX));

            let low = V::splat_i16(i16::MIN + 1);
            assert!(to_lanes(low.subs_i16(V::splat_i16(5))).iter().all(|&v| v == i16::MIN));
        }
    }

    fn check_shift<V: Vector>() {
        unsafe {
            let shifted = ramp::<V>().shift_right_padded_i16(V::splat_i16(i16::MIN));
            let lanes = to_lanes(shifted);
            let original = to_lanes(ramp::<V>());

            assert_eq!(lanes[0], i16::MIN);
            assert_eq!(&lanes[1..], &original[..V::LANES - 1]);
        }
    }

    fn check_smax<V: Vector>() {
        unsafe {
            let mut lanes = vec![-30; V::LANES];
            lanes[V::LANES - 2] = 12;
            lanes[1] = 11;
            assert_eq!(from_lanes::<V>(&lanes).smax_i16(), 12);
            assert_eq!(V::splat_i16(-4).smax_i16(), -4);
        }
    }

    fn check_masks<V: Vector>() {
        unsafe {
            let a = ramp::<V>();
            let b = V::splat_i16(-1);

            let gt = to_lanes(a.gt_i16(b));
            for (lane, value) in to_lanes(a).into_iter().enumerate() {
                assert_eq!(gt[lane], if value > -1 { -1 } else { 0 });
            }

            assert_eq!(V::zero().gt_i16(V::zero()).movemask(), 0);
            assert_ne!(a.eq_i16(a).movemask(), 0);

            // only the highest lane set
            let mut lanes = vec![0; V::LANES];
            lanes[V::LANES - 1] = 1;
            assert_ne!(from_lanes::<V>(&lanes).gt_i16(V::zero()).movemask(), 0);

            let mask = a.eq_i16(b);
            let blended = mask
                .andnot(V::splat_i16(1))
                .or(mask.and(V::splat_i16(2)));
            for (lane, value) in to_lanes(a).into_iter().enumerate() {
                let expected = if value == -1 { 2 } else { 1 };
                assert_eq!(to_lanes(blended)[lane], expected);
            }
        }
    }

    fn check_all<V: Vector>() {
        if !V::is_available() {
            return;
        }
        check_saturation::<V>();
        check_shift::<V>();
        check_smax::<V>();
        check_masks::<V>();

        let vectors = [ramp::<V>(), unsafe { V::splat_i16(9) }];
        let lanes = as_lanes(&vectors);
        assert_eq!(lanes.len(), 2 * V::LANES);
        assert_eq!(lanes[V::LANES], 9);
        assert_eq!(lanes[1], -4);
    }

    #[test]
    fn test_portable() {
        check_all::<PortableVector>();
    }

    #[cfg(target_arch = "x86_64")]
    #[test]
    fn test_sse() {
        check_all::<SSEVector>();
    }

    #[cfg(target_arch = "x86_64")]
    #[test]
    fn test_avx() {
        if AVXVector::is_available() {
            unsafe { avx_checks() }
        }
    }

    #[cfg(target_arch = "x86_64")]
    #[target_feature(enable = "avx2")]
    unsafe fn avx_checks() {
        check_all::<AVXVector>();
    }

    #[cfg(target_arch = "aarch64")]
    #[test]
    fn test_neon() {
        check_all::<NEONVector>();
    }
}
