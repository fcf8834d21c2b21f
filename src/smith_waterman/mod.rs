//! Striped [Smith-Waterman](https://en.wikipedia.org/wiki/Smith%E2%80%93Waterman_algorithm) local alignment with affine gaps ([Farrar 2007](https://doi.org/10.1093/bioinformatics/btl582)).
//!
//! The score matrix is computed one reference residue (column) at a time. Rather than placing
//! consecutive query residues in consecutive SIMD lanes, which would make every lane depend on
//! its neighbour, the query is split into `LANES` interleaved stripes. With `seg_len =
//! ceil(query_len / LANES)`, lane `k` of segment `s` holds query position `s + k * seg_len`:
//!
//! ```text
//! query: "ACGTACGTAC" (10 residues), 4 lanes -> seg_len = 3
//!
//!              lane 0   lane 1   lane 2   lane 3
//! segment 0:   0 A      3 T      6 G      9 C
//! segment 1:   1 C      4 A      7 T      - (pad)
//! segment 2:   2 G      5 C      8 A      - (pad)
//! ```
//!
//! Consecutive query positions sit in consecutive segments of the same lane, so the diagonal and
//! vertical dependencies stay within a lane for every segment but the first. Crossing from the
//! last segment into the first moves up one lane, which is a single lane shift.
//!
//! The query profile precomputes one such column of substitution scores for every residue of
//! the alphabet, so scoring a column is a single saturating add per segment.
//!
//! Vertical gaps (`F`) only flow down a lane in the first pass over the segments. The lazy-F
//! loop then shifts the leftover `F` into the next lane and sweeps again, stopping as soon as no
//! lane's `F` could still raise a score.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::r#const::MAX_SEQUENCE_LEN;
use crate::scoring::{ScoringMatrix, validate_codes};
#[cfg(target_arch = "aarch64")]
use crate::simd::NEONVector;
#[cfg(target_arch = "x86_64")]
use crate::simd::{AVXVector, SSEVector};
use crate::simd::{PortableVector, Vector};

mod direction;
mod profile;
pub mod reference;
mod result;
mod striped;

pub use direction::{Alignment, AlignmentPathIter, Direction, DirectionMatrix};
use profile::StripedProfile;
pub use result::AlignmentResult;

use result::AlignmentEnd;

/// SIMD instruction set used by a [`Profile`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Backend {
    /// 16 lanes of 16 bits
    Avx2,
    /// 8 lanes of 16 bits
    Sse2,
    /// 8 lanes of 16 bits
    Neon,
    /// Scalar emulation of 8 lanes, available everywhere
    Portable,
}

impl Backend {
    /// In order of preference
    pub const ALL: [Backend; 4] = [
        Backend::Avx2,
        Backend::Sse2,
        Backend::Neon,
        Backend::Portable,
    ];

    /// Widest backend supported by the running CPU
    pub fn detect() -> Self {
        let backend = Self::available().next().unwrap_or(Backend::Portable);
        log::debug!("detected {backend:?} backend");
        backend
    }

    pub fn available() -> impl Iterator<Item = Backend> {
        Self::ALL.into_iter().filter(|backend| backend.is_available())
    }

    pub fn is_available(self) -> bool {
        match self {
            #[cfg(target_arch = "x86_64")]
            Backend::Avx2 => ProfileAVX2::is_available(),
            #[cfg(target_arch = "x86_64")]
            Backend::Sse2 => ProfileSSE2::is_available(),
            #[cfg(target_arch = "aarch64")]
            Backend::Neon => ProfileNEON::is_available(),
            Backend::Portable => ProfilePortable::is_available(),
            _ => false,
        }
    }

    /// Number of query residues processed per vector
    pub fn lanes(self) -> usize {
        match self {
            Backend::Avx2 => 16,
            Backend::Sse2 | Backend::Neon | Backend::Portable => 8,
        }
    }
}

/// Query profile built for one query and scoring matrix, ready to align against any number of
/// references. Immutable once built, so it can be shared between threads.
#[derive(Debug, Clone)]
pub struct Profile {
    inner: ProfileBackend,
    read_len: usize,
    alphabet_size: usize,
}

#[derive(Debug, Clone)]
enum ProfileBackend {
    #[cfg(target_arch = "x86_64")]
    Avx2(ProfileAVX2),
    #[cfg(target_arch = "x86_64")]
    Sse2(ProfileSSE2),
    #[cfg(target_arch = "aarch64")]
    Neon(ProfileNEON),
    Portable(ProfilePortable),
}

impl Profile {
    /// Builds the profile for the widest backend the CPU supports
    pub fn new(read: &[u8], matrix: &ScoringMatrix) -> Result<Self> {
        Self::with_backend(read, matrix, Backend::detect())
    }

    pub fn with_backend(read: &[u8], matrix: &ScoringMatrix, backend: Backend) -> Result<Self> {
        if read.is_empty() {
            return Err(Error::EmptyQuery);
        }
        if read.len() > MAX_SEQUENCE_LEN {
            return Err(Error::SequenceTooLong { len: read.len() });
        }
        matrix.validate_codes(read)?;
        if !backend.is_available() {
            return Err(Error::BackendUnavailable(backend));
        }

        let inner = match backend {
            #[cfg(target_arch = "x86_64")]
            Backend::Avx2 => ProfileBackend::Avx2(unsafe { ProfileAVX2::new(read, matrix) }),
            #[cfg(target_arch = "x86_64")]
            Backend::Sse2 => ProfileBackend::Sse2(unsafe { ProfileSSE2::new(read, matrix) }),
            #[cfg(target_arch = "aarch64")]
            Backend::Neon => ProfileBackend::Neon(unsafe { ProfileNEON::new(read, matrix) }),
            _ => ProfileBackend::Portable(unsafe { ProfilePortable::new(read, matrix) }),
        };

        let profile = Self {
            inner,
            read_len: read.len(),
            alphabet_size: matrix.alphabet_size(),
        };
        log::debug!(
            "built {:?} profile: read_len={}, alphabet_size={}, seg_len={}",
            profile.backend(),
            profile.read_len,
            profile.alphabet_size,
            profile.seg_len()
        );
        Ok(profile)
    }

    pub fn backend(&self) -> Backend {
        match self.inner {
            #[cfg(target_arch = "x86_64")]
            ProfileBackend::Avx2(_) => Backend::Avx2,
            #[cfg(target_arch = "x86_64")]
            ProfileBackend::Sse2(_) => Backend::Sse2,
            #[cfg(target_arch = "aarch64")]
            ProfileBackend::Neon(_) => Backend::Neon,
            ProfileBackend::Portable(_) => Backend::Portable,
        }
    }

    pub fn read_len(&self) -> usize {
        self.read_len
    }

    pub fn alphabet_size(&self) -> usize {
        self.alphabet_size
    }

    /// Number of vectors per column
    pub fn seg_len(&self) -> usize {
        self.read_len.div_ceil(self.backend().lanes())
    }

    /// Best local alignment of the query against `reference`.
    ///
    /// Opening a gap costs `gap_open + gap_extend` and every further gap residue costs
    /// `gap_extend`.
    pub fn align(&self, reference: &[u8], gap_open: u8, gap_extend: u8) -> Result<AlignmentResult> {
        self.validate_reference(reference)?;
        let end = self.smith_waterman::<false>(reference, gap_open, gap_extend, &mut []);
        Ok(AlignmentResult::from_end(&end))
    }

    /// Like [`Profile::align`], also recording the direction matrix for traceback
    pub fn align_with_directions(
        &self,
        reference: &[u8],
        gap_open: u8,
        gap_extend: u8,
    ) -> Result<(AlignmentResult, DirectionMatrix)> {
        self.validate_reference(reference)?;
        let mut directions = DirectionMatrix::new(
            self.read_len,
            reference.len(),
            self.seg_len(),
            self.backend().lanes(),
        );
        let end = self.smith_waterman::<true>(
            reference,
            gap_open,
            gap_extend,
            directions.as_striped_mut(),
        );
        Ok((AlignmentResult::from_end(&end), directions))
    }

    fn validate_reference(&self, reference: &[u8]) -> Result<()> {
        if reference.is_empty() {
            return Err(Error::EmptyReference);
        }
        if reference.len() > MAX_SEQUENCE_LEN {
            return Err(Error::SequenceTooLong {
                len: reference.len(),
            });
        }
        validate_codes(reference, self.alphabet_size)
    }

    fn smith_waterman<const TRACEBACK: bool>(
        &self,
        reference: &[u8],
        gap_open: u8,
        gap_extend: u8,
        directions: &mut [i16],
    ) -> AlignmentEnd {
        // availability was checked when the profile was built
        match &self.inner {
            #[cfg(target_arch = "x86_64")]
            ProfileBackend::Avx2(profile) => unsafe {
                profile.smith_waterman::<TRACEBACK>(reference, gap_open, gap_extend, directions)
            },
            #[cfg(target_arch = "x86_64")]
            ProfileBackend::Sse2(profile) => unsafe {
                profile.smith_waterman::<TRACEBACK>(reference, gap_open, gap_extend, directions)
            },
            #[cfg(target_arch = "aarch64")]
            ProfileBackend::Neon(profile) => unsafe {
                profile.smith_waterman::<TRACEBACK>(reference, gap_open, gap_extend, directions)
            },
            ProfileBackend::Portable(profile) => unsafe {
                profile.smith_waterman::<TRACEBACK>(reference, gap_open, gap_extend, directions)
            },
        }
    }
}

macro_rules! define_profile {
    (
        $name:ident,
        vector = $vector:ty
        $(, target_feature = $feature:literal)?
    ) => {
        #[derive(Debug, Clone)]
        pub(crate) struct $name(StripedProfile<$vector>);

        impl $name {
            /// # Safety
            ///
            /// Caller must ensure that the backend is available, and that every code of `read` is
            /// below the alphabet size of `matrix`
            $(#[target_feature(enable = $feature)])?
            pub unsafe fn new(read: &[u8], matrix: &ScoringMatrix) -> Self {
                Self(StripedProfile::new(read, matrix))
            }

            pub fn is_available() -> bool {
                <$vector as Vector>::is_available()
            }

            /// # Safety
            ///
            /// Caller must ensure that the backend is available, and that every code of
            /// `reference` is below the profile's alphabet size
            $(#[target_feature(enable = $feature)])?
            pub unsafe fn smith_waterman<const TRACEBACK: bool>(
                &self,
                reference: &[u8],
                gap_open: u8,
                gap_extend: u8,
                directions: &mut [i16],
            ) -> AlignmentEnd {
                striped::smith_waterman::<$vector, TRACEBACK>(
                    &self.0, reference, gap_open, gap_extend, directions,
                )
            }
        }
    };
}

#[cfg(target_arch = "x86_64")]
define_profile!(ProfileAVX2, vector = AVXVector, target_feature = "avx2");
#[cfg(target_arch = "x86_64")]
define_profile!(ProfileSSE2, vector = SSEVector, target_feature = "sse2");
#[cfg(target_arch = "aarch64")]
define_profile!(ProfileNEON, vector = NEONVector, target_feature = "neon");
define_profile!(ProfilePortable, vector = PortableVector);
