use crate::error::Result;
use crate::scoring::{ResidueEncoder, ResidueTable, ScoringMatrix};
use crate::smith_waterman::{Alignment, AlignmentResult, Profile};
use crate::Config;

/// Aligns one query against many references, building the query profile once
#[derive(Debug, Clone)]
pub struct Aligner {
    profile: Profile,
    config: Config,
}

impl Aligner {
    pub fn new(query: &[u8], matrix: &ScoringMatrix, config: &Config) -> Result<Self> {
        Ok(Self::from_profile(Profile::new(query, matrix)?, config))
    }

    /// Reuses a profile, for example one forced onto a specific backend
    pub fn from_profile(profile: Profile, config: &Config) -> Self {
        Self {
            profile,
            config: *config,
        }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Best local alignment against `reference`. With `traceback` enabled in the config, the
    /// begin positions are recovered from the alignment path.
    pub fn align(&self, reference: &[u8]) -> Result<AlignmentResult> {
        if !self.config.traceback {
            return self
                .profile
                .align(reference, self.config.gap_open, self.config.gap_extend);
        }

        let (result, directions) = self.profile.align_with_directions(
            reference,
            self.config.gap_open,
            self.config.gap_extend,
        )?;
        Ok(result.with_traceback_begin(&directions))
    }

    /// Best local alignment along with its path, listed from the end of the alignment back to
    /// its start. Records directions regardless of the config.
    pub fn align_path(&self, reference: &[u8]) -> Result<(AlignmentResult, Vec<Alignment>)> {
        let (result, directions) = self.profile.align_with_directions(
            reference,
            self.config.gap_open,
            self.config.gap_extend,
        )?;
        let path = directions
            .traceback(result.read_end as usize, result.ref_end as usize)
            .collect();
        Ok((result.with_traceback_begin(&directions), path))
    }

    pub fn align_iter<'a, S: AsRef<[u8]>>(
        &'a self,
        references: &'a [S],
    ) -> impl Iterator<Item = Result<AlignmentResult>> + 'a {
        references
            .iter()
            .map(|reference| self.align(reference.as_ref()))
    }

    /// Aligns every reference in order, stopping at the first invalid one
    pub fn align_list<S: AsRef<[u8]>>(&self, references: &[S]) -> Result<Vec<AlignmentResult>> {
        self.align_iter(references).collect()
    }
}

/// Aligns `query` against each of `references`, returning the results in the same order
pub fn align_list<S: AsRef<[u8]>>(
    query: &[u8],
    references: &[S],
    matrix: &ScoringMatrix,
    config: &Config,
) -> Result<Vec<AlignmentResult>> {
    Aligner::new(query, matrix, config)?.align_list(references)
}

/// Aligns two sequences of residue letters scored by `table`.
///
/// Both sequences are encoded together so the profile only covers the residues they contain.
pub fn align_residues(
    read: &[u8],
    reference: &[u8],
    table: &ResidueTable,
    config: &Config,
) -> Result<AlignmentResult> {
    let mut encoder = ResidueEncoder::new();
    let read = encoder.encode(read);
    let reference = encoder.encode(reference);
    let matrix = encoder.flatten(table)?;

    Aligner::new(&read, &matrix, config)?.align(&reference)
}
