/// Default gap open penalty. Opening a gap costs `gap_open + gap_extend`
pub const GAP_OPEN_PENALTY: u8 = 20;
/// Default gap extension penalty, charged for every residue inside a gap
pub const GAP_EXTEND_PENALTY: u8 = 3;

/// Largest residue alphabet a byte-coded sequence can address
pub const MAX_ALPHABET_SIZE: usize = 256;

/// Largest sequence length an alignment result can report
pub const MAX_SEQUENCE_LEN: usize = i32::MAX as usize;
