//! Per-cell traceback codes recorded by the striped engine.

/// Which recurrence produced a cell's score. Values are the 2-bit codes stored in the low bits
/// of every cell.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Match or mismatch, continuing from the previous read and reference residue
    Diagonal = 0b00,
    /// Gap in the read, continuing from the previous reference residue
    Left = 0b01,
    /// The alignment starts here (score of 0)
    Stop = 0b10,
    /// Gap in the reference, continuing from the previous read residue
    Up = 0b11,
}

impl Direction {
    #[inline(always)]
    pub fn from_code(code: u8) -> Self {
        match code & 0b11 {
            0b00 => Direction::Diagonal,
            0b01 => Direction::Left,
            0b10 => Direction::Stop,
            _ => Direction::Up,
        }
    }
}

/// Set when the gap in the read leaving a cell towards the next reference residue extends the
/// gap ending at that cell, rather than opening from its score
pub(crate) const EXTEND_LEFT: i16 = 0b0100;
/// Set when the gap in the reference leaving a cell towards the next read residue extends the
/// gap ending at that cell, rather than opening from its score
pub(crate) const EXTEND_UP: i16 = 0b1000;

/// Traceback codes for every (read, reference) cell, kept in the engine's striped order: one
/// block of `seg_len * lanes` codes per reference column.
///
/// The low two bits of a code hold the [`Direction`] of the cell's score, the next two record
/// whether the gaps leaving the cell extend an existing gap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionMatrix {
    codes: Vec<i16>,
    read_len: usize,
    ref_len: usize,
    seg_len: usize,
    lanes: usize,
}

impl DirectionMatrix {
    pub(crate) fn new(read_len: usize, ref_len: usize, seg_len: usize, lanes: usize) -> Self {
        Self {
            codes: vec![0; ref_len * seg_len * lanes],
            read_len,
            ref_len,
            seg_len,
            lanes,
        }
    }

    pub fn read_len(&self) -> usize {
        self.read_len
    }

    pub fn ref_len(&self) -> usize {
        self.ref_len
    }

    /// Raw codes in striped order, including the padding lanes past the end of the read
    pub fn as_striped(&self) -> &[i16] {
        &self.codes
    }

    pub(crate) fn as_striped_mut(&mut self) -> &mut [i16] {
        &mut self.codes
    }

    /// Panics if either index is out of bounds
    #[inline(always)]
    fn code(&self, read_idx: usize, ref_idx: usize) -> i16 {
        assert!(
            read_idx < self.read_len && ref_idx < self.ref_len,
            "cell ({read_idx}, {ref_idx}) is outside the {}x{} direction matrix",
            self.read_len,
            self.ref_len
        );
        let segment = read_idx % self.seg_len;
        let lane = read_idx / self.seg_len;
        self.codes[(ref_idx * self.seg_len + segment) * self.lanes + lane]
    }

    /// Panics if either index is out of bounds
    #[inline(always)]
    pub fn get(&self, read_idx: usize, ref_idx: usize) -> Direction {
        Direction::from_code(self.code(read_idx, ref_idx) as u8)
    }

    /// Whether the gap in the read continuing past this cell extends the one ending here
    pub fn extends_left_gap(&self, read_idx: usize, ref_idx: usize) -> bool {
        self.code(read_idx, ref_idx) & EXTEND_LEFT != 0
    }

    /// Whether the gap in the reference continuing past this cell extends the one ending here
    pub fn extends_up_gap(&self, read_idx: usize, ref_idx: usize) -> bool {
        self.code(read_idx, ref_idx) & EXTEND_UP != 0
    }

    /// Walks the alignment path backwards from its end cell
    pub fn traceback(&self, read_end: usize, ref_end: usize) -> AlignmentPathIter<'_> {
        AlignmentPathIter {
            directions: self,
            read_idx: read_end,
            ref_idx: ref_end,
            state: PathState::Score,
            finished: false,
        }
    }
}

/// One step of an alignment path, holding the `(read_idx, ref_idx)` cell it occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    /// Read and reference residues aligned against each other
    Diagonal((usize, usize)),
    /// Reference residue aligned against a gap in the read
    Left((usize, usize)),
    /// Read residue aligned against a gap in the reference
    Up((usize, usize)),
}

impl Alignment {
    pub fn pos(&self) -> (usize, usize) {
        match self {
            Alignment::Diagonal(pos) | Alignment::Left(pos) | Alignment::Up(pos) => *pos,
        }
    }

    pub fn read_idx(&self) -> usize {
        self.pos().0
    }

    pub fn ref_idx(&self) -> usize {
        self.pos().1
    }
}

/// Which of the three recurrences the walk is currently following
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PathState {
    Score,
    LeftGap,
    UpGap,
}

/// Iterator over the cells of an alignment path, from its end towards its start.
///
/// Stops before a [`Direction::Stop`] cell, or after the step that would leave the matrix.
/// The last yielded cell is therefore the start of the alignment. Inside a gap, the extension
/// bits decide whether the gap continues or was opened from the score of the previous cell.
pub struct AlignmentPathIter<'a> {
    directions: &'a DirectionMatrix,
    read_idx: usize,
    ref_idx: usize,
    state: PathState,
    finished: bool,
}

impl Iterator for AlignmentPathIter<'_> {
    type Item = Alignment;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            let pos = (self.read_idx, self.ref_idx);
            match self.state {
                PathState::Score => match self.directions.get(self.read_idx, self.ref_idx) {
                    Direction::Stop => self.finished = true,
                    Direction::Left => self.state = PathState::LeftGap,
                    Direction::Up => self.state = PathState::UpGap,
                    Direction::Diagonal => {
                        if self.read_idx == 0 || self.ref_idx == 0 {
                            self.finished = true;
                        } else {
                            self.read_idx -= 1;
                            self.ref_idx -= 1;
                        }
                        return Some(Alignment::Diagonal(pos));
                    }
                },
                PathState::LeftGap => {
                    if self.ref_idx == 0 {
                        self.finished = true;
                    } else {
                        self.ref_idx -= 1;
                        if !self.directions.extends_left_gap(self.read_idx, self.ref_idx) {
                            self.state = PathState::Score;
                        }
                    }
                    return Some(Alignment::Left(pos));
                }
                PathState::UpGap => {
                    if self.read_idx == 0 {
                        self.finished = true;
                    } else {
                        self.read_idx -= 1;
                        if !self.directions.extends_up_gap(self.read_idx, self.ref_idx) {
                            self.state = PathState::Score;
                        }
                    }
                    return Some(Alignment::Up(pos));
                }
            }
        }
        None
    }
}
