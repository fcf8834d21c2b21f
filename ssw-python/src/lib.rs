//! Python bindings for the striped Smith-Waterman aligner.
//!
//! ```python
//! import ssw_python
//!
//! matrix = [5 if a == b else -4 for a in range(4) for b in range(4)]
//! result = ssw_python.align(bytes([0, 1, 2, 3]), matrix, 4, bytes([0, 1, 2, 3]), 3, 1)
//! print(result)  # score=20,ref_begin=-1,ref_end=3,read_begin=-1,read_end=3
//!
//! result = ssw_python.align_residues(b"GATTACA", b"TTGATTACAGG")
//! ```

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use ssw::scoring::ResidueTable;
use ssw::{AlignmentResult, Config, GAP_EXTEND_PENALTY, GAP_OPEN_PENALTY, ScoringMatrix};

/// Best local alignment between a read and a reference. Positions are 0-based and inclusive,
/// begin positions are -1 when not computed.
#[pyclass(frozen, get_all, name = "Alignment", module = "ssw_python")]
#[derive(Debug, Clone)]
pub struct PyAlignment {
    score: i16,
    ref_begin: i32,
    ref_end: i32,
    read_begin: i32,
    read_end: i32,
}

#[pymethods]
impl PyAlignment {
    fn __repr__(&self) -> String {
        AlignmentResult::from(self).to_string()
    }
}

impl From<AlignmentResult> for PyAlignment {
    fn from(result: AlignmentResult) -> Self {
        Self {
            score: result.score,
            ref_begin: result.ref_begin,
            ref_end: result.ref_end,
            read_begin: result.read_begin,
            read_end: result.read_end,
        }
    }
}

impl From<&PyAlignment> for AlignmentResult {
    fn from(alignment: &PyAlignment) -> Self {
        Self {
            score: alignment.score,
            ref_begin: alignment.ref_begin,
            ref_end: alignment.ref_end,
            read_begin: alignment.read_begin,
            read_end: alignment.read_end,
        }
    }
}

fn to_py_err(err: ssw::Error) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Aligns an encoded read against an encoded reference.
///
/// Args:
///     read (bytes): Residue codes of the read, each below `n`
///     matrix (list[int]): Row-major `n * n` substitution scores, each within -128..=127
///     n (int): Alphabet size
///     reference (bytes): Residue codes of the reference, each below `n`
///     gap_open (int): Gap open penalty
///     gap_extend (int): Gap extension penalty
///
/// Raises:
///     ValueError: On empty sequences, out of range codes or scores, or a matrix of the wrong size
#[pyfunction]
#[pyo3(signature = (read, matrix, n, reference, gap_open = GAP_OPEN_PENALTY, gap_extend = GAP_EXTEND_PENALTY))]
fn align(
    read: &[u8],
    matrix: Vec<i32>,
    n: usize,
    reference: &[u8],
    gap_open: u8,
    gap_extend: u8,
) -> PyResult<PyAlignment> {
    let matrix = ScoringMatrix::from_i32(&matrix, n).map_err(to_py_err)?;
    let profile = ssw::Profile::new(read, &matrix).map_err(to_py_err)?;
    let result = ssw::align(&profile, reference, gap_open, gap_extend).map_err(to_py_err)?;
    Ok(result.into())
}

/// Aligns two sequences of residue letters.
///
/// Args:
///     read (bytes): Read letters
///     reference (bytes): Reference letters
///     table (str): "nucleotide" for the IUPAC nucleotide table, "protein" for BLOSUM62
///     gap_open (int): Gap open penalty
///     gap_extend (int): Gap extension penalty
///     traceback (bool): Also compute the begin positions
#[pyfunction]
#[pyo3(signature = (read, reference, table = "nucleotide", gap_open = GAP_OPEN_PENALTY, gap_extend = GAP_EXTEND_PENALTY, traceback = false))]
fn align_residues(
    read: &[u8],
    reference: &[u8],
    table: &str,
    gap_open: u8,
    gap_extend: u8,
    traceback: bool,
) -> PyResult<PyAlignment> {
    let table = match table {
        "nucleotide" => ResidueTable::nucc(),
        "protein" => ResidueTable::blosum62(),
        other => {
            return Err(PyValueError::new_err(format!(
                "unknown table {other:?}, expected \"nucleotide\" or \"protein\""
            )));
        }
    };
    let config = Config {
        gap_open,
        gap_extend,
        traceback,
    };
    let result = ssw::align_residues(read, reference, table, &config).map_err(to_py_err)?;
    Ok(result.into())
}

#[pymodule]
fn ssw_python(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyAlignment>()?;
    m.add_function(wrap_pyfunction!(align, m)?)?;
    m.add_function(wrap_pyfunction!(align_residues, m)?)?;
    Ok(())
}
