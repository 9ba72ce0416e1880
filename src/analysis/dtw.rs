use ndarray::{s, Array2, ArrayView1};

use crate::analysis::error::AnalysisError;

/// Upper bound on either input length. The algorithm is exact O(n*m) in
/// time and space, so unbounded user-controlled inputs must fail fast
/// instead of allocating a huge matrix.
pub const MAX_SEQUENCE_LEN: usize = 8192;

/// Full output of one DTW computation: the minimal alignment cost, the
/// n x m accumulated-cost matrix and the optimal warping path. The matrix
/// and path are kept around for downstream visualization.
#[derive(Debug, Clone, PartialEq)]
pub struct DtwOutput {
    pub distance: f64,
    pub cost_matrix: Array2<f64>,
    pub path: Vec<(usize, usize)>,
}

/// Computes the DTW distance between two sequences with absolute-difference
/// local cost, plus the optimal warping path by backtracking.
///
/// The path is forward-ordered, starts at (0, 0), ends at (n-1, m-1) and is
/// monotonic non-decreasing in both coordinates.
pub fn compute(s1: ArrayView1<f64>, s2: ArrayView1<f64>) -> Result<DtwOutput, AnalysisError> {
    let (n, m) = (s1.len(), s2.len());
    if n == 0 || m == 0 {
        return Err(AnalysisError::DimensionMismatch { n, m });
    }
    for len in [n, m] {
        if len > MAX_SEQUENCE_LEN {
            return Err(AnalysisError::SequenceTooLong {
                len,
                max: MAX_SEQUENCE_LEN,
            });
        }
    }

    // Accumulated cost over an (n+1) x (m+1) grid; row and column 0 act as
    // infinite sentinels so the recurrence needs no boundary cases.
    let mut acc = Array2::<f64>::from_elem((n + 1, m + 1), f64::INFINITY);
    acc[[0, 0]] = 0.0;

    for i in 1..=n {
        for j in 1..=m {
            let cost = (s1[i - 1] - s2[j - 1]).abs();
            let best = acc[[i - 1, j - 1]] // match
                .min(acc[[i - 1, j]]) // insertion
                .min(acc[[i, j - 1]]); // deletion
            acc[[i, j]] = cost + best;
        }
    }

    let distance = acc[[n, m]];

    // Backtrack from (n, m). Predecessors are tried diagonal, up, left, with
    // ties resolved in that same order.
    let mut path = Vec::with_capacity(n.max(m));
    let (mut i, mut j) = (n, m);
    while i > 0 && j > 0 {
        path.push((i - 1, j - 1));

        let diagonal = acc[[i - 1, j - 1]];
        let up = acc[[i - 1, j]];
        let left = acc[[i, j - 1]];

        if diagonal <= up && diagonal <= left {
            i -= 1;
            j -= 1;
        } else if up <= left {
            i -= 1;
        } else {
            j -= 1;
        }
    }
    path.reverse();

    let cost_matrix = acc.slice(s![1.., 1..]).to_owned();

    Ok(DtwOutput {
        distance,
        cost_matrix,
        path,
    })
}
