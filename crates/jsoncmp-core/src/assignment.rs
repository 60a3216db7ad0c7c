//! Optimal rectangular assignment on a dense score matrix.
//!
//! Implements the Kuhn–Munkres (Hungarian) algorithm in its potentials
//! formulation: rows are inserted one at a time and an augmenting path of
//! tight edges is grown until a free column is reached, updating the dual
//! potentials by the minimum slack at each step. Rectangular inputs are
//! handled by solving the transposed matrix when rows outnumber columns, so
//! the result always contains `min(rows, cols)` pairs.
//!
//! The solver is a pure function over `f64` scores and knows nothing about
//! the value model; the list matcher feeds it pairwise similarities.
//!
//! # Determinism
//!
//! Ties are broken by scanning columns in ascending order, so equal-score
//! matrices always produce the same pairing regardless of caller state.

/// Returns the pairing `(row, col)` that maximizes the total score over a
/// one-to-one partial matching, with `min(rows, cols)` pairs sorted by row.
///
/// An empty matrix (either dimension zero) yields no pairs. Rows of unequal
/// length are treated as if padded with the shortest row's length; callers
/// are expected to pass a rectangular matrix.
pub fn max_sum_assignment(scores: &[Vec<f64>]) -> Vec<(usize, usize)> {
    let rows = scores.len();
    let cols = scores.iter().map(Vec::len).min().unwrap_or(0);
    if rows == 0 || cols == 0 {
        return Vec::new();
    }

    if rows <= cols {
        solve_min(&negate(scores, rows, cols), rows, cols)
    } else {
        // Transpose so the row count is the smaller dimension.
        let transposed: Vec<Vec<f64>> = (0..cols)
            .map(|j| (0..rows).map(|i| -scores[i][j]).collect())
            .collect();
        let mut pairs: Vec<(usize, usize)> = solve_min(&transposed, cols, rows)
            .into_iter()
            .map(|(j, i)| (i, j))
            .collect();
        pairs.sort_unstable();
        pairs
    }
}

fn negate(scores: &[Vec<f64>], rows: usize, cols: usize) -> Vec<Vec<f64>> {
    (0..rows)
        .map(|i| (0..cols).map(|j| -scores[i][j]).collect())
        .collect()
}

/// Minimizes total cost over a matrix with `rows <= cols`, returning one
/// `(row, col)` pair per row, sorted by row.
///
/// Rows and columns are 1-indexed internally; index 0 is the scratch slot of
/// the standard potentials formulation.
fn solve_min(cost: &[Vec<f64>], rows: usize, cols: usize) -> Vec<(usize, usize)> {
    let mut u = vec![0.0f64; rows + 1];
    let mut v = vec![0.0f64; cols + 1];
    // row_for[j]: the row currently assigned to column j (0 = unassigned).
    let mut row_for = vec![0usize; cols + 1];
    // prev_col[j]: the column preceding j on the alternating path.
    let mut prev_col = vec![0usize; cols + 1];

    for row in 1..=rows {
        row_for[0] = row;
        let mut j0 = 0usize;
        let mut min_slack = vec![f64::INFINITY; cols + 1];
        let mut visited = vec![false; cols + 1];

        // Grow the alternating tree until an unassigned column is reached.
        loop {
            visited[j0] = true;
            let i0 = row_for[j0];
            let mut delta = f64::INFINITY;
            let mut j1 = 0usize;

            for j in 1..=cols {
                if visited[j] {
                    continue;
                }
                let slack = cost[i0 - 1][j - 1] - u[i0] - v[j];
                if slack < min_slack[j] {
                    min_slack[j] = slack;
                    prev_col[j] = j0;
                }
                if min_slack[j] < delta {
                    delta = min_slack[j];
                    j1 = j;
                }
            }

            for j in 0..=cols {
                if visited[j] {
                    u[row_for[j]] += delta;
                    v[j] -= delta;
                } else {
                    min_slack[j] -= delta;
                }
            }

            j0 = j1;
            if row_for[j0] == 0 {
                break;
            }
        }

        // Flip the alternating path to extend the matching by one.
        loop {
            let j1 = prev_col[j0];
            row_for[j0] = row_for[j1];
            j0 = j1;
            if j0 == 0 {
                break;
            }
        }
    }

    let mut pairs: Vec<(usize, usize)> = (1..=cols)
        .filter(|&j| row_for[j] != 0)
        .map(|j| (row_for[j] - 1, j - 1))
        .collect();
    pairs.sort_unstable();
    pairs
}
