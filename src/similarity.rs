//! Cosine similarity over CSR matrix rows and deterministic ranking.

use sprs::{CsMat, CsVecView};

/// Cosine similarity of `query` against every row of `matrix`.
///
/// `query` must be a vector over the matrix columns. Rows or queries with zero
/// norm score 0 against everything, and non-finite scores are reported as 0.
pub fn cosine_similarities(matrix: &CsMat<f64>, query: CsVecView<f64>) -> Vec<f64> {
    let mut dense_query = vec![0.0; matrix.cols()];
    for (col, &value) in query.iter() {
        if let Some(slot) = dense_query.get_mut(col) {
            *slot = value;
        }
    }
    let query_norm = dense_query.iter().map(|v| v * v).sum::<f64>().sqrt();

    matrix
        .outer_iterator()
        .map(|row| {
            let mut dot = 0.0;
            let mut squared_norm = 0.0;
            for (col, &value) in row.iter() {
                dot += value * dense_query[col];
                squared_norm += value * value;
            }
            let norm = squared_norm.sqrt();
            if query_norm == 0.0 || norm == 0.0 {
                return 0.0;
            }
            let score = dot / (query_norm * norm);
            if score.is_finite() {
                score
            } else {
                0.0
            }
        })
        .collect()
}

/// Row indices ordered for a query anchored at `anchor`.
///
/// The anchor always comes first. The other rows follow by score descending,
/// equal scores keeping ascending row order.
pub fn rank_rows(scores: &[f64], anchor: usize) -> Vec<usize> {
    let mut others: Vec<usize> = (0..scores.len()).filter(|&row| row != anchor).collect();
    others.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

    let mut ranked = Vec::with_capacity(scores.len());
    if anchor < scores.len() {
        ranked.push(anchor);
    }
    ranked.extend(others);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprs::TriMat;

    fn matrix(rows: usize, cols: usize, cells: &[(usize, usize, f64)]) -> CsMat<f64> {
        let mut triplets = TriMat::new((rows, cols));
        for &(r, c, v) in cells {
            triplets.add_triplet(r, c, v);
        }
        triplets.to_csr()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn self_similarity_is_one() {
        let m = matrix(
            3,
            3,
            &[(0, 0, 1.0), (0, 1, 2.0), (1, 1, 3.0), (2, 0, 0.5), (2, 2, 4.0)],
        );
        for row in 0..3 {
            let scores = cosine_similarities(&m, m.outer_view(row).unwrap());
            assert!(close(scores[row], 1.0), "row {} scored {}", row, scores[row]);
            assert!(scores.iter().all(|&s| s <= scores[row] + 1e-12));
        }
    }

    #[test]
    fn orthogonal_and_parallel_rows() {
        let m = matrix(3, 2, &[(0, 0, 1.0), (1, 1, 5.0), (2, 0, 10.0)]);
        let scores = cosine_similarities(&m, m.outer_view(0).unwrap());
        assert!(close(scores[0], 1.0));
        assert!(close(scores[1], 0.0));
        assert!(close(scores[2], 1.0));
    }

    #[test]
    fn known_angle() {
        let m = matrix(2, 2, &[(0, 0, 1.0), (1, 0, 1.0), (1, 1, 1.0)]);
        let scores = cosine_similarities(&m, m.outer_view(0).unwrap());
        assert!(close(scores[1], 1.0 / 2f64.sqrt()));
    }

    #[test]
    fn zero_rows_score_zero() {
        let m = matrix(3, 2, &[(0, 0, 1.0), (2, 1, 1.0)]);
        let scores = cosine_similarities(&m, m.outer_view(1).unwrap());
        assert_eq!(scores, vec![0.0, 0.0, 0.0]);

        let scores = cosine_similarities(&m, m.outer_view(0).unwrap());
        assert_eq!(scores[1], 0.0);
    }

    #[test]
    fn ranks_anchor_first_then_by_score() {
        let scores = [0.2, 0.9, 0.5, 0.9, 1.0];
        assert_eq!(rank_rows(&scores, 2), vec![2, 4, 1, 3, 0]);
    }

    #[test]
    fn ties_keep_row_order() {
        let scores = [0.0; 5];
        assert_eq!(rank_rows(&scores, 3), vec![3, 0, 1, 2, 4]);
    }

    #[test]
    fn out_of_range_anchor_is_not_ranked() {
        assert_eq!(rank_rows(&[0.1, 0.3], 7), vec![1, 0]);
        assert!(rank_rows(&[], 0).is_empty());
    }
}
