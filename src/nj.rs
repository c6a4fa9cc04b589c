//! Neighbor-Joining tree construction.

use crate::distance::matrix::NamedMatrix;
use crate::error::PhyloError;
use crate::lexicon::language::{Language, LanguageId, Phylogeny};

/// Build a binary tree over `leaves` by repeated neighbor-joining on `distances`,
/// inserting every newly created ancestor node into `phylogeny`.
///
/// `distances` must be a square matrix keyed by the same language codes as
/// `leaves`, in any order (the leaf/code correspondence is recovered by key
/// lookup), and symmetric: neighbor-joining's Q-matrix formula assumes
/// `d(i,j) == d(j,i)`, so callers working from an asymmetric distance oracle
/// should pass `distances.symmetrized()` (see [`crate::distance::matrix::NamedMatrix::symmetrized`]).
///
/// Returns the [`LanguageId`] of the root. Errs with
/// [`PhyloError::InsufficientLanguages`] if fewer than two leaves are given.
pub fn build_tree(
    phylogeny: &mut Phylogeny,
    leaves: &[(String, LanguageId)],
    distances: &NamedMatrix<String, f64>,
) -> Result<LanguageId, PhyloError> {
    let n0 = leaves.len();
    if n0 < 2 {
        return Err(PhyloError::InsufficientLanguages(n0));
    }

    let mut codes: Vec<String> = leaves.iter().map(|(code, _)| code.clone()).collect();
    let mut ids: Vec<LanguageId> = leaves.iter().map(|(_, id)| *id).collect();
    let mut d: Vec<Vec<f64>> = codes
        .iter()
        .map(|row| codes.iter().map(|col| *distances.get(row, col)).collect())
        .collect();

    let mut n = n0;
    loop {
        let row_sums: Vec<f64> = d.iter().map(|row| row.iter().sum()).collect();

        let mut q = vec![vec![0.0_f64; n]; n];
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                q[i][j] = (n as f64 - 2.0) * d[i][j] - row_sums[i] - row_sums[j];
            }
        }

        let (mut best_i, mut best_j, mut best_q) = (0usize, 1usize, f64::INFINITY);
        for i in 0..n {
            for j in 0..n {
                if i != j && q[i][j] < best_q {
                    best_q = q[i][j];
                    best_i = i;
                    best_j = j;
                }
            }
        }
        let (i, j) = (best_i, best_j);

        let dist_ij = d[i][j];
        let dist_i_new = if n != 2 {
            dist_ij / 2.0 + (row_sums[i] - row_sums[j]) / (2.0 * (n as f64 - 2.0))
        } else {
            dist_ij / 2.0
        };
        let dist_j_new = dist_ij - dist_i_new;

        let new_name = format!("{}.{}", codes[i], codes[j]);
        let new_id = phylogeny.insert(Language::new(new_name.clone(), new_name.clone(), Vec::new()));
        phylogeny.connect(new_id, ids[i], dist_i_new);
        phylogeny.connect(new_id, ids[j], dist_j_new);

        let dists_to_new: Vec<f64> = (0..n).map(|k| (d[i][k] + d[j][k] - dist_ij) / 2.0).collect();

        let mut kept: Vec<usize> = (0..n).filter(|&k| k != i && k != j).collect();
        kept.sort_unstable();

        let mut new_d = vec![vec![0.0_f64; kept.len() + 1]; kept.len() + 1];
        for (a, &ka) in kept.iter().enumerate() {
            for (b, &kb) in kept.iter().enumerate() {
                new_d[a][b] = d[ka][kb];
            }
            new_d[a][kept.len()] = dists_to_new[ka];
            new_d[kept.len()][a] = dists_to_new[ka];
        }

        let mut new_codes: Vec<String> = kept.iter().map(|&k| codes[k].clone()).collect();
        let mut new_ids: Vec<LanguageId> = kept.iter().map(|&k| ids[k]).collect();
        new_codes.push(new_name);
        new_ids.push(new_id);

        codes = new_codes;
        ids = new_ids;
        d = new_d;
        n -= 1;

        if n <= 1 {
            return Ok(*ids.last().expect("at least one node remains after joining"));
        }
    }
}
