//! [`NamedMatrix`]: a dense matrix addressed by symbolic row/column keys.
//!
//! Backed by a flat `Vec<V>` addressed by `row * columns + col`, with `csv`
//! handling serialization to disk.

use std::collections::HashMap;
use std::hash::Hash;

use crate::error::PhyloError;

/// A dense `rows x columns` matrix where both axes carry their own symbolic keys.
#[derive(Debug, Clone)]
pub struct NamedMatrix<K, V> {
    row_names: Vec<K>,
    column_names: Vec<K>,
    row_index: HashMap<K, usize>,
    column_index: HashMap<K, usize>,
    values: Vec<V>,
}

impl<K, V> NamedMatrix<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    /// Build a matrix by calling `f(row_key, column_key)` for every cell.
    pub fn build(row_names: Vec<K>, column_names: Vec<K>, mut f: impl FnMut(&K, &K) -> V) -> Self {
        let mut values = Vec::with_capacity(row_names.len() * column_names.len());
        for row_key in &row_names {
            for column_key in &column_names {
                values.push(f(row_key, column_key));
            }
        }
        Self::from_parts(row_names, column_names, values)
    }

    fn from_parts(row_names: Vec<K>, column_names: Vec<K>, values: Vec<V>) -> Self {
        let row_index = row_names.iter().cloned().enumerate().map(|(i, k)| (k, i)).collect();
        let column_index = column_names.iter().cloned().enumerate().map(|(i, k)| (k, i)).collect();
        NamedMatrix { row_names, column_names, row_index, column_index, values }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.row_names.len(), self.column_names.len())
    }

    pub fn row_names(&self) -> &[K] {
        &self.row_names
    }

    pub fn column_names(&self) -> &[K] {
        &self.column_names
    }

    fn offset(&self, row: &K, column: &K) -> usize {
        let r = *self.row_index.get(row).expect("unknown row key");
        let c = *self.column_index.get(column).expect("unknown column key");
        r * self.column_names.len() + c
    }

    pub fn get(&self, row: &K, column: &K) -> &V {
        let offset = self.offset(row, column);
        &self.values[offset]
    }

    pub fn set(&mut self, row: &K, column: &K, value: V) {
        let offset = self.offset(row, column);
        self.values[offset] = value;
    }
}

impl<K> NamedMatrix<K, f64>
where
    K: Clone + Eq + Hash + std::fmt::Debug,
{
    /// A square matrix with `d(i,j)` and `d(j,i)` each replaced by their mean.
    ///
    /// Phoneme/lexeme/language distance is not guaranteed symmetric (the
    /// underlying feature-distance oracle is asymmetric by design), but
    /// neighbor-joining assumes a symmetric input. This averages the two
    /// directions before handing the matrix to [`crate::nj::build_tree`];
    /// the asymmetric values stay available everywhere else in the pipeline.
    pub fn symmetrized(&self) -> Self {
        assert_eq!(self.row_names, self.column_names, "symmetrization requires a square matrix with matching row/column keys");
        let mut values = self.values.clone();
        let n = self.row_names.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let mean = (self.values[i * n + j] + self.values[j * n + i]) / 2.0;
                values[i * n + j] = mean;
                values[j * n + i] = mean;
            }
        }
        Self::from_parts(self.row_names.clone(), self.column_names.clone(), values)
    }
}

impl<K, V> NamedMatrix<K, V>
where
    K: Clone + Eq + Hash + ToString,
    V: Clone + ToString,
{
    /// Serialize the matrix as CSV: a header row of stringified column keys,
    /// then one row per stringified row key.
    pub fn to_csv(&self, path: impl AsRef<std::path::Path>) -> Result<(), PhyloError> {
        let mut writer = csv::Writer::from_path(path)?;
        let mut header = vec![String::new()];
        header.extend(self.column_names.iter().map(|k| k.to_string()));
        writer.write_record(&header)?;
        for (i, row_key) in self.row_names.iter().enumerate() {
            let mut record = vec![row_key.to_string()];
            let start = i * self.column_names.len();
            record.extend(self.values[start..start + self.column_names.len()].iter().map(|v| v.to_string()));
            writer.write_record(&record)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl From<csv::Error> for PhyloError {
    fn from(err: csv::Error) -> Self {
        PhyloError::Tables(err.to_string())
    }
}

#[cfg(feature = "parallel")]
impl<K, V> NamedMatrix<K, V>
where
    K: Clone + Eq + Hash + Sync,
    V: Clone + Send,
{
    /// Same as [`NamedMatrix::build`], but rows are computed concurrently.
    pub fn build_parallel(row_names: Vec<K>, column_names: Vec<K>, f: impl Fn(&K, &K) -> V + Sync) -> Self {
        use rayon::prelude::*;

        let values: Vec<V> = row_names
            .par_iter()
            .flat_map_iter(|row_key| column_names.iter().map(|column_key| f(row_key, column_key)))
            .collect();
        Self::from_parts(row_names, column_names, values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_fills_every_cell() {
        let matrix = NamedMatrix::build(vec!["a", "b"], vec!["x", "y", "z"], |r, c| format!("{r}{c}"));
        assert_eq!(matrix.shape(), (2, 3));
        assert_eq!(matrix.get(&"a", &"y"), "ay");
        assert_eq!(matrix.get(&"b", &"z"), "bz");
    }

    #[test]
    fn set_overwrites_a_single_cell() {
        let mut matrix = NamedMatrix::build(vec![1, 2], vec![1, 2], |r, c| r + c);
        matrix.set(&1, &2, 99);
        assert_eq!(*matrix.get(&1, &2), 99);
        assert_eq!(*matrix.get(&2, &1), 3);
    }

    #[test]
    fn symmetrized_averages_both_directions() {
        let mut matrix = NamedMatrix::build(vec!["a", "b"], vec!["a", "b"], |_, _| 0.0);
        matrix.set(&"a", &"b", 2.0);
        matrix.set(&"b", &"a", 4.0);
        let symmetric = matrix.symmetrized();
        assert_eq!(*symmetric.get(&"a", &"b"), 3.0);
        assert_eq!(*symmetric.get(&"b", &"a"), 3.0);
        assert_eq!(*symmetric.get(&"a", &"a"), 0.0);
    }

    #[test]
    fn symmetrized_leaves_an_already_symmetric_matrix_unchanged() {
        let matrix = NamedMatrix::build(vec![1i32, 2, 3], vec![1i32, 2, 3], |r, c| (r - c).unsigned_abs() as f64);
        let symmetric = matrix.symmetrized();
        for r in [1, 2, 3] {
            for c in [1, 2, 3] {
                assert_eq!(matrix.get(&r, &c), symmetric.get(&r, &c));
            }
        }
    }
}
