use super::{Group, GroupMember};
use crate::error::{CoreError, CoreResult};

/// A rectangular, group-homogeneous matrix of `T: GroupMember`, stored
/// row-major. Used for the Pedersen commitment matrices in the Bayer-Groth
/// shuffle argument, where witnesses are naturally indexed `(i, j)`.
#[derive(Debug, Clone)]
pub struct GroupMatrix<T: GroupMember> {
    rows: Vec<Vec<T>>,
    num_rows: usize,
    num_cols: usize,
}

impl<T: GroupMember> GroupMatrix<T> {
    /// Builds a matrix from `rows`, checking that every row has the same
    /// length and that every element (across all rows) shares one group and
    /// member size.
    pub fn new(rows: Vec<Vec<T>>) -> CoreResult<Self> {
        if rows.is_empty() || rows.iter().any(|r| r.is_empty()) {
            return Err(CoreError::invalid("GroupMatrix rows must be non-empty"));
        }
        let num_cols = rows[0].len();
        if rows.iter().any(|r| r.len() != num_cols) {
            return Err(CoreError::invalid(
                "all GroupMatrix rows must share one length",
            ));
        }
        let group = rows[0][0].group().clone();
        let size = rows[0][0].member_size();
        for row in &rows {
            for e in row {
                if *e.group() != group {
                    return Err(CoreError::invalid(
                        "all elements of a GroupMatrix must share one group",
                    ));
                }
                if e.member_size() != size {
                    return Err(CoreError::invalid(
                        "all elements of a GroupMatrix must share one member size",
                    ));
                }
            }
        }
        let num_rows = rows.len();
        Ok(GroupMatrix {
            rows,
            num_rows,
            num_cols,
        })
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    pub fn group(&self) -> &Group {
        self.rows[0][0].group()
    }

    pub fn row(&self, i: usize) -> &[T] {
        &self.rows[i]
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Iterates the matrix column-major, as §4.9's Hadamard Argument (one
    /// column per exponent) and the multi-exponentiation argument need.
    pub fn column(&self, j: usize) -> Vec<&T> {
        self.rows.iter().map(|r| &r[j]).collect()
    }

    pub fn rows(&self) -> &[Vec<T>] {
        &self.rows
    }

    /// Builds a matrix directly from its rows (an alias for [`new`](Self::new),
    /// named to mirror the column-major counterpart [`from_columns`](Self::from_columns)).
    pub fn from_rows(rows: Vec<Vec<T>>) -> CoreResult<Self> {
        GroupMatrix::new(rows)
    }

    /// Builds a matrix from `columns`, transposing them into row-major
    /// storage.
    pub fn from_columns(columns: Vec<Vec<T>>) -> CoreResult<Self>
    where
        T: Clone,
    {
        GroupMatrix::new(columns)?.transpose()
    }

    /// Swaps rows and columns.
    pub fn transpose(&self) -> CoreResult<Self>
    where
        T: Clone,
    {
        let mut transposed = vec![Vec::with_capacity(self.num_rows); self.num_cols];
        for row in &self.rows {
            for (j, e) in row.iter().enumerate() {
                transposed[j].push(e.clone());
            }
        }
        GroupMatrix::new(transposed)
    }

    /// Appends `col` as a new last column, re-checking homogeneity.
    pub fn append_column(&self, col: Vec<T>) -> CoreResult<Self>
    where
        T: Clone,
    {
        if col.len() != self.num_rows {
            return Err(CoreError::invalid(
                "appended column must have one entry per row",
            ));
        }
        let mut rows = self.rows.clone();
        for (row, e) in rows.iter_mut().zip(col.into_iter()) {
            row.push(e);
        }
        GroupMatrix::new(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::{GroupParams, ZqElement};
    use num_bigint::BigUint;

    #[test]
    fn rejects_ragged_rows() {
        let grp = GroupParams::small_test_group();
        let a = ZqElement::new(grp.clone(), BigUint::from(1u32));
        let b = ZqElement::new(grp.clone(), BigUint::from(2u32));
        let c = ZqElement::new(grp, BigUint::from(3u32));
        let rows = vec![vec![a, b], vec![c]];
        assert!(GroupMatrix::new(rows).is_err());
    }

    #[test]
    fn column_extraction() {
        let grp = GroupParams::small_test_group();
        let rows = vec![
            vec![
                ZqElement::new(grp.clone(), BigUint::from(1u32)),
                ZqElement::new(grp.clone(), BigUint::from(2u32)),
            ],
            vec![
                ZqElement::new(grp.clone(), BigUint::from(3u32)),
                ZqElement::new(grp.clone(), BigUint::from(4u32)),
            ],
        ];
        let m = GroupMatrix::new(rows).unwrap();
        let col0 = m.column(0);
        assert_eq!(*col0[0].value(), BigUint::from(1u32));
        assert_eq!(*col0[1].value(), BigUint::from(3u32));
    }
}
