/// Partial matching between rows (V) and columns (U), kept symmetric.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Matching {
    mate_v: Vec<Option<usize>>,
    mate_u: Vec<Option<usize>>,
    pairs: usize,
}

impl Matching {
    pub fn new(n: usize) -> Self {
        Self {
            mate_v: vec![None; n],
            mate_u: vec![None; n],
            pairs: 0,
        }
    }

    pub fn size(&self) -> usize {
        self.pairs
    }

    pub fn is_perfect(&self) -> bool {
        self.pairs == self.mate_v.len()
    }

    pub fn is_row_matched(&self, row: usize) -> bool {
        self.mate_v[row].is_some()
    }

    pub fn is_column_matched(&self, col: usize) -> bool {
        self.mate_u[col].is_some()
    }

    pub fn column_of(&self, row: usize) -> Option<usize> {
        self.mate_v[row]
    }

    pub fn row_of(&self, col: usize) -> Option<usize> {
        self.mate_u[col]
    }

    /// Matches `row` to `col` in both directions and returns the column the
    /// row held before. The previous column is left pointing at `row` until
    /// the caller re-matches it, which augmentation always does.
    pub fn assign(&mut self, row: usize, col: usize) -> Option<usize> {
        let previous = self.mate_v[row].replace(col);
        if self.mate_u[col].replace(row).is_none() {
            self.pairs += 1;
        }
        previous
    }

    pub fn unmatched_rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.mate_v
            .iter()
            .enumerate()
            .filter(|(_, mate)| mate.is_none())
            .map(|(row, _)| row)
    }

    pub fn is_symmetric(&self) -> bool {
        self.mate_v
            .iter()
            .enumerate()
            .all(|(row, mate)| match mate {
                Some(col) => self.mate_u[*col] == Some(row),
                None => true,
            })
            && self
                .mate_u
                .iter()
                .enumerate()
                .all(|(col, mate)| match mate {
                    Some(row) => self.mate_v[*row] == Some(col),
                    None => true,
                })
    }

    /// Row-to-column assignment once the matching is perfect.
    pub fn into_assignment(self) -> Option<Vec<usize>> {
        self.mate_v.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assign_sets_both_directions() {
        let mut matching = Matching::new(3);
        assert_eq!(matching.assign(0, 2), None);
        assert!(matching.is_row_matched(0));
        assert!(matching.is_column_matched(2));
        assert_eq!(matching.row_of(2), Some(0));
        assert_eq!(matching.size(), 1);
        assert!(matching.is_symmetric());
        assert_eq!(matching.unmatched_rows().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn reassigning_along_a_path_grows_by_one() {
        let mut matching = Matching::new(2);
        matching.assign(0, 0);
        // row 1 takes column 0, row 0 moves to column 1
        let freed = matching.assign(1, 0);
        assert_eq!(freed, None);
        assert!(!matching.is_symmetric());
        let previous = matching.assign(0, 1);
        assert_eq!(previous, Some(0));
        assert!(matching.is_symmetric());
        assert!(matching.is_perfect());
        assert_eq!(matching.into_assignment(), Some(vec![1, 0]));
    }

    #[test]
    fn partial_matching_has_no_assignment() {
        let mut matching = Matching::new(2);
        matching.assign(1, 1);
        assert_eq!(matching.into_assignment(), None);
    }
}
