use crate::error::{AssignmentError, Result};
use crate::matching::Matching;
use crate::search::SearchState;

/// Flips the alternating path that ends at the free column `col`.
///
/// Walks parent pointers from the column's tree neighbour back to a root,
/// handing each row the column its successor released. Returns the number of
/// rows re-matched.
pub fn augment(matching: &mut Matching, search: &SearchState, col: usize) -> Result<usize> {
    let mut row = search.neighbor(col).ok_or_else(|| {
        AssignmentError::InvariantViolation(format!("admissible column {col} has no tree neighbour"))
    })?;
    let mut exposed = col;
    let mut flipped = 0;
    let limit = search.label_v.len();

    loop {
        let released = matching.assign(row, exposed);
        flipped += 1;
        match search.parent(row) {
            None => return Ok(flipped),
            Some(next) => {
                exposed = released.ok_or_else(|| {
                    AssignmentError::InvariantViolation(format!(
                        "non-root row {row} was unmatched during augmentation"
                    ))
                })?;
                row = next;
            }
        }
        if flipped > limit {
            return Err(AssignmentError::InvariantViolation(
                "augmenting path revisits a row".to_string(),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_edge_path_matches_root() {
        let mut matching = Matching::new(2);
        let mut search = SearchState::new(2);
        search.label_v[1] = true;
        search.nhbor[0] = Some(1);
        let flipped = augment(&mut matching, &search, 0).unwrap();
        assert_eq!(flipped, 1);
        assert_eq!(matching.column_of(1), Some(0));
        assert_eq!(matching.size(), 1);
    }

    #[test]
    fn longer_path_shifts_every_row() {
        // root 1 reaches column 0 (held by row 0); row 0 reaches free column 1
        let mut matching = Matching::new(2);
        matching.assign(0, 0);
        let mut search = SearchState::new(2);
        search.label_v = vec![true, true];
        search.label_u[0] = true;
        search.nhbor[0] = Some(1);
        search.parent[0] = Some(1);
        search.nhbor[1] = Some(0);

        let flipped = augment(&mut matching, &search, 1).unwrap();
        assert_eq!(flipped, 2);
        assert!(matching.is_perfect());
        assert!(matching.is_symmetric());
        assert_eq!(matching.into_assignment(), Some(vec![1, 0]));
    }

    #[test]
    fn missing_neighbour_is_an_invariant_violation() {
        let mut matching = Matching::new(1);
        let search = SearchState::new(1);
        assert!(augment(&mut matching, &search, 0)
            .unwrap_err()
            .is_invariant_violation());
    }
}
