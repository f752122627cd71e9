//! Page order handling
//!
//! An explicit order must list exactly one entry per source page and
//! every entry must name an existing page. Repeated pages are allowed:
//! the page is simply placed once per occurrence.

use crate::types::{NupError, Result};
use std::collections::HashSet;

/// Natural reading order `[0, 1, .., page_count - 1]`
pub fn identity_order(page_count: usize) -> Vec<usize> {
    (0..page_count).collect()
}

/// Check an explicit order against a document's page count
pub fn validate_page_order(page_count: usize, order: &[usize]) -> Result<()> {
    if order.len() != page_count {
        return Err(NupError::InvalidPageOrder(format!(
            "expected {page_count} entries, got {}",
            order.len()
        )));
    }

    if let Some(&bad) = order.iter().find(|&&page| page >= page_count) {
        return Err(NupError::InvalidPageOrder(format!(
            "page index {bad} is out of range for a {page_count}-page document"
        )));
    }

    let mut seen = HashSet::with_capacity(order.len());
    let duplicates = order.iter().filter(|&&page| !seen.insert(page)).count();
    if duplicates > 0 {
        log::warn!("page order repeats {duplicates} page(s); they will be placed more than once");
    }

    Ok(())
}

/// The order to compose with: the explicit one if given, otherwise identity
pub fn resolve_page_order(page_count: usize, order: Option<&[usize]>) -> Result<Vec<usize>> {
    match order {
        Some(order) => {
            validate_page_order(page_count, order)?;
            Ok(order.to_vec())
        }
        None => Ok(identity_order(page_count)),
    }
}

/// Move the entry at `from` so it ends up at `to`, shifting the others.
///
/// This is the drag-and-drop reorder operation.
pub fn move_page(order: &mut Vec<usize>, from: usize, to: usize) -> Result<()> {
    if from >= order.len() || to >= order.len() {
        return Err(NupError::InvalidPageOrder(format!(
            "cannot move position {from} to {to} in an order of {} pages",
            order.len()
        )));
    }
    let page = order.remove(from);
    order.insert(to, page);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_identity() {
        assert_eq!(resolve_page_order(4, None).unwrap(), vec![0, 1, 2, 3]);
        assert!(resolve_page_order(0, None).unwrap().is_empty());
    }

    #[test]
    fn test_explicit_permutation_is_kept() {
        let order = [2, 0, 1];
        assert_eq!(resolve_page_order(3, Some(&order)).unwrap(), vec![2, 0, 1]);
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        assert!(matches!(
            resolve_page_order(3, Some(&[0, 1])),
            Err(NupError::InvalidPageOrder(_))
        ));
        assert!(matches!(
            resolve_page_order(3, Some(&[0, 1, 2, 0])),
            Err(NupError::InvalidPageOrder(_))
        ));
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        assert!(matches!(
            resolve_page_order(3, Some(&[0, 1, 3])),
            Err(NupError::InvalidPageOrder(_))
        ));
    }

    #[test]
    fn test_duplicates_are_allowed() {
        assert_eq!(
            resolve_page_order(3, Some(&[0, 0, 2])).unwrap(),
            vec![0, 0, 2]
        );
    }

    #[test]
    fn test_move_page() {
        let mut order = identity_order(5);
        move_page(&mut order, 4, 0).unwrap();
        assert_eq!(order, vec![4, 0, 1, 2, 3]);
        move_page(&mut order, 1, 3).unwrap();
        assert_eq!(order, vec![4, 1, 2, 0, 3]);
        assert!(move_page(&mut order, 5, 0).is_err());
    }
}
