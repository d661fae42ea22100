use crate::format::{FormatError, MultiFormatError};

/// Combines error results.
pub fn combine_error_results<T: Clone>(results: &[Result<(), T>]) -> Result<(), Vec<T>> {
    let errors = results.iter().cloned().flat_map(|result| result.err().into_iter()).collect::<Vec<T>>();

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Combines results of format checks into a single result.
pub fn combine_format_checks(results: &[Result<(), FormatError>]) -> Result<(), MultiFormatError> {
    combine_error_results(results).map_err(MultiFormatError::from)
}

/// Returns items which occur more than once, in order of their second occurrence.
pub fn get_duplicates<'a, T>(items: impl Iterator<Item = &'a T>) -> Vec<&'a T>
where
    T: std::hash::Hash + Eq + 'a,
{
    let mut seen = rustc_hash::FxHashSet::default();
    let mut duplicates = rustc_hash::FxHashSet::default();

    items.filter(|item| !seen.insert(*item) && duplicates.insert(*item)).collect()
}
