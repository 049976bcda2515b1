//! Task identifier generation.
//!
//! Ids look like `PPC-101`: the category label's first three characters
//! uppercased, a dash, and a sequence number. The sequence is allocated by
//! the repository (one counter across all categories and projects, starting
//! at 101) rather than derived from the collection size, so concurrent
//! creators can never mint the same id.

use crate::error::Result;
use crate::store::Repository;
use crate::task::Category;

/// Prefix for a category label: first three characters, uppercased.
/// Labels shorter than three characters are used whole, no padding.
pub fn task_prefix(category: Category) -> String {
    category
        .label()
        .chars()
        .take(3)
        .collect::<String>()
        .to_uppercase()
}

/// Allocate the next task id for a category.
pub fn next_task_id<R: Repository>(repo: &R, category: Category) -> Result<String> {
    let seq = repo.next_task_seq()?;
    Ok(format!("{}-{}", task_prefix(category), seq))
}
