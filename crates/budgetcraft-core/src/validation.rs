use budgetcraft_domain::{names_match, CategoryKind};

use crate::{CoreError, CoreResult};

/// Trims the name and rejects blank input.
pub(crate) fn category_name(candidate: &str) -> CoreResult<String> {
    let trimmed = candidate.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Category name cannot be empty".into()));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn color(candidate: &str) -> CoreResult<String> {
    let trimmed = candidate.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Category color cannot be empty".into()));
    }
    Ok(trimmed.to_string())
}

/// Fails when `candidate` collides with a name other than the one at `exclude`.
pub(crate) fn unique_name<'a, I>(
    kind: CategoryKind,
    existing: I,
    exclude: Option<usize>,
    candidate: &str,
) -> CoreResult<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let duplicate = existing
        .into_iter()
        .enumerate()
        .any(|(index, name)| names_match(name, candidate) && exclude != Some(index));
    if duplicate {
        Err(CoreError::DuplicateName {
            kind,
            name: candidate.to_string(),
        })
    } else {
        Ok(())
    }
}
