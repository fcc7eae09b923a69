use itertools::Itertools;

use crate::error::{DossierError, ErrorKind, Result};

/// Returns the tags sorted. Empty and duplicated tags are rejected with a
/// configuration error caused by [`ErrorKind::InvalidTags`].
pub(crate) fn validate_tags(tags: &[String]) -> Result<Vec<String>> {
    let mut tags = tags.to_vec();
    tags.sort();

    let mut problems = Vec::new();

    if tags.iter().any(String::is_empty) {
        problems.push("empty tags are forbidden".to_string());
    }

    let duplicates: Vec<&String> = tags
        .iter()
        .filter(|t| !t.is_empty())
        .duplicates()
        .collect();
    if !duplicates.is_empty() {
        problems.push(format!("duplicated tags {duplicates:?}"));
    }

    if !problems.is_empty() {
        return Err(DossierError::InvalidTags(problems.join("; "))
            .classify(ErrorKind::BadConfig, "tags"));
    }

    Ok(tags)
}
