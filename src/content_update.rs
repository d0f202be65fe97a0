use crate::error::ApiError;
use crate::models::UpdateKind;

/// Pure content transform for the non-table update types. `find_replace`
/// substitutes every occurrence and fails when the needle is absent, so a
/// mistyped `find` never turns into a silent no-op write.
pub fn apply_update(
    current: &str,
    kind: &UpdateKind,
    content: &str,
) -> Result<String, ApiError> {
    match kind {
        UpdateKind::Append => Ok(join_with_blank_line(current, content)),
        UpdateKind::Prepend => Ok(join_with_blank_line(content, current)),
        UpdateKind::Replace => Ok(content.to_string()),
        UpdateKind::FindReplace { find } => {
            if !current.contains(find.as_str()) {
                return Err(ApiError::FindNotFound(format!(
                    "find text {find:?} not present in the document"
                )));
            }
            Ok(current.replace(find.as_str(), content))
        }
    }
}

fn join_with_blank_line(first: &str, second: &str) -> String {
    if first.is_empty() {
        return second.to_string();
    }
    if second.is_empty() {
        return first.to_string();
    }

    let mut joined = String::with_capacity(first.len() + second.len() + 2);
    joined.push_str(first);
    if !first.ends_with("\n\n") {
        if !first.ends_with('\n') {
            joined.push('\n');
        }
        joined.push('\n');
    }
    joined.push_str(second);
    joined
}
