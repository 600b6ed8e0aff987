//! Set semantics over ordered id lists.
//!
//! The association lists on a user (`loan_ids`, `request_ids`, `fee_ids`)
//! are sequences that never hold the same id twice. First-insertion order is
//! kept.

/// Returns `ids` with `id` appended, unless it is already present.
pub fn add(ids: &[String], id: &str) -> Vec<String> {
    let mut ret = ids.to_vec();
    if !ret.iter().any(|existing| existing == id) {
        ret.push(id.to_string());
    }
    ret
}

/// Returns `ids` with every occurrence of `id` removed.
pub fn remove(ids: &[String], id: &str) -> Vec<String> {
    ids.iter().filter(|existing| *existing != id).cloned().collect()
}
