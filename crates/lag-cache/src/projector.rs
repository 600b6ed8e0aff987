use crate::Record;

/// Merges the whitelisted attributes of `incoming` over `existing`.
///
/// Attributes of `incoming` not named in `allowed` are dropped. Incoming
/// values win over existing ones, and attributes only present in `existing`
/// are kept, so partial updates never delete data. An empty `allowed` list
/// returns `existing` unchanged.
///
/// Neither input is modified; the merged record is built fresh.
pub fn populate(existing: &Record, incoming: &Record, allowed: &[&str]) -> Record {
    let mut merged = existing.clone();

    if allowed.is_empty() {
        return merged;
    }

    for (attribute, value) in incoming.iter() {
        if allowed.contains(&attribute) {
            merged.insert(attribute, value.clone());
        }
    }

    merged
}
