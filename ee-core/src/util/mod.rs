pub mod validate;

/// Normalizes a user supplied tag list: tags are split at
/// whitespace, lowercased, stripped of the reserved `#` character,
/// deduplicated and sorted.
pub fn prepare_tag_list<'a>(tags: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut tags: Vec<_> = tags
        .into_iter()
        .flat_map(|t| t.split_whitespace())
        .map(|t| t.replace('#', ""))
        .filter_map(|t| match t.trim() {
            t if t.is_empty() => None,
            t => Some(t.to_lowercase()),
        })
        .collect();
    tags.sort_unstable();
    tags.dedup();
    tags
}
