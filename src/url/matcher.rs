use std::collections::HashSet;

/// Checks whether a URL segment contains any of the given labels
///
/// Matching is a plain, case-sensitive substring test: `Author:` matches
/// `Author:Poe` and also `Talk_Author:Poe`.
///
/// # Examples
///
/// ```
/// use wikiscribe::url::contains_any_label;
///
/// let labels = vec!["Special:".to_string(), "File:".to_string()];
/// assert!(contains_any_label("Special:Random", &labels));
/// assert!(!contains_any_label("The_Raven", &labels));
/// ```
pub fn contains_any_label(segment: &str, labels: &[String]) -> bool {
    labels.iter().any(|label| segment.contains(label.as_str()))
}

/// Removes duplicates, keeping the first occurrence of each link in order
pub fn dedup_preserving_order<I>(links: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    links
        .into_iter()
        .filter(|link| seen.insert(link.clone()))
        .collect()
}

/// Keeps the links that embed `needle` anywhere in their text
pub fn links_containing<'a, I>(links: I, needle: &str) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    links
        .into_iter()
        .filter(|link| link.contains(needle))
        .cloned()
        .collect()
}
