/// Returns everything before the last `/` of a URL string
///
/// This is the "directory" a page lives in. A string with no `/` has an
/// empty directory.
///
/// # Examples
///
/// ```
/// use wikiscribe::url::directory_prefix;
///
/// assert_eq!(
///     directory_prefix("https://en.wikisource.org/wiki/The_Raven"),
///     "https://en.wikisource.org/wiki"
/// );
/// assert_eq!(directory_prefix("no-slashes"), "");
/// ```
pub fn directory_prefix(url: &str) -> &str {
    url.rsplit_once('/').map(|(prefix, _)| prefix).unwrap_or("")
}

/// Returns everything after the last `/` of a URL string
///
/// # Examples
///
/// ```
/// use wikiscribe::url::final_segment;
///
/// assert_eq!(
///     final_segment("https://en.wikisource.org/wiki/Author:Poe"),
///     "Author:Poe"
/// );
/// assert_eq!(final_segment("https://en.wikisource.org/wiki/"), "");
/// ```
pub fn final_segment(url: &str) -> &str {
    url.rsplit_once('/').map(|(_, last)| last).unwrap_or(url)
}
