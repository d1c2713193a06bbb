/// Characters stripped from file and directory names
pub const RESERVED_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Removes every reserved character from `name`
///
/// Nothing else changes; applying it twice gives the same result as once.
///
/// # Examples
///
/// ```
/// use catalog_scraper::output::sanitize_filename;
///
/// assert_eq!(sanitize_filename("Who: Me?.jpg"), "Who Me.jpg");
/// ```
pub fn sanitize_filename(name: &str) -> String {
    name.chars().filter(|c| !RESERVED_CHARS.contains(c)).collect()
}
