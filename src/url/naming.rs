use url::Url;

/// Extracts the catalog slug of a category or item URL
///
/// The slug is the second-to-last path segment: the directory that holds the
/// page. A trailing slash counts as an empty last segment, so both
/// `.../travel_2/index.html` and `.../travel_2/` yield `travel_2`. A URL with
/// no such directory (`/`, `/x.html`) falls back to its host, so every URL
/// gets a slug.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use catalog_scraper::url::category_slug;
///
/// let url = Url::parse("https://example.com/catalogue/category/books/travel_2/index.html").unwrap();
/// assert_eq!(category_slug(&url), "travel_2");
///
/// let url = Url::parse("https://example.com/x.html").unwrap();
/// assert_eq!(category_slug(&url), "example.com");
/// ```
pub fn category_slug(url: &Url) -> String {
    let directory = url.path_segments().and_then(|segments| {
        let segments: Vec<&str> = segments.collect();
        segments
            .len()
            .checked_sub(2)
            .map(|i| segments[i])
            .filter(|slug| !slug.is_empty())
    });

    match directory {
        Some(slug) => slug.to_string(),
        None => url.host_str().unwrap_or(url.as_str()).to_string(),
    }
}

/// Turns a slug into a human-readable name for progress output
///
/// Hyphens become spaces. A letter is uppercased when it follows a
/// non-letter and lowercased otherwise, so `abc_def` reads `Abc_Def`.
pub fn display_name(slug: &str) -> String {
    let mut after_letter = false;
    slug.chars()
        .flat_map(|c| {
            let c = if c == '-' { ' ' } else { c };
            let mapped: Vec<char> = if !c.is_alphabetic() {
                vec![c]
            } else if after_letter {
                c.to_lowercase().collect()
            } else {
                c.to_uppercase().collect()
            };
            after_letter = c.is_alphabetic();
            mapped
        })
        .collect()
}
