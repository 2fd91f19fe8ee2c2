//! Slug derivation from display names.

/// Derives the URL-safe slug of a display name.
///
/// Lowercases, transliterates the accented letters a name may legally
/// contain, and collapses every other character run into a single
/// hyphen. A blank name derives a blank slug.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_separator = false;

    for c in name.chars() {
        let mapped = match c.to_lowercase().next().unwrap_or(c) {
            c @ ('a'..='z' | '0'..='9') => Some(c),
            'ą' => Some('a'),
            'ć' => Some('c'),
            'ę' => Some('e'),
            'ł' => Some('l'),
            'ń' => Some('n'),
            'ó' => Some('o'),
            'ś' => Some('s'),
            'ź' | 'ż' => Some('z'),
            _ => None,
        };

        match mapped {
            Some(c) => {
                if pending_separator && !slug.is_empty() {
                    slug.push('-');
                }
                pending_separator = false;
                slug.push(c);
            },
            None => pending_separator = true,
        }
    }

    slug
}
