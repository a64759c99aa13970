//! URL slug derivation for projects and services.

use crate::error::Result;

/// Turns a display name into a URL-safe slug: lowercase, Croatian diacritics
/// transliterated, every run of other non-alphanumerics collapsed to a single
/// hyphen, no leading or trailing hyphen.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());

    for c in name.to_lowercase().chars() {
        match c {
            'č' | 'ć' => slug.push('c'),
            'đ' => slug.push('d'),
            'š' => slug.push('s'),
            'ž' => slug.push('z'),
            c if c.is_ascii_alphanumeric() => slug.push(c),
            _ => {
                if !slug.ends_with('-') && !slug.is_empty() {
                    slug.push('-');
                }
            }
        }
    }

    slug.trim_end_matches('-').to_string()
}

/// Derives a slug from `name` that is unique per `taken`, falling back to
/// `fallback` when the name slugifies to nothing (e.g. emoji-only titles).
/// On collision appends `-1`, `-2`, … until a free slug is found. `taken`
/// is expected to exclude the record being updated.
pub fn unique_slug<F>(name: &str, fallback: &str, taken: F) -> Result<String>
where
    F: Fn(&str) -> Result<bool>,
{
    let base = slugify(name);
    let base = if base.is_empty() {
        fallback.to_string()
    } else {
        base
    };

    if !taken(&base)? {
        return Ok(base);
    }

    let mut counter = 1;
    loop {
        let candidate = format!("{base}-{counter}");
        if !taken(&candidate)? {
            return Ok(candidate);
        }
        counter += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Kuhinja po mjeri"), "kuhinja-po-mjeri");
    }

    #[test]
    fn test_slugify_diacritics() {
        assert_eq!(slugify("Namještaj"), "namjestaj");
        assert_eq!(slugify("Čista žuta đačka šuma ćup"), "cista-zuta-dacka-suma-cup");
    }

    #[test]
    fn test_slugify_collapses_runs() {
        assert_eq!(slugify("a   --  b!!c"), "a-b-c");
    }

    #[test]
    fn test_slugify_trims_hyphens() {
        assert_eq!(slugify("  !Vrata!  "), "vrata");
    }

    #[test]
    fn test_slugify_empty_result() {
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_unique_slug_free() {
        let slug = unique_slug("Stol", "projekt", |_| Ok(false)).unwrap();
        assert_eq!(slug, "stol");
    }

    #[test]
    fn test_unique_slug_suffix() {
        let taken = ["stol", "stol-1"];
        let slug = unique_slug("Stol", "projekt", |s| Ok(taken.contains(&s))).unwrap();
        assert_eq!(slug, "stol-2");
    }

    #[test]
    fn test_unique_slug_fallback() {
        let slug = unique_slug("!!!", "projekt", |s| Ok(s == "projekt")).unwrap();
        assert_eq!(slug, "projekt-1");
    }
}
