//! Slug generation and per-call id registries.

use std::collections::HashSet;

/// Convert a label to a URL-safe slug.
///
/// Lowercases, folds accented vowels, `ñ`, `ç`, `ß` and `&` to ASCII, drops
/// everything that is not an ASCII word character or whitespace, and joins
/// whitespace runs with a single hyphen. Leading characters other than ASCII
/// alphanumerics and hyphens are removed.
///
/// # Examples
///
/// ```
/// use psm_renderer::slugify;
///
/// assert_eq!(slugify("Gestión Ciudad"), "gestion-ciudad");
/// assert_eq!(slugify("Tom & Jerry"), "tom-and-jerry");
/// ```
#[must_use]
pub fn slugify(label: &str) -> String {
    let mut slug = String::with_capacity(label.len());
    let mut pending_space = false;

    for c in label.trim().to_lowercase().chars() {
        let folded = match c {
            'á' | 'ä' | 'â' | 'à' => "a",
            'é' | 'ë' | 'ê' | 'è' => "e",
            'í' | 'ï' | 'î' | 'ì' => "i",
            'ó' | 'ö' | 'ô' | 'ò' => "o",
            'ú' | 'ü' | 'û' | 'ù' => "u",
            'ñ' => "n",
            'ç' => "c",
            'ß' => "ss",
            '&' => "and",
            c if c.is_whitespace() => {
                pending_space = true;
                continue;
            }
            c if c.is_ascii_alphanumeric() || c == '_' => {
                if pending_space {
                    slug.push('-');
                    pending_space = false;
                }
                slug.push(c);
                continue;
            }
            _ => continue,
        };
        if pending_space {
            slug.push('-');
            pending_space = false;
        }
        slug.push_str(folded);
    }
    if pending_space {
        slug.push('-');
    }

    let start = slug
        .find(|c: char| c.is_ascii_alphanumeric() || c == '-')
        .unwrap_or(slug.len());
    slug.split_off(start)
}

/// Registry of ids already issued within one render call.
///
/// Every id returned by [`issue`](Self::issue) is unique for the lifetime of
/// the registry: a taken slug gets the smallest free numeric suffix
/// (`intro`, `intro1`, `intro2`, ...).
#[derive(Clone, Debug, Default)]
pub struct IdRegistry {
    issued: HashSet<String>,
}

impl IdRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Slugify `label`, make it unique, register it and return it.
    pub fn issue(&mut self, label: &str) -> String {
        let base = slugify(label);
        if self.issued.insert(base.clone()) {
            return base;
        }

        let mut n = 1usize;
        loop {
            let candidate = format!("{base}{n}");
            if self.issued.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }

    /// Whether `id` has already been issued.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.issued.contains(id)
    }

    /// Number of ids issued so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.issued.len()
    }

    /// Whether no id has been issued yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issued.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_lowercases_and_hyphenates() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("Multiple   Spaces"), "multiple-spaces");
        assert_eq!(slugify("  Padded  "), "padded");
    }

    #[test]
    fn test_slugify_folds_accents() {
        assert_eq!(slugify("Gestión"), "gestion");
        assert_eq!(slugify("Crédito Único"), "credito-unico");
        assert_eq!(slugify("Año"), "ano");
        assert_eq!(slugify("Façade"), "facade");
        assert_eq!(slugify("Straße"), "strasse");
    }

    #[test]
    fn test_slugify_ampersand() {
        assert_eq!(slugify("Q&A"), "qanda");
    }

    #[test]
    fn test_slugify_drops_punctuation() {
        assert_eq!(slugify("What's New?"), "whats-new");
        assert_eq!(slugify("kebab-case"), "kebabcase");
        assert_eq!(slugify("snake_case"), "snake_case");
    }

    #[test]
    fn test_slugify_strips_leading_non_alphanumerics() {
        assert_eq!(slugify("__init"), "init");
        assert_eq!(slugify("¿Qué?"), "que");
    }

    #[test]
    fn test_slugify_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("   "), "");
        assert_eq!(slugify("???"), "");
    }

    #[test]
    fn test_issue_unique_suffixes() {
        let mut ids = IdRegistry::new();
        assert_eq!(ids.issue("Intro"), "intro");
        assert_eq!(ids.issue("Intro"), "intro1");
        assert_eq!(ids.issue("intro"), "intro2");
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_issue_skips_taken_suffix() {
        let mut ids = IdRegistry::new();
        assert_eq!(ids.issue("intro1"), "intro1");
        assert_eq!(ids.issue("intro"), "intro");
        assert_eq!(ids.issue("intro"), "intro2");
        assert!(ids.contains("intro1"));
    }

    #[test]
    fn test_registries_are_independent() {
        let mut headings = IdRegistry::new();
        let mut options = IdRegistry::new();
        assert_eq!(headings.issue("Setup"), "setup");
        assert_eq!(options.issue("Setup"), "setup");
        assert!(!IdRegistry::new().contains("setup"));
    }
}
