//! Primary-author emphasis.

use regex::Regex;

/// Wraps occurrences of the primary author's name in an emphasis marker.
///
/// A name like surname "Chim" with initials `["M", "M"]` is matched in
/// four orderings/punctuation variants: surname-first and initials-first,
/// each with flexible (`M. M.` / `M M`) and tight (`M.M.`) punctuation.
/// The variants are applied in sequence, mirroring how author lists are
/// written across citation styles.
#[derive(Debug)]
pub struct AuthorEmphasis {
    patterns: Vec<Regex>,
}

impl AuthorEmphasis {
    /// Build emphasis patterns for an author name.
    ///
    /// # Errors
    ///
    /// Returns a [`regex::Error`] if a generated pattern fails to compile;
    /// with non-empty surname and initials this does not happen, since all
    /// name parts are escaped.
    pub fn new(surname: &str, initials: &[String]) -> Result<Self, regex::Error> {
        if surname.is_empty() || initials.is_empty() {
            return Ok(Self::none());
        }

        let surname = regex::escape(surname);
        let loose: Vec<String> = initials
            .iter()
            .map(|i| format!(r"{}\.?", regex::escape(i)))
            .collect();
        let loose = loose.join(r"\s*");
        let tight: Vec<String> = initials
            .iter()
            .map(|i| format!(r"{}\.", regex::escape(i)))
            .collect();
        let tight = tight.join("");

        let patterns = vec![
            Regex::new(&format!(r"\b{surname},\s*{loose}\b"))?,
            Regex::new(&format!(r"\b{loose}\s*{surname}\b"))?,
            Regex::new(&format!(r"\b{surname},\s*{tight}\b"))?,
            Regex::new(&format!(r"\b{tight}\s*{surname}\b"))?,
        ];
        Ok(Self { patterns })
    }

    /// An emphasis that matches nothing, used when no author is configured.
    #[must_use]
    pub fn none() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    /// Wrap every occurrence of the author's name in the emphasis marker.
    #[must_use]
    pub fn emphasize(&self, text: &str) -> String {
        let mut emphasized = text.to_owned();
        for pattern in &self.patterns {
            emphasized = pattern
                .replace_all(&emphasized, r#"<strong class="pub-author-me">$0</strong>"#)
                .into_owned();
        }
        emphasized
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn chim() -> AuthorEmphasis {
        AuthorEmphasis::new("Chim", &["M".to_owned(), "M".to_owned()]).unwrap()
    }

    #[test]
    fn test_emphasize_surname_first() {
        // The word boundary lands before the final period, which stays
        // outside the marker.
        let result = chim().emphasize("Smith, J. and Chim, M. M. (2023)");
        assert_eq!(
            result,
            r#"Smith, J. and <strong class="pub-author-me">Chim, M. M</strong>. (2023)"#
        );
    }

    #[test]
    fn test_emphasize_initials_first() {
        let result = chim().emphasize("M. M. Chim and J. Smith");
        assert_eq!(
            result,
            r#"<strong class="pub-author-me">M. M. Chim</strong> and J. Smith"#
        );
    }

    #[test]
    fn test_emphasize_tight_initials() {
        let result = chim().emphasize("Chim, M.M., Smith, J.");
        assert_eq!(
            result,
            r#"<strong class="pub-author-me">Chim, M.M</strong>., Smith, J."#
        );
    }

    #[test]
    fn test_emphasize_no_match_unchanged() {
        let result = chim().emphasize("Smith, J. and Doe, A. B.");
        assert_eq!(result, "Smith, J. and Doe, A. B.");
    }

    #[test]
    fn test_none_is_identity() {
        let result = AuthorEmphasis::none().emphasize("Chim, M. M.");
        assert_eq!(result, "Chim, M. M.");
    }

    #[test]
    fn test_empty_surname_is_identity() {
        let emphasis = AuthorEmphasis::new("", &["M".to_owned()]).unwrap();
        assert_eq!(emphasis.emphasize("M. Chim"), "M. Chim");
    }
}
