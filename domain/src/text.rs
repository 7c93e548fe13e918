//! Input validation and normalization for analyzed text.

use crate::error::{Error, InputErrorKind};

const KEPT_PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':', '\'', '-'];

/// Rejects text that is empty, whitespace-only, or longer than `max_chars` characters.
pub fn validate(text: &str, max_chars: usize) -> Result<(), Error> {
    if text.trim().is_empty() {
        return Err(Error::input(InputErrorKind::EmptyText));
    }
    if text.chars().count() > max_chars {
        return Err(Error::input(InputErrorKind::TextTooLong { max_chars }));
    }
    Ok(())
}

/// Trims, collapses whitespace runs to one space, then drops every character
/// that is not a word character, whitespace or basic punctuation.
pub fn clean(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .filter(|c| {
            c.is_alphanumeric() || *c == '_' || c.is_whitespace() || KEPT_PUNCTUATION.contains(c)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainErrorKind;

    #[test]
    fn clean_collapses_whitespace_and_trims() {
        assert_eq!(clean("  I am\n\n so   tired \t"), "I am so tired");
    }

    #[test]
    fn clean_keeps_basic_punctuation_and_drops_symbols() {
        assert_eq!(
            clean("Well... it's fine, I guess?! #mood @work :-)"),
            "Well... it's fine, I guess?! mood work :-"
        );
    }

    #[test]
    fn clean_keeps_non_ascii_letters() {
        assert_eq!(clean("¡Qué día tan bueno!"), "Qué día tan bueno!");
    }

    #[test]
    fn clean_can_leave_nothing() {
        assert_eq!(clean("$%^&*"), "");
    }

    #[test]
    fn validate_rejects_whitespace_only_text() {
        let err = validate(" \n\t ", 5000).unwrap_err();
        assert_eq!(
            err.error_kind,
            DomainErrorKind::Input(InputErrorKind::EmptyText)
        );
    }

    #[test]
    fn validate_counts_characters_not_bytes() {
        assert!(validate(&"é".repeat(10), 10).is_ok());
        let err = validate(&"a".repeat(11), 10).unwrap_err();
        assert_eq!(
            err.error_kind,
            DomainErrorKind::Input(InputErrorKind::TextTooLong { max_chars: 10 })
        );
    }
}
