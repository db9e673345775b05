//! Best-effort transliteration of display texts into ASCII.
//!
//! Slugs and tag values are derived from display texts that are frequently
//! written in non-Latin scripts. A [`Transliterator`] maps such text into
//! ASCII before normalisation. Transliteration never blocks identifier
//! generation: when it fails the original text is used unchanged and the
//! fallback is reported through [`Transliterated::fell_back`].

use deunicode::deunicode_char;
use tracing::warn;

/// Failure raised by a transliterator that could not process its input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("transliteration failed: {message}")]
pub struct TransliterationError {
    message: String,
}

impl TransliterationError {
    /// Create an error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Maps arbitrary Unicode text into ASCII.
///
/// Untranslatable characters are dropped rather than reported; an error is
/// reserved for failures of the transliterator itself.
#[cfg_attr(test, mockall::automock)]
pub trait Transliterator: Send + Sync {
    /// Transliterate `text` into ASCII.
    fn transliterate(&self, text: &str) -> Result<String, TransliterationError>;
}

/// Transliterator backed by the `deunicode` tables.
///
/// Cyrillic, Greek and most other alphabetic scripts map to their common
/// Latin romanisation (`"Беговые"` becomes `"Begovye"`). Characters with no
/// table entry are dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeunicodeTransliterator;

impl Transliterator for DeunicodeTransliterator {
    fn transliterate(&self, text: &str) -> Result<String, TransliterationError> {
        let mut out = String::with_capacity(text.len());
        for ch in text.chars() {
            if ch.is_ascii() {
                out.push(ch);
            } else if let Some(mapped) = deunicode_char(ch) {
                out.push_str(mapped);
            }
        }
        Ok(out)
    }
}

/// Whether transliteration succeeded or the original text was kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransliterationOutcome {
    /// The transliterator produced the text.
    Transliterated,
    /// The transliterator failed and the original text was used unchanged.
    FellBack,
}

/// Result of [`transliterate_best_effort`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transliterated {
    text: String,
    outcome: TransliterationOutcome,
}

impl Transliterated {
    /// The text to normalise.
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// How the text was produced.
    pub fn outcome(&self) -> TransliterationOutcome {
        self.outcome
    }

    /// True when the transliterator failed and the input was kept.
    pub fn fell_back(&self) -> bool {
        self.outcome == TransliterationOutcome::FellBack
    }
}

/// Transliterate `text`, falling back to the original on failure.
///
/// A fallback is logged at `warn` level and surfaced in the returned value.
pub fn transliterate_best_effort(
    transliterator: &dyn Transliterator,
    text: &str,
) -> Transliterated {
    match transliterator.transliterate(text) {
        Ok(text) => Transliterated {
            text,
            outcome: TransliterationOutcome::Transliterated,
        },
        Err(error) => {
            warn!(%error, "transliteration failed; using original text");
            Transliterated {
                text: text.to_owned(),
                outcome: TransliterationOutcome::FellBack,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Hello", "Hello")]
    #[case("Беговые кроссовки", "Begovye krossovki")]
    #[case("Crème brûlée", "Creme brulee")]
    #[case("Straße", "Strasse")]
    fn deunicode_romanises_common_scripts(#[case] input: &str, #[case] expected: &str) {
        let out = DeunicodeTransliterator
            .transliterate(input)
            .expect("deunicode never fails");
        assert_eq!(out, expected);
    }

    #[rstest]
    fn deunicode_output_is_ascii() {
        let out = DeunicodeTransliterator
            .transliterate("日本語 🚀 Ωmega")
            .expect("deunicode never fails");
        assert!(out.is_ascii(), "unexpected non-ASCII output: {out:?}");
    }

    #[rstest]
    fn best_effort_reports_success() {
        let result = transliterate_best_effort(&DeunicodeTransliterator, "Обувь");
        assert!(result.text().starts_with("Obuv"), "got {:?}", result.text());
        assert_eq!(result.outcome(), TransliterationOutcome::Transliterated);
        assert!(!result.fell_back());
    }

    #[rstest]
    fn best_effort_falls_back_to_original_text() {
        let mut failing = MockTransliterator::new();
        failing
            .expect_transliterate()
            .times(1)
            .returning(|_| Err(TransliterationError::new("table missing")));

        let result = transliterate_best_effort(&failing, "Обувь");

        assert!(result.fell_back());
        assert_eq!(result.text(), "Обувь");
    }
}
