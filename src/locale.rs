//! Locale resolution
//!
//! Maps caller-supplied tags onto `num_format` locales, which carry CLDR's
//! group separator, decimal separator and grouping style. Lookups take an
//! explicit tag; there is no notion of a "current" locale here.

use crate::error::{Error, Result};
use num_format::Locale;

/// Locale used when a tag cannot be resolved
pub const DEFAULT_LOCALE: &str = "en-US";

/// Locale names to try for a tag, most specific first
///
/// Accepts BCP-47 (`de-CH`, `zh-Hant-TW`, `en-US-u-nu-latn`) and POSIX
/// (`de_DE.UTF-8`) spellings in any case. Extensions are dropped.
fn candidate_names(tag: &str) -> Vec<String> {
    // POSIX locales carry an encoding and modifier: de_DE.UTF-8@euro
    let tag = tag
        .split(|c: char| c == '.' || c == '@')
        .next()
        .unwrap_or_default()
        .trim();
    let mut subtags = tag.split(|c: char| c == '-' || c == '_');

    let language = subtags.next().unwrap_or_default().to_ascii_lowercase();
    if !(2..=3).contains(&language.len()) || !language.bytes().all(|b| b.is_ascii_alphabetic()) {
        return Vec::new();
    }

    let mut script = None;
    let mut region = None;
    for subtag in subtags {
        let is_alpha = subtag.bytes().all(|b| b.is_ascii_alphabetic());
        let is_digit = subtag.bytes().all(|b| b.is_ascii_digit());
        match subtag.len() {
            4 if is_alpha && script.is_none() && region.is_none() => {
                let (first, rest) = subtag.split_at(1);
                script = Some(format!(
                    "{}{}",
                    first.to_ascii_uppercase(),
                    rest.to_ascii_lowercase()
                ));
            }
            2 if is_alpha => {
                region = Some(subtag.to_ascii_uppercase());
                break;
            }
            3 if is_digit => {
                region = Some(subtag.to_string());
                break;
            }
            _ => break,
        }
    }

    let mut names = Vec::with_capacity(4);
    if let (Some(script), Some(region)) = (&script, &region) {
        names.push(format!("{}-{}-{}", language, script, region));
    }
    if let Some(script) = &script {
        names.push(format!("{}-{}", language, script));
    }
    if let Some(region) = &region {
        names.push(format!("{}-{}", language, region));
    }
    names.push(language);
    names
}

fn lookup(tag: &str) -> Option<Locale> {
    candidate_names(tag)
        .iter()
        .find_map(|name| Locale::from_name(name).ok())
}

/// Resolve a tag, failing with `UnknownLocale` when it is not supported
///
/// An exact language-script-region match wins; otherwise progressively
/// shorter names are tried down to the bare language.
pub fn resolve(tag: &str) -> Result<Locale> {
    lookup(tag).ok_or_else(|| Error::UnknownLocale(tag.to_string()))
}

/// Resolve a tag, falling back to `fallback` and then to [`DEFAULT_LOCALE`]
pub fn resolve_or(tag: &str, fallback: &str) -> Locale {
    if let Some(locale) = lookup(tag) {
        return locale;
    }

    tracing::warn!(
        locale = tag,
        fallback = fallback,
        "Unknown locale, formatting with fallback"
    );
    lookup(fallback)
        .or_else(|| lookup(DEFAULT_LOCALE))
        .unwrap_or(Locale::en)
}

/// Resolve a tag, falling back to [`DEFAULT_LOCALE`]
pub fn resolve_or_default(tag: &str) -> Locale {
    resolve_or(tag, DEFAULT_LOCALE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_format::Grouping;

    #[test]
    fn test_region_and_language_match() {
        let de_de = resolve("de-DE").unwrap();
        assert_eq!(de_de.separator(), ".");
        assert_eq!(de_de.decimal(), ",");

        let ch = resolve("de-CH").unwrap();
        assert_eq!(ch, Locale::de_CH);
        assert_eq!(ch.decimal(), ".");
    }

    #[test]
    fn test_case_and_posix_spellings() {
        assert_eq!(resolve("DE-ch").unwrap(), Locale::de_CH);
        assert_eq!(resolve("de_CH").unwrap(), Locale::de_CH);
        assert_eq!(resolve("de_DE.UTF-8").unwrap(), Locale::de);
        assert_eq!(resolve("fr_FR@euro").unwrap(), Locale::fr);
    }

    #[test]
    fn test_candidate_names() {
        assert_eq!(
            candidate_names("zh_hant_tw"),
            vec!["zh-Hant-TW", "zh-Hant", "zh-TW", "zh"]
        );
        assert_eq!(candidate_names("en-US-u-nu-latn"), vec!["en-US", "en"]);
        assert_eq!(candidate_names("es-419"), vec!["es-419", "es"]);
        assert!(candidate_names("C").is_empty());
        assert!(candidate_names("").is_empty());
    }

    #[test]
    fn test_language_fallback() {
        // default-content regions carry no data of their own
        assert_eq!(resolve("it-IT").unwrap(), Locale::it);
        assert_eq!(resolve("en-US-u-nu-latn").unwrap().decimal(), ".");
    }

    #[test]
    fn test_unknown_locale() {
        assert!(matches!(resolve("xx-ZZ"), Err(Error::UnknownLocale(_))));
        assert!(matches!(resolve(""), Err(Error::UnknownLocale(_))));
        assert!(matches!(resolve("C"), Err(Error::UnknownLocale(_))));
    }

    #[test]
    fn test_resolve_or_default() {
        let fallback = resolve_or_default("xx-ZZ");
        assert_eq!(fallback.separator(), ",");
        assert_eq!(fallback.decimal(), ".");
        assert_eq!(resolve_or("xx-ZZ", "de-DE"), Locale::de);
        assert_eq!(resolve_or("xx-ZZ", "yy").decimal(), ".");
        assert_eq!(resolve_or("fr", "de-DE"), Locale::fr);
    }

    #[test]
    fn test_indian_grouping_style() {
        assert_eq!(resolve("en-IN").unwrap().grouping(), Grouping::Indian);
        assert_eq!(resolve("en-US").unwrap().grouping(), Grouping::Standard);
    }
}
