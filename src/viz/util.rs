//! Utility functions for visualization: locale mapping, tick values, label formatting.

use num_format::{Locale, ToFormattedString};

use super::types::VALUE_TICK_STEPS;

/// Map a user-provided locale tag to a `num_format::Locale` and its decimal separator char.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`, `ro`. Defaults to English.
pub fn map_locale(tag: &str) -> (&'static Locale, char) {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => (&Locale::de, ','),
        "fr" | "fr_fr" => (&Locale::fr, ','),
        "es" | "es_es" => (&Locale::es, ','),
        "it" | "it_it" => (&Locale::it, ','),
        "pt" | "pt_pt" | "pt_br" => (&Locale::pt, ','),
        "nl" | "nl_nl" => (&Locale::nl, ','),
        "ro" | "ro_ro" => (&Locale::ro, ','),
        _ => (&Locale::en, '.'), // default
    }
}

/// Rounded whole number with locale digit grouping (`30,000` vs `30.000`).
pub fn format_integer(v: f64, locale_tag: &str) -> String {
    let (locale, _) = map_locale(locale_tag);
    (v.round() as i64).to_formatted_string(locale)
}

/// Fixed decimals with the locale's decimal separator, no grouping.
pub fn format_decimal(v: f64, decimals: usize, locale_tag: &str) -> String {
    let (_, sep) = map_locale(locale_tag);
    let s = format!("{:.*}", decimals, v);
    if sep == '.' { s } else { s.replace('.', &sep.to_string()) }
}

/// Largest value, or `1.0` when the maximum is zero or there are no values,
/// so it can always be used as a divisor.
pub fn max_or_one(values: impl IntoIterator<Item = f64>) -> f64 {
    let max = values.into_iter().fold(f64::NEG_INFINITY, f64::max);
    if max == 0.0 || !max.is_finite() {
        1.0
    } else {
        max
    }
}

/// Evenly spaced tick values `i / 5 * max` for `i = 0..=5`.
pub fn value_ticks(max: f64) -> Vec<f64> {
    (0..=VALUE_TICK_STEPS)
        .map(|i| max * i as f64 / VALUE_TICK_STEPS as f64)
        .collect()
}
