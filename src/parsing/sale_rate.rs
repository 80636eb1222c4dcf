use std::sync::LazyLock;

use regex::Regex;

/// Sort key for "unknown" sales: below every parsed rate and below unparseable text.
pub const UNKNOWN_SALES: f64 = -1.0;

// "12.5/mo" anywhere in the text, e.g. "~12.5/mo (est.)"
static MONTHLY_RATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)/mo").expect("monthly rate pattern is valid")
});

/// Derives the ordering key of a record from its free-text sales field.
///
/// A "<number>/mo" rate wins, the literal "unknown" (any case) maps to
/// [`UNKNOWN_SALES`], and anything else counts as zero.
pub fn sort_key(sales_text: &str) -> f64 {
    if let Some(rate) = MONTHLY_RATE.captures(sales_text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
    {
        return rate;
    }

    if sales_text.trim().eq_ignore_ascii_case("unknown") { UNKNOWN_SALES } else { 0.0 }
}
