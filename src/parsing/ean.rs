use std::path::{Path, PathBuf};

/// Digits-only form of an EAN cell, used for image names and lookup URLs.
///
/// Numeric cells sometimes come back rendered as floats ("3600523614530.0"), the
/// zero fraction is dropped before filtering so it does not leak extra digits.
pub fn normalize_ean(raw: &str) -> String {
    let raw = raw.trim();

    let integral = match raw.split_once('.') {
        Some((int, frac)) if !frac.is_empty() && frac.chars().all(|c| c == '0') => int,
        _ => raw,
    };

    let mut ean = String::with_capacity(integral.len());
    for c in integral.chars() {
        if c.is_ascii_digit() { ean.push(c) }
    }
    ean
}

/// Fills `{ean}` in the lookup template. No request is made here.
pub fn lookup_url(template: &str, ean: &str) -> String {
    template.replace("{ean}", &normalize_ean(ean))
}

/// Where the product image for this EAN is expected to live.
pub fn image_path(image_dir: &Path, ean: &str) -> PathBuf {
    image_dir.join(format!("{}.png", normalize_ean(ean)))
}
