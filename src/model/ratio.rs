//! Conversion ratio parsing
//!
//! DR rows carry the ratio either as a string such as `"5:1"` (DR units per
//! underlying unit) or as its reciprocal in a numeric field. Anything that
//! cannot be read degrades to 0, which downstream means "cannot price".

/// Parse a DR conversion ratio into DR units per underlying unit.
///
/// The primary string wins when it is non-blank, even if it turns out to be
/// malformed. Only when it is absent is the reciprocal field consulted.
pub fn parse_ratio(conversion_ratio: Option<&str>, conversion_ratio_r: Option<f64>) -> f64 {
    match conversion_ratio.map(str::trim).filter(|s| !s.is_empty()) {
        Some(ratio) => parse_ratio_str(ratio),
        None => match conversion_ratio_r {
            Some(r) if r.is_finite() && r > 0.0 => sanitize(1.0 / r),
            _ => 0.0,
        },
    }
}

fn parse_ratio_str(ratio: &str) -> f64 {
    let left = ratio.split(':').next().unwrap_or_default();
    let cleaned: String = left
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    cleaned.parse::<f64>().map(sanitize).unwrap_or(0.0)
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
