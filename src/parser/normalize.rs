use std::sync::LazyLock;

use regex::Regex;

use super::error::ExtractError;

static WIDTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[;\s])width:\s*(\d+(?:\.\d+)?)\s*%").unwrap());

/// Age returned for "Late teens" style life expectancies.
const LATE_TEENS_AGE: f64 = 18.0;

/// Strip markup whitespace and the stray "15 " the comparison page leaks
/// into cell text.
pub fn clean_text(s: &str) -> String {
    s.replace('\n', "")
        .replace('\t', "")
        .replace("  ", "")
        .replace("15 ", "")
}

/// `"width: 40%;"` → 2.0 on the 0..=5 scale.
pub fn clean_percentage(style: &str) -> Result<f64, ExtractError> {
    let pct: f64 = WIDTH_RE
        .captures(style)
        .and_then(|c| c[1].parse().ok())
        .ok_or_else(|| ExtractError::BadPercentage(style.to_string()))?;
    Ok(5.0 * (pct / 100.0))
}

/// Round a bar value to the ordinal 1..=5 scale.
pub fn bar_rating(value: f64) -> u8 {
    value.round().clamp(1.0, 5.0) as u8
}

/// Flip a 1..=5 rating so that 5 always means "most of this trait".
pub fn reverse_scale(rating: u8) -> u8 {
    6 - rating.clamp(1, 5)
}

/// Mean of `"A-B years"`, or the single bound left after scrubbing noise
/// such as `+` and `~`.
pub fn estimate_life_exp(text: &str) -> Result<f64, ExtractError> {
    let value = match parse_range(&text.replace(" years", "")) {
        Some(mean) => mean,
        None => {
            let scrubbed = ["+", "\n", "\t", " ", "years", "~"]
                .iter()
                .fold(text.to_string(), |acc, noise| acc.replace(noise, ""));
            if scrubbed.to_lowercase().contains("lateteens") {
                LATE_TEENS_AGE
            } else {
                scrubbed
                    .parse::<f64>()
                    .map_err(|_| ExtractError::BadLifeExpectancy(text.to_string()))?
            }
        }
    };

    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ExtractError::BadLifeExpectancy(text.to_string()))
    }
}

fn parse_range(range: &str) -> Option<f64> {
    let parts = range
        .split('-')
        .map(|p| p.trim().parse::<f64>().ok())
        .collect::<Option<Vec<f64>>>()?;
    if parts.is_empty() {
        return None;
    }
    Some(parts.iter().sum::<f64>() / parts.len() as f64)
}
