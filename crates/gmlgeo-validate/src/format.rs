//! Text rendering of coordinates for diagnostics.

use crate::result::Coordinate;

const MIN_DECIMALS: usize = 3;
const MAX_DECIMALS: usize = 10;

/// Format an ordinate with at least 3 and at most 10 decimals.
pub fn format_value(value: f64) -> String {
    let s = format!("{:.*}", MAX_DECIMALS, value);
    let Some(dot) = s.find('.') else {
        return s;
    };
    let keep = s[dot + 1..]
        .trim_end_matches('0')
        .len()
        .max(MIN_DECIMALS);
    s[..dot + 1 + keep].to_string()
}

/// `Problem location: x y[ z]`
pub fn problem_location(c: &Coordinate) -> String {
    match c.z {
        Some(z) => format!(
            "Problem location: {} {} {}",
            format_value(c.x),
            format_value(c.y),
            format_value(z)
        ),
        None => format!("Problem location: {} {}", format_value(c.x), format_value(c.y)),
    }
}
