//! Human-friendly rendering of probabilities.

/// Largest denominator tried when looking for an exact fraction.
const MAX_DENOMINATOR: u64 = 20;
const FRACTION_TOLERANCE: f64 = 1e-4;

/// Renders `p` as a reduced fraction (`"1/6"`) when some denominator up to 20
/// matches it within 1e-4, or as a decimal with three places otherwise.
pub fn format_probability(p: f64) -> String {
    for denominator in 1..=MAX_DENOMINATOR {
        let scaled = p * denominator as f64;
        let rounded = scaled.round();
        if (scaled - rounded).abs() < FRACTION_TOLERANCE {
            let numerator = rounded as i64;
            let divisor = gcd(numerator.unsigned_abs(), denominator);
            return format!(
                "{}/{}",
                numerator / divisor as i64,
                denominator / divisor
            );
        }
    }
    format!("{p:.3}")
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}
