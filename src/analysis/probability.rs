//! Closed-form birthday-paradox probability.
//!
//! With `d` equally likely days and `n` people:
//!   P(no shared birthday) = Π_{i=0}^{n-1} (d − i) / d
//!   P(at least one shared) = 1 − P(no shared birthday)
//!
//! Feb 29 is ignored (365-day model). This keeps the textbook 50.73% value
//! at n = 23.

/// Days in the probability model's year.
pub const DAYS_IN_YEAR: usize = 365;

/// Probability that `n` people all have distinct birthdays.
pub fn probability_of_no_collision(n: usize) -> f64 {
    // Pigeonhole: some factor of the product is zero from here on
    if n > DAYS_IN_YEAR {
        return 0.0;
    }
    let days = DAYS_IN_YEAR as f64;
    (0..n).fold(1.0, |acc, i| acc * (days - i as f64) / days)
}

/// Probability that at least two of `n` people share a birthday (0.0–1.0).
pub fn theoretical_probability(n: usize) -> f64 {
    (1.0 - probability_of_no_collision(n)).clamp(0.0, 1.0)
}

/// Express a ratio as a percentage.
pub fn to_percentage(ratio: f64) -> f64 {
    ratio * 100.0
}
