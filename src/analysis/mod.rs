//! Resume analysis engine.
//!
//! Pure functions over text: document extraction, skill detection, scoring
//! and job matching. No I/O beyond the bytes handed in.

pub mod extract;
pub mod matcher;
pub mod scoring;
pub mod skills;

pub use extract::{extract_text, normalize_text};
pub use matcher::match_resume;
pub use scoring::analyze;
pub use skills::find_skills;

/// Clamp to `[0, 100]` and round to one decimal place.
pub fn round_score(score: f64) -> f64 {
    (score.clamp(0.0, 100.0) * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_score() {
        assert_eq!(round_score(72.449), 72.4);
        assert_eq!(round_score(72.45), 72.5);
        assert_eq!(round_score(-3.0), 0.0);
        assert_eq!(round_score(140.0), 100.0);
    }
}
