use shared::{Category, Label};

/// Clamping bounds for the freshness percentage.
///
/// These are presentation heuristics, not calibrated probabilities: raw model
/// confidence is compressed into a per-category band so the displayed score
/// always looks plausible to an end user. The defaults have no statistical
/// derivation and should only change with product input, so they live in
/// configuration rather than in the formula.
#[derive(Debug, Clone, Copy)]
pub struct ScoringBounds {
    pub fresh_floor: f32,
    pub fresh_ceil: f32,
    pub rotten_floor: f32,
    pub rotten_ceil: f32,
}

impl Default for ScoringBounds {
    fn default() -> Self {
        Self {
            fresh_floor: 70.0,
            fresh_ceil: 98.0,
            rotten_floor: 10.0,
            rotten_ceil: 45.0,
        }
    }
}

impl ScoringBounds {
    /// Bounds from `FRESHNESS_*` environment variables, falling back to the
    /// defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            fresh_floor: env_f32("FRESHNESS_FRESH_FLOOR", defaults.fresh_floor),
            fresh_ceil: env_f32("FRESHNESS_FRESH_CEIL", defaults.fresh_ceil),
            rotten_floor: env_f32("FRESHNESS_ROTTEN_FLOOR", defaults.rotten_floor),
            rotten_ceil: env_f32("FRESHNESS_ROTTEN_CEIL", defaults.rotten_ceil),
        }
    }
}

fn env_f32(key: &str, default: f32) -> f32 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Map a prediction to the bounded freshness percentage. Fresh labels clamp
/// confidence directly; rotten labels clamp the inverted confidence, so a
/// high-confidence rotten call reads as a low freshness score.
pub fn freshness_percentage(label: Label, confidence: f32, bounds: &ScoringBounds) -> f32 {
    match label.category() {
        Category::Fresh => confidence.clamp(bounds.fresh_floor, bounds.fresh_ceil),
        Category::Rotten => (100.0 - confidence).clamp(bounds.rotten_floor, bounds.rotten_ceil),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn fresh_band_boundaries() {
        let bounds = ScoringBounds::default();
        assert_eq!(freshness_percentage(Label::FreshApple, 0.0, &bounds), 70.0);
        assert_eq!(
            freshness_percentage(Label::FreshApple, 100.0, &bounds),
            98.0
        );
        assert_eq!(freshness_percentage(Label::FreshApple, 90.0, &bounds), 90.0);
    }

    #[test]
    fn rotten_band_boundaries() {
        let bounds = ScoringBounds::default();
        assert_eq!(
            freshness_percentage(Label::RottenApple, 0.0, &bounds),
            45.0
        );
        assert_eq!(
            freshness_percentage(Label::RottenApple, 100.0, &bounds),
            10.0
        );
        assert_eq!(
            freshness_percentage(Label::RottenBanana, 60.0, &bounds),
            40.0
        );
    }

    #[test]
    fn from_env_overrides_and_falls_back() {
        unsafe {
            std::env::set_var("FRESHNESS_FRESH_FLOOR", "60");
            std::env::set_var("FRESHNESS_ROTTEN_CEIL", "not a number");
        }
        let bounds = ScoringBounds::from_env();
        unsafe {
            std::env::remove_var("FRESHNESS_FRESH_FLOOR");
            std::env::remove_var("FRESHNESS_ROTTEN_CEIL");
        }

        assert_eq!(bounds.fresh_floor, 60.0);
        // Unparseable and unset values fall back to the defaults.
        assert_eq!(bounds.rotten_ceil, 45.0);
        assert_eq!(bounds.fresh_ceil, 98.0);
        assert_eq!(bounds.rotten_floor, 10.0);
    }

    #[test]
    fn scores_stay_in_band_for_any_confidence() {
        let bounds = ScoringBounds::default();
        for label in Label::iter() {
            for confidence in [0.0, 1.0, 33.3, 50.0, 69.9, 70.0, 97.0, 100.0] {
                let freshness = freshness_percentage(label, confidence, &bounds);
                match label.category() {
                    shared::Category::Fresh => {
                        assert!((70.0..=98.0).contains(&freshness), "{label} {confidence}")
                    }
                    shared::Category::Rotten => {
                        assert!((10.0..=45.0).contains(&freshness), "{label} {confidence}")
                    }
                }
            }
        }
    }
}
