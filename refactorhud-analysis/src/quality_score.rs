//! Code Quality Score
//!
//! Composite score in `[0, 100]` derived from the analyzer's effective lines
//! of code and the file's (or track's) total cyclomatic complexity. Higher is
//! better; an empty file scores 100.

/// Weighted penalty score calculator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityScoreCalculator {
    complexity_weight: f64,
    loc_weight: f64,
}

impl Default for QualityScoreCalculator {
    fn default() -> Self {
        Self {
            complexity_weight: 2.0,
            loc_weight: 0.1,
        }
    }
}

impl QualityScoreCalculator {
    /// Calculator with custom weights; both must be non-negative for the
    /// score to stay monotonic.
    pub fn new(complexity_weight: f64, loc_weight: f64) -> Self {
        Self {
            complexity_weight: complexity_weight.max(0.0),
            loc_weight: loc_weight.max(0.0),
        }
    }

    /// Score for `effective_loc` lines carrying `total_complexity`, rounded to
    /// two decimal places
    pub fn calculate(&self, effective_loc: f64, total_complexity: f64) -> f64 {
        let penalty = (self.complexity_weight * total_complexity + self.loc_weight * effective_loc) / 100.0 * 100.0;
        round_to_hundredths((100.0 - penalty).clamp(0.0, 100.0))
    }
}

/// [`QualityScoreCalculator::calculate`] with the default weights
pub fn quality_score(effective_loc: u64, total_complexity: f64) -> f64 {
    QualityScoreCalculator::default().calculate(effective_loc as f64, total_complexity)
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
