use crate::domain::{ChatChoice, FinishReason};

pub const CONFIDENCE_CEILING: f64 = 0.95;
pub const STOP_WITHOUT_LOGPROBS: f64 = 0.85;
pub const TRUNCATED: f64 = 0.65;
pub const UNKNOWN_FINISH: f64 = 0.5;

/// Heuristic confidence for a single completion choice.
///
/// A natural stop with log-probabilities averages `exp` of the first value of
/// each `top_logprobs` entry and caps the mean at [`CONFIDENCE_CEILING`].
/// Every other case maps to a fixed value. This is not a calibrated
/// probability.
pub fn estimate_confidence(choice: &ChatChoice) -> f64 {
    match choice.finish_reason() {
        FinishReason::Stop => choice
            .logprobs()
            .and_then(|lp| mean_likelihood(lp.leading_values()))
            .map(|mean| mean.min(CONFIDENCE_CEILING))
            .unwrap_or(STOP_WITHOUT_LOGPROBS),
        FinishReason::Length => TRUNCATED,
        FinishReason::Other(_) => UNKNOWN_FINISH,
    }
}

fn mean_likelihood(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v.exp(), n + 1));
    (count > 0).then(|| sum / count as f64)
}
