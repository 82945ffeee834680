pub mod model;
pub mod preprocess;

use shared::Label;

#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("Invalid image: {0}")]
    InvalidImage(String),
    #[error("Model execution failed: {0}")]
    Model(#[from] tch::TchError),
    #[error("Classifier returned {got} scores, expected {expected}")]
    UnexpectedOutput { got: usize, expected: usize },
    #[error("Internal inference error: {0}")]
    Internal(String),
}

impl InferenceError {
    /// Malformed input is the caller's fault and maps to a 400; everything
    /// else is a server-side failure.
    pub fn is_client_error(&self) -> bool {
        matches!(self, InferenceError::InvalidImage(_))
    }
}

/// Argmax over the probability vector, as (label, confidence in percent).
pub fn top_prediction(probabilities: &[f32]) -> Result<(Label, f32), InferenceError> {
    if probabilities.len() != Label::COUNT {
        return Err(InferenceError::UnexpectedOutput {
            got: probabilities.len(),
            expected: Label::COUNT,
        });
    }

    let (index, probability) = probabilities
        .iter()
        .copied()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .unwrap_or((0, 0.0));

    let label = Label::from_index(index).ok_or(InferenceError::UnexpectedOutput {
        got: probabilities.len(),
        expected: Label::COUNT,
    })?;
    Ok((label, probability * 100.0))
}
