pub mod facts;
pub mod scoring;

use image::DynamicImage;
use log::{info, warn};
use shared::{Category, Label};

use crate::inference::{self, InferenceError, model::ModelState, preprocess};
use self::scoring::ScoringBounds;

/// Result served when the model artifact failed to load. An operability
/// fallback, not a product feature; the response marks it via
/// `ai_model_used: "dummy"`.
pub const DUMMY_LABEL: Label = Label::FreshApple;
pub const DUMMY_CONFIDENCE: f32 = 95.0;
pub const DUMMY_MODEL_NAME: &str = "dummy";

/// One scored prediction, before response assembly.
#[derive(Debug)]
pub struct Analysis {
    pub label: Label,
    pub category: Category,
    pub confidence: f32,
    pub freshness: f32,
    pub model_used: String,
}

impl Analysis {
    fn scored(label: Label, confidence: f32, bounds: &ScoringBounds, model_used: String) -> Self {
        Self {
            label,
            category: label.category(),
            confidence,
            freshness: scoring::freshness_percentage(label, confidence, bounds),
            model_used,
        }
    }
}

/// Run the pipeline on a decoded image: normalize, classify, score. With the
/// model unavailable the fixed dummy prediction is scored instead, so the
/// request still succeeds in degraded mode.
pub fn analyze(
    image: &DynamicImage,
    model: &ModelState,
    bounds: &ScoringBounds,
) -> Result<Analysis, InferenceError> {
    match model {
        ModelState::Ready(classifier) => {
            let input = preprocess::normalize(image);
            let probabilities = classifier.predict(&input)?;
            let (label, confidence) = inference::top_prediction(&probabilities)?;
            info!("prediction: {} ({:.2}% confidence)", label, confidence);
            Ok(Analysis::scored(
                label,
                confidence,
                bounds,
                classifier.name().to_string(),
            ))
        }
        ModelState::Unavailable { .. } => {
            warn!("model unavailable, serving dummy prediction");
            Ok(Analysis::scored(
                DUMMY_LABEL,
                DUMMY_CONFIDENCE,
                bounds,
                DUMMY_MODEL_NAME.to_string(),
            ))
        }
    }
}
