use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// The classifier's closed label set, in output-index order.
///
/// Each label encodes both the fruit and its freshness state; the string
/// forms ("Fresh apple", ...) are the wire representation the classifier was
/// trained against.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
pub enum Label {
    #[serde(rename = "Fresh apple")]
    #[strum(serialize = "Fresh apple")]
    FreshApple,
    #[serde(rename = "Fresh banana")]
    #[strum(serialize = "Fresh banana")]
    FreshBanana,
    #[serde(rename = "Fresh orange")]
    #[strum(serialize = "Fresh orange")]
    FreshOrange,
    #[serde(rename = "Rotten apple")]
    #[strum(serialize = "Rotten apple")]
    RottenApple,
    #[serde(rename = "Rotten banana")]
    #[strum(serialize = "Rotten banana")]
    RottenBanana,
    #[serde(rename = "Rotten orange")]
    #[strum(serialize = "Rotten orange")]
    RottenOrange,
}

impl Label {
    pub const COUNT: usize = 6;

    /// Label for a classifier output index, `None` if out of range.
    pub fn from_index(index: usize) -> Option<Self> {
        use strum::IntoEnumIterator;
        Self::iter().nth(index)
    }

    pub fn category(self) -> Category {
        match self {
            Label::FreshApple | Label::FreshBanana | Label::FreshOrange => Category::Fresh,
            Label::RottenApple | Label::RottenBanana | Label::RottenOrange => Category::Rotten,
        }
    }
}

/// Coarse grouping derived from a label's freshness prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum Category {
    Fresh,
    Rotten,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct AnalyzeRequest {
    /// Base64-encoded image, optionally with a `data:` URL prefix.
    pub image: String,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct NutritionInfo {
    pub calories: String,
    pub benefits: String,
    pub color: String,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct AnalysisResponse {
    pub success: bool,
    pub prediction: Label,
    pub category: Category,
    pub freshness: f32,
    pub confidence: f32,
    pub nutrition: NutritionInfo,
    pub health_tips: Vec<String>,
    pub timestamp: String,
    pub image_saved: String,
    pub ai_model_used: String,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn labels_serialize_to_wire_strings() {
        assert_eq!(
            serde_json::to_string(&Label::FreshApple).unwrap(),
            "\"Fresh apple\""
        );
        assert_eq!(
            serde_json::to_string(&Label::RottenOrange).unwrap(),
            "\"Rotten orange\""
        );
        assert_eq!(Label::FreshBanana.to_string(), "Fresh banana");
    }

    #[test]
    fn label_index_order_matches_classifier_head() {
        let expected = [
            "Fresh apple",
            "Fresh banana",
            "Fresh orange",
            "Rotten apple",
            "Rotten banana",
            "Rotten orange",
        ];
        for (i, name) in expected.iter().enumerate() {
            assert_eq!(Label::from_index(i).unwrap().to_string(), *name);
        }
        assert_eq!(Label::iter().count(), Label::COUNT);
        assert!(Label::from_index(Label::COUNT).is_none());
    }

    #[test]
    fn category_follows_freshness_prefix() {
        for label in Label::iter() {
            let expected = if label.to_string().starts_with("Fresh") {
                Category::Fresh
            } else {
                Category::Rotten
            };
            assert_eq!(label.category(), expected);
        }
    }
}
