use shared::Label;

/// Static per-label nutrition facts; `calories` is per 100g.
pub struct NutritionFact {
    pub calories: u32,
    pub benefits: &'static str,
    pub color: &'static str,
}

/// Exhaustive over the label set, so a missing entry is a compile error
/// rather than a runtime default.
pub fn nutrition_for(label: Label) -> NutritionFact {
    match label {
        Label::FreshApple => NutritionFact {
            calories: 52,
            benefits: "Rich in fiber and antioxidants",
            color: "Red or Green",
        },
        Label::FreshBanana => NutritionFact {
            calories: 89,
            benefits: "High in potassium and natural sugars",
            color: "Yellow",
        },
        Label::FreshOrange => NutritionFact {
            calories: 47,
            benefits: "High in vitamin C and supports immune function",
            color: "Orange",
        },
        Label::RottenApple => NutritionFact {
            calories: 40,
            benefits: "Avoid consumption",
            color: "Brown or mushy",
        },
        Label::RottenBanana => NutritionFact {
            calories: 75,
            benefits: "Avoid consumption",
            color: "Brown or mushy",
        },
        Label::RottenOrange => NutritionFact {
            calories: 35,
            benefits: "Avoid consumption",
            color: "Brown or mushy",
        },
    }
}

pub fn health_tips_for(label: Label) -> [&'static str; 3] {
    match label {
        Label::FreshApple => [
            "Supports digestion and heart health",
            "Enjoy raw or in salads",
            "Great in overnight oats or smoothies",
        ],
        Label::FreshBanana => [
            "Boosts energy and supports muscle function",
            "Best enjoyed as a quick breakfast or smoothie",
            "Slice over cereal or toast with peanut butter",
        ],
        Label::FreshOrange => [
            "Strengthens immunity and skin health",
            "Enjoy fresh or as juice (without added sugar)",
            "Add segments to salads or yogurt bowls",
        ],
        Label::RottenApple => [
            "May contain harmful mold and toxins",
            "Do not try to cut off bad parts",
            "Discard properly",
        ],
        Label::RottenBanana => [
            "Fermentation can lead to spoilage",
            "Toss if you see grayish mold or leakage",
            "Use only if overripe, not spoiled",
        ],
        Label::RottenOrange => [
            "Risk of mold exposure",
            "Discard if squishy or smells musty",
            "Avoid cutting away bad parts",
        ],
    }
}

/// Fallback fact for labels outside the known set, e.g. when the tables are
/// consulted with a label parsed from external input.
pub fn default_nutrition() -> NutritionFact {
    NutritionFact {
        calories: 50,
        benefits: "Standard nutritional value",
        color: "Normal",
    }
}

pub fn default_health_tips() -> [&'static str; 3] {
    [
        "Consume fresh fruits daily",
        "Store in cool, dry place",
        "Wash before eating",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_label_has_real_facts() {
        let default = default_nutrition();
        for label in Label::iter() {
            let fact = nutrition_for(label);
            assert_ne!(fact.benefits, default.benefits, "{label}");
            assert!(fact.calories > 0);
            assert_eq!(health_tips_for(label).len(), 3);
        }
    }

    #[test]
    fn documented_defaults() {
        let fact = default_nutrition();
        assert_eq!(fact.calories, 50);
        assert_eq!(fact.benefits, "Standard nutritional value");
        assert_eq!(fact.color, "Normal");
        assert_eq!(
            default_health_tips(),
            [
                "Consume fresh fruits daily",
                "Store in cool, dry place",
                "Wash before eating",
            ]
        );
    }

    #[test]
    fn fresh_apple_calories_match_table() {
        assert_eq!(nutrition_for(Label::FreshApple).calories, 52);
        assert_eq!(nutrition_for(Label::RottenOrange).calories, 35);
    }
}
