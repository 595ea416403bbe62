/// One entry of the advice table: a label and the sentence it triggers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdviceRule {
    pub label: String,
    pub message: String,
}

impl AdviceRule {
    pub fn new(label: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            message: message.into(),
        }
    }
}

/// Rule-based nutrition advice
///
/// Rules are checked independently and in declaration order, so several
/// can fire for the same input. When none fires, the fallback prompt is
/// returned on its own.
#[derive(Debug, Clone)]
pub struct AdviceEngine {
    rules: Vec<AdviceRule>,
    fallback: String,
}

impl AdviceEngine {
    pub fn new(rules: Vec<AdviceRule>, fallback: impl Into<String>) -> Self {
        Self {
            rules,
            fallback: fallback.into(),
        }
    }

    pub fn rules(&self) -> &[AdviceRule] {
        &self.rules
    }

    /// Advice for the given recognized labels
    pub fn advise<S: AsRef<str>>(&self, recognized_items: &[S]) -> Vec<String> {
        let mut advice: Vec<String> = self
            .rules
            .iter()
            .filter(|rule| recognized_items.iter().any(|item| item.as_ref() == rule.label))
            .map(|rule| rule.message.clone())
            .collect();

        if advice.is_empty() {
            advice.push(self.fallback.clone());
        }

        advice
    }
}

impl Default for AdviceEngine {
    fn default() -> Self {
        Self::new(
            vec![
                AdviceRule::new(
                    "Healthy food",
                    "Healthy food : Mangez des aliments riches en nutriments pour maintenir une bonne santé.",
                ),
                AdviceRule::new(
                    "Healthy dishes",
                    "Healthy dishes : Privilégiez les plats équilibrés riches en légumes et en protéines maigres.",
                ),
                AdviceRule::new(
                    "pomme",
                    "Les pommes sont riches en fibres et idéales pour un en-cas sain.",
                ),
            ],
            "Veuillez ajouter une image contenant un aliment reconnaissable pour recevoir des conseils.",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const APPLE: &str = "Les pommes sont riches en fibres et idéales pour un en-cas sain.";
    const FALLBACK: &str =
        "Veuillez ajouter une image contenant un aliment reconnaissable pour recevoir des conseils.";

    #[test]
    fn test_single_match() {
        let engine = AdviceEngine::default();
        assert_eq!(engine.advise(&["pomme"]), vec![APPLE]);
    }

    #[test]
    fn test_no_match_returns_fallback_only() {
        let engine = AdviceEngine::default();
        let empty: [&str; 0] = [];
        assert_eq!(engine.advise(&empty), vec![FALLBACK]);
        assert_eq!(engine.advise(&["banane"]), vec![FALLBACK]);
    }

    #[test]
    fn test_order_follows_rules_not_input() {
        let engine = AdviceEngine::default();
        let advice = engine.advise(&["pomme", "Healthy food"]);

        assert_eq!(advice.len(), 2);
        assert!(advice[0].starts_with("Healthy food :"));
        assert_eq!(advice[1], APPLE);
    }

    #[test]
    fn test_duplicates_fire_once() {
        let engine = AdviceEngine::default();
        assert_eq!(engine.advise(&["pomme", "pomme"]), vec![APPLE]);
    }

    #[test]
    fn test_labels_are_case_sensitive() {
        let engine = AdviceEngine::default();
        assert_eq!(engine.advise(&["Pomme"]), vec![FALLBACK]);
    }

    #[test]
    fn test_custom_rules() {
        let engine = AdviceEngine::new(vec![AdviceRule::new("kiwi", "Vitamine C !")], "rien");
        assert_eq!(engine.advise(&["kiwi"]), vec!["Vitamine C !"]);
        assert_eq!(engine.advise(&["pomme"]), vec!["rien"]);
    }
}
