use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use validator::{Validate, ValidationError};

/// A profile attribute sent either as free text or as a list of entries
///
/// Any other JSON value is kept as-is in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProfileField {
    Text(String),
    List(Vec<String>),
    Other(Value),
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileField::Text(text) => f.write_str(text),
            ProfileField::List(items) => f.write_str(&items.join(", ")),
            ProfileField::Other(Value::Array(items)) => {
                let rendered: Vec<String> = items.iter().map(render_value).collect();
                f.write_str(&rendered.join(", "))
            }
            ProfileField::Other(value) => f.write_str(&render_value(value)),
        }
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Request to persist a user profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SaveUserDataRequest {
    #[validate(length(min = 1, max = 255), custom(function = "validate_document_id"))]
    pub goal: String,
    pub allergies: ProfileField,
    pub preferences: ProfileField,
}

/// Cosmos DB rejects these characters in document ids
fn validate_document_id(id: &str) -> Result<(), ValidationError> {
    if id.chars().any(|c| matches!(c, '/' | '\\' | '?' | '#')) {
        return Err(ValidationError::new("forbidden_character"));
    }
    Ok(())
}

/// Request to build a profile summary; every field is optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryRequest {
    #[serde(default)]
    pub goal: Option<ProfileField>,
    #[serde(default)]
    pub allergies: Option<ProfileField>,
    #[serde(default)]
    pub preferences: Option<ProfileField>,
}

/// Request to translate a piece of text
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TranslateRequest {
    #[serde(default = "default_text")]
    pub text: String,
    #[validate(length(min = 1))]
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_text() -> String {
    "Aucun texte fourni.".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

/// Request for nutrition advice from recognized labels
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdviceRequest {
    #[serde(default)]
    pub recognized_items: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_defaults() {
        let req: TranslateRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.text, "Aucun texte fourni.");
        assert_eq!(req.language, "en");
    }

    #[test]
    fn test_profile_field_accepts_text_and_list() {
        let req: SaveUserDataRequest = serde_json::from_str(
            r#"{"goal":"perte de poids","allergies":["gluten","lactose"],"preferences":"vegan"}"#,
        )
        .unwrap();

        assert_eq!(
            req.allergies,
            ProfileField::List(vec!["gluten".to_string(), "lactose".to_string()])
        );
        assert_eq!(req.allergies.to_string(), "gluten, lactose");
        assert_eq!(req.preferences.to_string(), "vegan");
    }

    #[test]
    fn test_summary_accepts_any_json_value() {
        let req: SummaryRequest =
            serde_json::from_str(r#"{"goal":5,"allergies":true,"preferences":["bio",3]}"#).unwrap();

        assert_eq!(req.goal.unwrap().to_string(), "5");
        assert_eq!(req.allergies.unwrap().to_string(), "true");
        assert_eq!(req.preferences.unwrap().to_string(), "bio, 3");
    }

    #[test]
    fn test_summary_null_is_absent() {
        let req: SummaryRequest = serde_json::from_str(r#"{"goal":null}"#).unwrap();
        assert!(req.goal.is_none());
    }

    #[test]
    fn test_save_request_requires_all_fields() {
        let result = serde_json::from_str::<SaveUserDataRequest>(r#"{"goal":"x","allergies":"none"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_goal_fails_validation() {
        let req = SaveUserDataRequest {
            goal: String::new(),
            allergies: ProfileField::Text("none".to_string()),
            preferences: ProfileField::Text("none".to_string()),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_goal_with_path_separator_fails_validation() {
        let req = SaveUserDataRequest {
            goal: "perdre 5kg/mois".to_string(),
            allergies: ProfileField::Text("none".to_string()),
            preferences: ProfileField::Text("none".to_string()),
        };
        assert!(req.validate().is_err());
    }
}
