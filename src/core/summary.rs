use crate::models::{ProfileField, SummaryRequest};

const NO_GOAL: &str = "Aucun objectif spécifié";
const NO_ALLERGY: &str = "Aucune allergie spécifiée";
const NO_PREFERENCE: &str = "Aucune préférence spécifiée";

/// One-sentence French summary of a profile, with placeholders for missing fields
pub fn summarize(req: &SummaryRequest) -> String {
    format!(
        "Objectif : {}. Allergies : {}. Préférences alimentaires : {}.",
        or_placeholder(&req.goal, NO_GOAL),
        or_placeholder(&req.allergies, NO_ALLERGY),
        or_placeholder(&req.preferences, NO_PREFERENCE),
    )
}

fn or_placeholder(field: &Option<ProfileField>, placeholder: &str) -> String {
    field
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| placeholder.to_string())
}
