use crate::models::requests::{ProfileField, SaveUserDataRequest};
use actix_web::web::Bytes;
use serde::{Deserialize, Serialize};

/// Labels must score strictly above this to count as recognized
pub const RECOGNITION_THRESHOLD: f64 = 0.7;

/// Profile document as stored in Cosmos DB
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Document id; the goal doubles as the identifier
    pub id: String,
    pub goal: String,
    pub allergies: ProfileField,
    pub preferences: ProfileField,
}

impl From<SaveUserDataRequest> for UserProfile {
    fn from(req: SaveUserDataRequest) -> Self {
        Self {
            id: req.goal.clone(),
            goal: req.goal,
            allergies: req.allergies,
            preferences: req.preferences,
        }
    }
}

/// File received through a multipart upload
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: Option<String>,
    pub content: Bytes,
}

/// A single Custom Vision prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(rename = "tagName")]
    pub tag_name: String,
    pub probability: f64,
}

/// Prediction payload returned by the classification endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassificationResult {
    #[serde(default)]
    pub predictions: Vec<Prediction>,
}

impl ClassificationResult {
    /// Labels whose probability is strictly above `threshold`, in upstream order
    pub fn labels_above(&self, threshold: f64) -> Vec<String> {
        self.predictions
            .iter()
            .filter(|p| p.probability > threshold)
            .map(|p| p.tag_name.clone())
            .collect()
    }
}
