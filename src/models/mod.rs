// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{ClassificationResult, Prediction, UploadedFile, UserProfile, RECOGNITION_THRESHOLD};
pub use requests::{AdviceRequest, ProfileField, SaveUserDataRequest, SummaryRequest, TranslateRequest};
pub use responses::{AdviceResponse, ErrorResponse, MessageResponse, RecognizedItemsResponse, SummaryResponse, TranslateResponse};
