use actix_multipart::{Multipart, MultipartError};
use actix_web::web::BytesMut;
use actix_web::{web, HttpResponse, Responder};
use futures_util::StreamExt;
use thiserror::Error;
use crate::models::{ErrorResponse, MessageResponse, RecognizedItemsResponse, UploadedFile};
use crate::routes::AppState;

/// Multipart field carrying the file
const FILE_FIELD: &str = "file";

/// Errors raised while reading a multipart upload
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Invalid multipart payload: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Aucun fichier fourni (champ 'file').")]
    MissingFile,

    #[error("Le fichier fourni n'a pas de nom.")]
    MissingFilename,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/upload", web::post().to(upload_file))
        .route("/analyzeimage", web::post().to(analyze_image));
}

/// Read the `file` field of a multipart body, skipping any other field
pub async fn read_file_field(mut payload: Multipart) -> Result<UploadedFile, UploadError> {
    while let Some(field) = payload.next().await {
        let mut field = field?;

        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .unwrap_or_default()
            .to_string();
        let content_type = field.content_type().map(|mime| mime.to_string());

        let mut content = BytesMut::new();
        while let Some(chunk) = field.next().await {
            content.extend_from_slice(&chunk?);
        }

        return Ok(UploadedFile {
            filename,
            content_type,
            content: content.freeze(),
        });
    }

    Err(UploadError::MissingFile)
}

/// Store a file in Blob Storage under its original name
///
/// POST /upload (multipart, field `file`)
async fn upload_file(state: web::Data<AppState>, payload: Multipart) -> impl Responder {
    let file = match read_file_field(payload).await {
        Ok(file) if file.filename.is_empty() => {
            tracing::warn!("Rejected upload without filename");
            return HttpResponse::BadRequest().json(ErrorResponse::new(UploadError::MissingFilename.to_string()));
        }
        Ok(file) => file,
        Err(e) => {
            tracing::warn!("Rejected upload: {}", e);
            return HttpResponse::BadRequest().json(ErrorResponse::new(e.to_string()));
        }
    };

    match state.blob.upload(&file).await {
        Ok(()) => {
            tracing::info!("Uploaded {} to container {}", file.filename, state.blob.container());
            HttpResponse::Ok().json(MessageResponse::new(format!(
                "Fichier '{}' uploadé avec succès dans Azure Blob Storage !",
                file.filename
            )))
        }
        Err(e) => {
            tracing::error!("Failed to upload {}: {}", file.filename, e);
            HttpResponse::InternalServerError().json(ErrorResponse::new(e.to_string()))
        }
    }
}

/// Classify an image and return the confidently recognized labels
///
/// POST /analyzeimage (multipart, field `file`)
async fn analyze_image(state: web::Data<AppState>, payload: Multipart) -> impl Responder {
    let file = match read_file_field(payload).await {
        Ok(file) => file,
        Err(e) => {
            tracing::warn!("Rejected image analysis: {}", e);
            return HttpResponse::BadRequest().json(ErrorResponse::new(e.to_string()));
        }
    };

    match state.vision.recognize(file.content).await {
        Ok(recognized_items) => HttpResponse::Ok().json(RecognizedItemsResponse { recognized_items }),
        Err(e) => {
            tracing::error!("Image analysis failed: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::new(e.to_string()))
        }
    }
}
