/// POST /api/tracks/upload
use crate::{
    api::tracks::TrackResponse,
    error::{Result, ServerError},
    middleware::AuthenticatedUser,
    services::{StoredFile, UploadKind},
    state::AppState,
};
use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    Json,
};
use multer::{Constraints, Multipart, SizeLimit};
use wave_core::{Track, UploadMetadata, UploadedFile};

/// Parsed multipart body
#[derive(Debug, Default)]
struct UploadForm {
    title: Option<String>,
    artist: Option<String>,
    genre: Option<String>,
    mood: Option<String>,
    description: Option<String>,
    is_public: Option<String>,
    audio: Option<UploadedFile>,
    cover: Option<UploadedFile>,
}

impl UploadForm {
    /// Required fields are trimmed; empty optional fields count as absent
    fn metadata(&self) -> Result<UploadMetadata> {
        let required = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        let optional = |value: &Option<String>| value.clone().filter(|v| !v.is_empty());

        let (Some(title), Some(artist)) = (required(&self.title), required(&self.artist)) else {
            return Err(ServerError::BadRequest(
                "Title and artist are required".to_string(),
            ));
        };

        Ok(UploadMetadata {
            title,
            artist,
            genre: optional(&self.genre),
            mood: optional(&self.mood),
            description: optional(&self.description),
            is_public: self.is_public.as_deref() == Some("true"),
        })
    }
}

pub async fn upload_track(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    headers: HeaderMap,
    body: Body,
) -> Result<(StatusCode, Json<TrackResponse>)> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ServerError::BadRequest("Missing Content-Type".to_string()))?;

    let boundary = multer::parse_boundary(content_type)
        .map_err(|_| ServerError::BadRequest("Expected multipart/form-data".to_string()))?;

    let constraints = Constraints::new()
        .size_limit(SizeLimit::new().whole_stream(app_state.max_upload_bytes));
    let multipart = Multipart::with_constraints(body.into_data_stream(), boundary, constraints);

    let mut form = read_form(multipart).await?;
    let audio = form
        .audio
        .take()
        .ok_or_else(|| ServerError::BadRequest("Audio file is required".to_string()))?;
    let metadata = form.metadata()?;

    let track = store_track(&app_state, &auth, metadata, audio, form.cover).await?;
    tracing::info!(
        track_id = %track.id,
        user_id = %auth.user_id(),
        title = %track.title,
        "Track uploaded"
    );

    Ok((StatusCode::CREATED, Json(TrackResponse { track })))
}

async fn read_form(mut multipart: Multipart<'static>) -> Result<UploadForm> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "audio" | "cover" => {
                let kind = if name == "audio" {
                    UploadKind::Audio
                } else {
                    UploadKind::Cover
                };

                let content_type = field
                    .content_type()
                    .map(|m| m.essence_str().to_string())
                    .unwrap_or_default();
                if !content_type.starts_with(kind.mime_prefix()) {
                    return Err(ServerError::BadRequest(match kind {
                        UploadKind::Audio => "Only audio files are allowed".to_string(),
                        UploadKind::Cover => "Only image files are allowed".to_string(),
                    }));
                }

                let file_name = field.file_name().unwrap_or("").to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;
                let file = UploadedFile::new(file_name, content_type, bytes.to_vec());

                match kind {
                    UploadKind::Audio => form.audio = Some(file),
                    UploadKind::Cover => form.cover = Some(file),
                }
            }
            "title" | "artist" | "genre" | "mood" | "description" | "isPublic" => {
                let value = field.text().await.map_err(multipart_error)?;
                let slot = match name.as_str() {
                    "title" => &mut form.title,
                    "artist" => &mut form.artist,
                    "genre" => &mut form.genre,
                    "mood" => &mut form.mood,
                    "description" => &mut form.description,
                    _ => &mut form.is_public,
                };
                *slot = Some(value);
            }
            other => tracing::debug!(field = %other, "Ignoring unknown upload field"),
        }
    }

    Ok(form)
}

/// Write the files, then the catalog entry. Files already written are
/// removed again when a later step fails.
async fn store_track(
    app_state: &AppState,
    auth: &AuthenticatedUser,
    metadata: UploadMetadata,
    audio: UploadedFile,
    cover: Option<UploadedFile>,
) -> Result<Track> {
    let storage = &app_state.file_storage;

    let audio_file = storage
        .store(
            UploadKind::Audio,
            &audio.file_name,
            &audio.content_type,
            &audio.bytes,
        )
        .await?;

    let cover_file = match cover {
        Some(cover) => {
            let stored = storage
                .store(
                    UploadKind::Cover,
                    &cover.file_name,
                    &cover.content_type,
                    &cover.bytes,
                )
                .await;
            match stored {
                Ok(file) => Some(file),
                Err(e) => {
                    discard(app_state, &[&audio_file]).await;
                    return Err(e);
                }
            }
        }
        None => None,
    };

    let mut track = Track::new(
        metadata.title,
        metadata.artist,
        audio_file.url.clone(),
        auth.user_id().clone(),
    );
    track.genre = metadata.genre;
    track.mood = metadata.mood;
    track.description = metadata.description;
    track.is_public = metadata.is_public;
    track.cover_url = cover_file.as_ref().map(|f| f.url.clone());

    match app_state.store.insert_track(track).await {
        Ok(track) => Ok(track),
        Err(e) => {
            let mut written = vec![&audio_file];
            written.extend(cover_file.as_ref());
            discard(app_state, &written).await;
            Err(e)
        }
    }
}

async fn discard(app_state: &AppState, files: &[&StoredFile]) {
    for file in files {
        if let Err(e) = app_state.file_storage.remove(file).await {
            tracing::warn!(path = %file.path.display(), "Failed to remove upload: {}", e);
        }
    }
}

fn multipart_error(error: multer::Error) -> ServerError {
    match error {
        multer::Error::StreamSizeExceeded { .. } | multer::Error::FieldSizeExceeded { .. } => {
            ServerError::BadRequest("file too large".to_string())
        }
        other => ServerError::BadRequest(format!("Failed to parse multipart: {}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(title: &str, artist: &str) -> UploadForm {
        UploadForm {
            title: Some(title.to_string()),
            artist: Some(artist.to_string()),
            ..UploadForm::default()
        }
    }

    #[test]
    fn test_metadata_trims_required_fields() {
        let metadata = form("  Night Drive ", " Neon").metadata().unwrap();
        assert_eq!(metadata.title, "Night Drive");
        assert_eq!(metadata.artist, "Neon");
        assert!(!metadata.is_public);
    }

    #[test]
    fn test_metadata_requires_title_and_artist() {
        assert!(form("   ", "Neon").metadata().is_err());
        assert!(UploadForm::default().metadata().is_err());
    }

    #[test]
    fn test_is_public_only_for_literal_true() {
        for (raw, expected) in [("true", true), ("TRUE", false), ("1", false), ("", false)] {
            let mut f = form("t", "a");
            f.is_public = Some(raw.to_string());
            assert_eq!(f.metadata().unwrap().is_public, expected, "{raw:?}");
        }
    }

    #[test]
    fn test_empty_optional_fields_are_dropped() {
        let mut f = form("t", "a");
        f.genre = Some(String::new());
        f.mood = Some("calm".to_string());

        let metadata = f.metadata().unwrap();
        assert_eq!(metadata.genre, None);
        assert_eq!(metadata.mood.as_deref(), Some("calm"));
    }
}
