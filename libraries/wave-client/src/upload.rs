//! Track upload.

use crate::error::{response_error, send_error, ClientError, Result};
use crate::types::TrackResponse;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::{debug, info};
use wave_core::{Track, UploadMetadata, UploadedFile};

/// Upload client for a Wave server.
pub struct UploadClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    token: &'a str,
}

impl<'a> UploadClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, token: &'a str) -> Self {
        Self {
            http,
            base_url,
            token,
        }
    }

    /// Upload an audio file with metadata and an optional cover image.
    pub async fn upload_track(
        &self,
        metadata: &UploadMetadata,
        audio: UploadedFile,
        cover: Option<UploadedFile>,
    ) -> Result<Track> {
        let audio_size = audio.bytes.len();
        let audio_name = audio.file_name.clone();
        debug!(file = %audio_name, size = audio_size, "Uploading track");

        let mut form = metadata_form(metadata).part("audio", file_part(audio)?);
        if let Some(cover) = cover {
            form = form.part("cover", file_part(cover)?);
        }

        let url = format!("{}/api/tracks/upload", self.base_url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(self.token)
            .multipart(form)
            .send()
            .await
            .map_err(send_error)?;

        if !response.status().is_success() {
            return Err(response_error(response).await);
        }

        let body: TrackResponse = response.json().await.map_err(|e| {
            ClientError::ParseError(format!("Failed to parse upload response: {}", e))
        })?;

        info!(
            track_id = %body.track.id,
            file = %audio_name,
            size = audio_size,
            "Track uploaded"
        );

        Ok(body.track)
    }
}

fn metadata_form(metadata: &UploadMetadata) -> Form {
    let mut form = Form::new()
        .text("title", metadata.title.clone())
        .text("artist", metadata.artist.clone())
        .text("isPublic", metadata.is_public.to_string());

    for (name, value) in [
        ("genre", &metadata.genre),
        ("mood", &metadata.mood),
        ("description", &metadata.description),
    ] {
        if let Some(value) = value {
            form = form.text(name, value.clone());
        }
    }

    form
}

fn file_part(file: UploadedFile) -> Result<Part> {
    Ok(Part::bytes(file.bytes)
        .file_name(file.file_name)
        .mime_str(&file.content_type)?)
}
