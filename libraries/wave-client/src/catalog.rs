//! Track listing, lookup and play-count endpoints.

use crate::error::{response_error, send_error, ClientError, Result};
use crate::types::{PlaysResponse, TrackResponse};
use reqwest::{Client, StatusCode};
use tracing::debug;
use wave_core::{Track, TrackId, TrackPage, TrackQuery};

/// Catalog client for a Wave server.
pub struct CatalogClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> CatalogClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// List tracks. No authentication needed.
    pub async fn list_tracks(&self, query: &TrackQuery) -> Result<TrackPage> {
        let url = format!("{}/api/tracks", self.base_url);
        debug!(
            filter = query.filter.as_str(),
            limit = query.limit,
            offset = query.offset,
            "Listing tracks"
        );

        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(send_error)?;

        if !response.status().is_success() {
            return Err(response_error(response).await);
        }

        response.json().await.map_err(|e| {
            ClientError::ParseError(format!("Failed to parse track page: {}", e))
        })
    }

    /// Get a single track.
    pub async fn get_track(&self, id: &TrackId) -> Result<Track> {
        let url = format!("{}/api/tracks/{}", self.base_url, id);

        let response = self.http.get(&url).send().await.map_err(send_error)?;

        match response.status() {
            status if status.is_success() => {
                let body: TrackResponse = response.json().await.map_err(|e| {
                    ClientError::ParseError(format!("Failed to parse track: {}", e))
                })?;
                Ok(body.track)
            }
            StatusCode::NOT_FOUND => Err(ClientError::TrackNotFound(id.clone())),
            _ => Err(response_error(response).await),
        }
    }

    /// Increment the play count, returning the new count.
    pub async fn record_play(&self, id: &TrackId) -> Result<u64> {
        let url = format!("{}/api/tracks/{}/play", self.base_url, id);

        let response = self.http.post(&url).send().await.map_err(send_error)?;

        match response.status() {
            status if status.is_success() => {
                let body: PlaysResponse = response.json().await.map_err(|e| {
                    ClientError::ParseError(format!("Failed to parse play count: {}", e))
                })?;
                debug!(track_id = %id, plays = body.plays, "Play recorded");
                Ok(body.plays)
            }
            StatusCode::NOT_FOUND => Err(ClientError::TrackNotFound(id.clone())),
            _ => Err(response_error(response).await),
        }
    }
}
