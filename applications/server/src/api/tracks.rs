/// Tracks API routes
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use serde::Serialize;
use std::collections::HashMap;
use wave_core::{Track, TrackFilter, TrackId, TrackPage, TrackQuery, UserId, UserSummary};

#[derive(Debug, Serialize)]
pub struct TrackResponse {
    pub track: Track,
}

#[derive(Debug, Serialize)]
pub struct PlaysResponse {
    pub message: String,
    pub plays: u64,
}

/// GET /api/tracks
///
/// Without `userId` only public tracks are listed; with it, every track of
/// that uploader.
pub async fn list_tracks(
    State(app_state): State<AppState>,
    query: std::result::Result<Query<TrackQuery>, QueryRejection>,
) -> Result<Json<TrackPage>> {
    let Query(query) = query.map_err(|e| ServerError::BadRequest(e.body_text()))?;

    let tracks = app_state.store.tracks().await?;
    let uploaders = uploader_index(&app_state).await?;

    let mut tracks = select_tracks(tracks, &query);
    for track in &mut tracks {
        track.uploader = uploaders.get(&track.uploaded_by).cloned();
    }

    Ok(Json(TrackPage::paginate(tracks, query.offset, query.limit)))
}

/// GET /api/tracks/:id
pub async fn get_track(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<TrackResponse>> {
    let mut track = app_state
        .store
        .find_track(&TrackId::new(id))
        .await?
        .ok_or_else(|| ServerError::NotFound("Track not found".to_string()))?;

    track.uploader = app_state
        .store
        .find_user(&track.uploaded_by)
        .await?
        .map(|u| u.summary());

    Ok(Json(TrackResponse { track }))
}

/// POST /api/tracks/:id/play
pub async fn record_play(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<PlaysResponse>> {
    let id = TrackId::new(id);
    let plays = app_state.store.record_play(&id).await?;
    tracing::debug!(track_id = %id, plays, "Play recorded");

    Ok(Json(PlaysResponse {
        message: "Play recorded".to_string(),
        plays,
    }))
}

/// Filter and order a listing; pagination is left to the caller
pub fn select_tracks(tracks: Vec<Track>, query: &TrackQuery) -> Vec<Track> {
    let search = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let mut selected: Vec<Track> = tracks
        .into_iter()
        .filter(|t| match &query.user_id {
            Some(user_id) => &t.uploaded_by == user_id,
            None => t.is_public,
        })
        .filter(|t| search.map_or(true, |s| t.matches_search(s)))
        .collect();

    match query.filter {
        TrackFilter::Recent => selected.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at)),
        TrackFilter::Popular => selected.sort_by_key(|t| std::cmp::Reverse(t.popularity())),
    }

    selected
}

async fn uploader_index(app_state: &AppState) -> Result<HashMap<UserId, UserSummary>> {
    Ok(app_state
        .store
        .users()
        .await?
        .into_iter()
        .map(|r| (r.user.id.clone(), r.user.summary()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn track(title: &str, owner: &str, public: bool, age_minutes: i64, plays: u64) -> Track {
        let mut t = Track::new(title, "Artist", "/uploads/tracks/x.mp3", UserId::new(owner));
        t.is_public = public;
        t.uploaded_at = Utc::now() - Duration::minutes(age_minutes);
        t.plays = plays;
        t
    }

    fn titles(tracks: &[Track]) -> Vec<&str> {
        tracks.iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn test_recent_lists_public_newest_first() {
        let tracks = vec![
            track("old", "u1", true, 30, 0),
            track("private", "u1", false, 1, 0),
            track("new", "u2", true, 5, 0),
        ];

        let selected = select_tracks(tracks, &TrackQuery::default());
        assert_eq!(titles(&selected), ["new", "old"]);
    }

    #[test]
    fn test_user_filter_includes_private_tracks() {
        let tracks = vec![
            track("mine", "u1", true, 3, 0),
            track("secret", "u1", false, 2, 0),
            track("theirs", "u2", true, 1, 0),
        ];

        let query = TrackQuery::default().with_user(UserId::new("u1"));
        let selected = select_tracks(tracks, &query);
        assert_eq!(titles(&selected), ["secret", "mine"]);
    }

    #[test]
    fn test_popular_orders_by_plays_and_likes() {
        let mut liked = track("liked", "u1", true, 1, 1);
        liked.likes = 10;
        let tracks = vec![
            track("quiet", "u1", true, 1, 2),
            liked,
            track("played", "u1", true, 1, 5),
        ];

        let selected = select_tracks(tracks, &TrackQuery::new(TrackFilter::Popular));
        assert_eq!(titles(&selected), ["liked", "played", "quiet"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let tracks = vec![
            track("Midnight City", "u1", true, 1, 0),
            track("Daylight", "u1", true, 2, 0),
        ];

        let query = TrackQuery::default().with_search("MIDNIGHT");
        let selected = select_tracks(tracks, &query);
        assert_eq!(titles(&selected), ["Midnight City"]);
    }
}
