//! API server initialization

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use super::middleware;
use super::routes::{health, leaderboards};
use crate::core::CoreApp;
use crate::core::constants::DEFAULT_BODY_LIMIT;
use crate::domain::LeaderboardService;

pub struct ApiServer {
    app: CoreApp,
}

impl ApiServer {
    pub fn new(app: CoreApp) -> Self {
        Self { app }
    }

    /// Returns CoreApp for graceful shutdown
    pub async fn start(self) -> Result<CoreApp> {
        let Self { app } = self;

        // Clone shutdown before moving app
        let shutdown = app.shutdown.clone();

        let host = app.config.server.host.clone();
        let port = app.config.server.port;
        let addr = SocketAddr::new(host.parse()?, port);

        let router = build_router(app.leaderboard.clone());

        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Server listening on http://{}:{}", host, port);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown.wait())
            .await?;

        Ok(app)
    }
}

/// Build the full application router
pub fn build_router(service: Arc<LeaderboardService>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .nest("/leaderboards/song", leaderboards::routes(service))
        .fallback(middleware::handle_404)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors())
        .layer(DefaultBodyLimit::max(DEFAULT_BODY_LIMIT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use sqlx::sqlite::SqlitePoolOptions;
    use tower::ServiceExt;

    use crate::core::Denylist;
    use crate::data::SqliteService;
    use crate::data::sqlite::repositories::user as user_repo;

    async fn make_service(denylist: Denylist) -> Arc<LeaderboardService> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(":memory:")
            .await
            .unwrap();
        sqlx::query(crate::data::sqlite::schema::SCHEMA)
            .execute(&pool)
            .await
            .unwrap();
        Arc::new(LeaderboardService::new(
            Arc::new(SqliteService::from_pool(pool)),
            Arc::new(denylist),
        ))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn get_authed(uri: &str, key: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", key))
            .body(Body::empty())
            .unwrap()
    }

    fn post_json(uri: &str, key: Option<&str>, body: serde_json::Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(key) = key {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", key));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn song_body() -> serde_json::Value {
        serde_json::json!({
            "title": "Song",
            "artist": "Artist",
            "album": "Album",
            "charters": "Charter",
            "source": "custom",
            "diff_guitar": 5,
            "diff_bass": -1,
            "diff_drums": -1,
            "diff_vocals": -1,
            "song_length": 180
        })
    }

    fn run_body(score: i64) -> serde_json::Value {
        serde_json::json!({
            "instrument": "guitar",
            "score": score,
            "note_count": 100,
            "notes_hit_perfect": 90,
            "notes_hit_good": 5,
            "misses": 5,
            "strikes": 1,
            "difficulty": 4
        })
    }

    #[tokio::test]
    async fn test_health() {
        let router = build_router(make_service(Denylist::empty()).await);

        let response = router.oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_unknown_route_404() {
        let router = build_router(make_service(Denylist::empty()).await);
        let response = router.oneshot(get("/nope")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_submit_missing_auth_header() {
        let router = build_router(make_service(Denylist::empty()).await);

        let response = router
            .oneshot(post_json("/leaderboards/song/abc123/submit", None, run_body(1)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["code"], "AUTH_HEADER_MISSING");
    }

    #[tokio::test]
    async fn test_submit_unknown_key() {
        let router = build_router(make_service(Denylist::empty()).await);
        let key = crate::utils::auth_key::generate_key();

        let response = router
            .oneshot(post_json(
                "/leaderboards/song/abc123/submit",
                Some(&key),
                run_body(1),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let json = body_json(response).await;
        assert_eq!(json["code"], "AUTH_KEY_INVALID");
    }

    #[tokio::test]
    async fn test_submit_blacklisted_user() {
        let service = make_service(Denylist::empty()).await;
        let user = service.register_user("d-1", "one", "One").await.unwrap();
        service.create_song("abc123", crate::data::types::NewSong {
            title: "Song".to_string(),
            artist: "Artist".to_string(),
            album: "Album".to_string(),
            charters: "Charter".to_string(),
            source: "custom".to_string(),
            diff_guitar: 5,
            diff_bass: -1,
            diff_drums: -1,
            diff_vocals: -1,
            song_length: 180,
        })
        .await
        .unwrap();
        user_repo::set_blacklisted(service.pool(), user.user_id, true)
            .await
            .unwrap();
        let router = build_router(service);

        let response = router
            .oneshot(post_json(
                "/leaderboards/song/abc123/submit",
                Some(&user.auth_key),
                run_body(1),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let json = body_json(response).await;
        assert_eq!(json["code"], "USER_BLACKLISTED");
    }

    #[tokio::test]
    async fn test_create_denylisted_song() {
        let service = make_service(Denylist::from_hashes(["barred"])).await;
        let user = service.register_user("d-1", "one", "One").await.unwrap();
        let router = build_router(service);

        let response = router
            .oneshot(post_json(
                "/leaderboards/song/barred/create",
                Some(&user.auth_key),
                song_body(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let json = body_json(response).await;
        assert_eq!(json["code"], "SONG_DENYLISTED");
    }

    #[tokio::test]
    async fn test_submit_unknown_song() {
        let service = make_service(Denylist::empty()).await;
        let user = service.register_user("d-1", "one", "One").await.unwrap();
        let router = build_router(service);

        let response = router
            .oneshot(post_json(
                "/leaderboards/song/missing1/submit",
                Some(&user.auth_key),
                run_body(1),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_duplicate_create_conflicts() {
        let service = make_service(Denylist::empty()).await;
        let user = service.register_user("d-1", "one", "One").await.unwrap();
        let router = build_router(service);

        let response = router
            .clone()
            .oneshot(post_json(
                "/leaderboards/song/abc123/create",
                Some(&user.auth_key),
                song_body(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .oneshot(post_json(
                "/leaderboards/song/abc123/create",
                Some(&user.auth_key),
                song_body(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_invalid_page_rejected() {
        let service = make_service(Denylist::empty()).await;
        let router = build_router(service);

        let response = router
            .oneshot(get("/leaderboards/song/abc123?instrument=guitar&page=0"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_instrument_rejected() {
        let service = make_service(Denylist::empty()).await;
        let router = build_router(service);

        let response = router
            .oneshot(get("/leaderboards/song/abc123?page=1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_invalid_song_hash_rejected() {
        let service = make_service(Denylist::empty()).await;
        let router = build_router(service);

        let response = router
            .oneshot(get("/leaderboards/song/not%20a%20hash?instrument=guitar&page=1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_own_score_absent_404() {
        let service = make_service(Denylist::empty()).await;
        let user = service.register_user("d-1", "one", "One").await.unwrap();
        let router = build_router(service);

        let response = router
            .oneshot(get_authed(
                "/leaderboards/song/abc123/me?instrument=guitar",
                &user.auth_key,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_full_flow_wire_shape() {
        let service = make_service(Denylist::empty()).await;
        let alice = service.register_user("d-a", "alice", "Alice").await.unwrap();
        let bob = service.register_user("d-b", "bob", "Bob").await.unwrap();
        let router = build_router(service);

        let response = router
            .clone()
            .oneshot(post_json(
                "/leaderboards/song/abc123/create",
                Some(&alice.auth_key),
                song_body(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .clone()
            .oneshot(post_json(
                "/leaderboards/song/abc123/submit",
                Some(&alice.auth_key),
                run_body(500),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .clone()
            .oneshot(post_json(
                "/leaderboards/song/abc123/submit",
                Some(&bob.auth_key),
                run_body(700),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // Public listing, exact wire field names
        let response = router
            .clone()
            .oneshot(get("/leaderboards/song/abc123?instrument=guitar&page=1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["context"]["current_page"], 1);
        assert_eq!(json["context"]["total_pages"], 1);
        assert_eq!(json["context"]["total_scores"], 2);

        let scores = json["scores"].as_array().unwrap();
        assert_eq!(scores.len(), 2);
        assert_eq!(scores[0]["submitter"]["username"], "bob");
        assert_eq!(scores[0]["submitter"]["display_name"], "Bob");
        assert_eq!(scores[0]["submitter"]["discord_id"], "d-b");
        assert_eq!(scores[0]["run"]["score"], 700);
        assert_eq!(scores[0]["run"]["instrument"], "guitar");
        assert_eq!(scores[0]["run"]["note_count"], 100);
        assert!(scores[0]["run"]["uuid"].is_string());
        assert_eq!(scores[0]["leaderboard"]["position"], 1);
        assert_eq!(scores[1]["submitter"]["username"], "alice");
        assert_eq!(scores[1]["leaderboard"]["position"], 2);

        // Own rank
        let response = router
            .oneshot(get_authed(
                "/leaderboards/song/abc123/me?instrument=guitar",
                &alice.auth_key,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["submitter"]["username"], "alice");
        assert_eq!(json["run"]["score"], 500);
        assert_eq!(json["leaderboard"]["position"], 2);
    }

    #[tokio::test]
    async fn test_listing_unknown_song_404() {
        let service = make_service(Denylist::empty()).await;
        let router = build_router(service);

        let response = router
            .oneshot(get("/leaderboards/song/missing1?instrument=guitar&page=1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
