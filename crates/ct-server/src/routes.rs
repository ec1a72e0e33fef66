use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use ct_core::comment::{CommentRecord, CommentRecordBuilder};
use ct_core::response::ThreadResponse;
use ct_core::types::{CommentId, PostId};
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;

/// Body of `POST /posts/{post_id}/comments`
#[derive(Debug, Deserialize)]
pub struct NewComment {
    #[serde(default)]
    pub parent_id: Option<CommentId>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn get_comments_handler(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<Json<ThreadResponse>, AppError> {
    let post = PostId::from_string(post_id)?;

    let service = state.service.clone();
    let response = blocking(move || service.load_forest(&post)).await?;

    Ok(Json(response))
}

pub async fn create_comment_handler(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
    payload: Result<Json<NewComment>, JsonRejection>,
) -> Result<(StatusCode, Json<CommentRecord>), AppError> {
    let post = PostId::from_string(post_id)?;
    let Json(payload) = payload?;

    let mut builder = CommentRecordBuilder::new().parent(payload.parent_id);
    if let Some(author) = payload.author {
        builder = builder.author(author);
    }
    if let Some(text) = payload.text {
        builder = builder.text(text);
    }
    let record = builder.build()?;

    let service = state.service.clone();
    let created = blocking(move || service.add_comment(&post, record)).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// Run store I/O off the async workers
async fn blocking<T, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> ct_core::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Internal(format!("Worker task failed: {}", e)))?
        .map_err(AppError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::extract::{FromRequest, Request};
    use axum::http::header::CONTENT_TYPE;
    use axum::response::Response;
    use ct_core::config::Config;
    use ct_core::store::{CommentStore, MemoryStore};
    use ct_core::ThreadError;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use std::sync::Arc;

    struct FailingStore;

    impl CommentStore for FailingStore {
        fn fetch_thread(&self, _post: &PostId) -> ct_core::Result<Vec<CommentRecord>> {
            Err(ThreadError::Storage("database unavailable".to_string()))
        }

        fn append(&self, _post: &PostId, _record: CommentRecord) -> ct_core::Result<()> {
            Err(ThreadError::Storage("database unavailable".to_string()))
        }

        fn list_posts(&self) -> ct_core::Result<Vec<PostId>> {
            Ok(Vec::new())
        }
    }

    fn seeded_state() -> AppState {
        let post = PostId::from_string("p1").unwrap();
        let store = MemoryStore::with_thread(
            post,
            vec![
                CommentRecord::root(1),
                CommentRecord::reply(2, 1),
                CommentRecord::reply(3, 1),
                CommentRecord::reply(4, 99),
            ],
        );
        AppState::new(Arc::new(store), &Config::default())
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn extract_body(body: &'static str) -> Result<Json<NewComment>, JsonRejection> {
        let request = Request::builder()
            .method("POST")
            .uri("/posts/p1/comments")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();
        Json::<NewComment>::from_request(request, &()).await
    }

    #[tokio::test]
    async fn test_get_comments() {
        let response = get_comments_handler(State(seeded_state()), Path("p1".to_string()))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(
            body["comments"],
            json!([{
                "id": 1,
                "parent_id": null,
                "replies": [
                    {"id": 2, "parent_id": 1},
                    {"id": 3, "parent_id": 1}
                ]
            }])
        );
        assert_eq!(body["summary"]["total"], json!(3));
        assert_eq!(body["summary"]["dropped"], json!(1));
    }

    #[tokio::test]
    async fn test_get_comments_unknown_post_is_empty() {
        let response = get_comments_handler(State(seeded_state()), Path("other".to_string()))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["comments"], json!([]));
    }

    #[tokio::test]
    async fn test_get_comments_invalid_post_id() {
        let response = get_comments_handler(State(seeded_state()), Path("a.b".to_string()))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_fetch_failure_maps_to_500() {
        let state = AppState::new(Arc::new(FailingStore), &Config::default());
        let response = get_comments_handler(State(state), Path("p1".to_string()))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("database unavailable"));
    }

    #[tokio::test]
    async fn test_create_reply() {
        let state = seeded_state();
        let payload = NewComment {
            parent_id: Some(CommentId::Int(1)),
            author: Some("ann".to_string()),
            text: Some("Same here".to_string()),
        };

        let response = create_comment_handler(
            State(state.clone()),
            Path("p1".to_string()),
            Ok(Json(payload)),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["parent_id"], json!(1));
        assert_eq!(body["author"], json!("ann"));

        let thread = state.service.load_forest(&PostId::from_string("p1").unwrap()).unwrap();
        assert_eq!(thread.comments.nodes()[0].replies.len(), 3);
    }

    #[tokio::test]
    async fn test_create_without_text_is_bad_request() {
        let payload = NewComment {
            parent_id: None,
            author: None,
            text: None,
        };

        let response = create_comment_handler(
            State(seeded_state()),
            Path("p1".to_string()),
            Ok(Json(payload)),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_reply_to_reply_is_bad_request() {
        let payload = NewComment {
            parent_id: Some(CommentId::Int(2)),
            author: None,
            text: Some("deeper".to_string()),
        };

        let response = create_comment_handler(
            State(seeded_state()),
            Path("p1".to_string()),
            Ok(Json(payload)),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_store_failure_maps_to_500() {
        let state = AppState::new(Arc::new(FailingStore), &Config::default());
        let payload = NewComment {
            parent_id: None,
            author: None,
            text: Some("hello".to_string()),
        };

        let response = create_comment_handler(State(state), Path("p1".to_string()), Ok(Json(payload)))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_create_with_wrong_field_type_is_bad_request() {
        let body = extract_body(r#"{"text": 5}"#).await;
        assert!(body.is_err());

        let response = create_comment_handler(State(seeded_state()), Path("p1".to_string()), body)
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("invalid type"));
    }

    #[tokio::test]
    async fn test_create_with_malformed_json_is_bad_request() {
        let body = extract_body(r#"{"text": "#).await;

        let response = create_comment_handler(State(seeded_state()), Path("p1".to_string()), body)
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_create_from_extracted_body() {
        let body = extract_body(r#"{"parent_id": 1, "text": "agreed"}"#).await;

        let response = create_comment_handler(State(seeded_state()), Path("p1".to_string()), body)
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_json(response).await["text"], json!("agreed"));
    }
}
