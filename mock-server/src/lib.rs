use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{
        multipart::MultipartRejection,
        rejection::{JsonRejection, QueryRejection},
        Multipart, Query, State,
    },
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

const MEDIA_HOST: &str = "https://media.example.com";
const APP_TOKEN_HEADER: &str = "app-token";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub media_url: String,
    pub media_type: String,
}

/// Query string of an upload request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadQuery {
    pub access: Option<String>,
    #[serde(rename = "for")]
    pub for_target: Option<String>,
    pub user_id: Option<String>,
    pub app_user_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveAttachment {
    pub media_url: String,
}

/// What the server keeps for each upload.
#[derive(Clone, Debug)]
pub struct StoredAttachment {
    pub attachment: Attachment,
    pub access: String,
    pub for_target: Option<String>,
    pub user_id: Option<String>,
    pub app_user_id: Option<String>,
    pub file_name: String,
    pub data: Vec<u8>,
}

/// Attachments keyed by media URL.
pub type Db = Arc<RwLock<HashMap<String, StoredAttachment>>>;

pub fn app() -> Router {
    router(Db::default())
}

/// Router over a caller-provided store, so tests can inspect uploads.
pub fn router(db: Db) -> Router {
    Router::new()
        .route("/v1/attachments", post(create_attachment))
        .route("/v1/attachments/remove", post(remove_attachment))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn is_authenticated(headers: &HeaderMap) -> bool {
    headers.contains_key(AUTHORIZATION) || headers.contains_key(APP_TOKEN_HEADER)
}

async fn create_attachment(
    State(db): State<Db>,
    headers: HeaderMap,
    query: Result<Query<UploadQuery>, QueryRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<Attachment>), StatusCode> {
    // Authentication is checked before the query string or body is looked at.
    if !is_authenticated(&headers) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    let Query(query) = query.map_err(|_| StatusCode::BAD_REQUEST)?;
    let mut multipart = multipart.map_err(|e| e.status())?;
    let access = query.access.ok_or(StatusCode::BAD_REQUEST)?;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?
    {
        if field.name() != Some("source") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("file").to_string();
        let media_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field.bytes().await.map_err(|_| StatusCode::BAD_REQUEST)?;
        upload = Some((file_name, media_type, data.to_vec()));
    }
    let (file_name, media_type, data) = upload.ok_or(StatusCode::BAD_REQUEST)?;

    let attachment = Attachment {
        media_url: format!("{MEDIA_HOST}/{}/{file_name}", Uuid::new_v4().simple()),
        media_type,
    };
    tracing::info!(
        media_url = %attachment.media_url,
        size = data.len(),
        access = %access,
        "stored attachment"
    );
    db.write().await.insert(
        attachment.media_url.clone(),
        StoredAttachment {
            attachment: attachment.clone(),
            access,
            for_target: query.for_target,
            user_id: query.user_id,
            app_user_id: query.app_user_id,
            file_name,
            data,
        },
    );
    Ok((StatusCode::CREATED, Json(attachment)))
}

async fn remove_attachment(
    State(db): State<Db>,
    headers: HeaderMap,
    input: Result<Json<RemoveAttachment>, JsonRejection>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    if !is_authenticated(&headers) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    let Json(input) = input.map_err(|e| e.status())?;
    let removed = db.write().await.remove(&input.media_url);
    match removed {
        Some(_) => {
            tracing::info!(media_url = %input.media_url, "removed attachment");
            Ok(Json(serde_json::json!({})))
        }
        None => Err(StatusCode::NOT_FOUND),
    }
}
