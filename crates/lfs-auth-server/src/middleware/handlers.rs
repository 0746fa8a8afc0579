use axum::{Json, extract::Request};
use lfs_auth_token::Identity;
use serde_json::json;

pub async fn healthz() -> Json<serde_json::Value> {
    Json(json!({ "ok": true, "service": "git-lfs-authenticate" }))
}

pub async fn whoami(req: Request) -> Json<serde_json::Value> {
    if let Some(identity) = req.extensions().get::<Identity>() {
        let permissions: Vec<&str> = identity.permissions().iter().map(|p| p.as_str()).collect();
        Json(json!({
            "user": identity.name(),
            "permissions": permissions,
        }))
    } else {
        Json(json!({ "user": null, "permissions": [] }))
    }
}
