//! HTTP routes of the bot.

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use log::{debug, error, info};
use tokio::net::TcpListener;

use crate::{
    commands::{ChatEvent, Commander},
    store::{InstallationStore, MatchStore},
    webhook::payload::{InstalledPayload, MessagePayload, ReplyPayload},
};

/// Creates the router serving the chat platform callbacks.
///
/// - `POST /webhook` - Room message, answered with the reply to post
/// - `POST /installed` - Installation of the bot on an account
pub fn router<I, M>(commander: Arc<Commander<I, M>>) -> Router
where
    I: InstallationStore + 'static,
    M: MatchStore + 'static,
{
    Router::new()
        .route("/webhook", post(webhook_handler::<I, M>))
        .route("/installed", post(installed_handler::<I, M>))
        .with_state(commander)
}

/// Serves `app` on `address` until the process is interrupted.
pub async fn serve(address: SocketAddr, app: Router) -> anyhow::Result<()> {
    let listener = TcpListener::bind(address)
        .await
        .with_context(|| format!("failed to bind {}", address))?;

    info!("listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await
        .context("webhook server failed")?;

    info!("server stopped");
    Ok(())
}

async fn webhook_handler<I, M>(
    State(commander): State<Arc<Commander<I, M>>>,
    Json(payload): Json<MessagePayload>,
) -> Response
where
    I: InstallationStore + 'static,
    M: MatchStore + 'static,
{
    let event = ChatEvent::from(payload);
    debug!("message in room {}: {:?}", event.room_id, event.text);

    match commander.handle(&event).await {
        Ok(Some(reply)) => Json(ReplyPayload::from(reply)).into_response(),
        Ok(None) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!(
                "failed to handle message in room {}: {:#}",
                event.room_id, e
            );
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn installed_handler<I, M>(
    State(commander): State<Arc<Commander<I, M>>>,
    Json(payload): Json<InstalledPayload>,
) -> StatusCode
where
    I: InstallationStore + 'static,
    M: MatchStore + 'static,
{
    match commander
        .install(&payload.oauth_id, &payload.oauth_secret)
        .await
    {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            error!("failed to install {}: {:#}", payload.oauth_id, e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use axum::{
        body::{Body, to_bytes},
        http::Request,
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::{
        config,
        league::{Installation, Room},
        store::{MockInstallationStore, MockMatchStore},
    };

    fn create_app(installations: MockInstallationStore) -> Router {
        let commander = Commander::new(
            installations,
            MockMatchStore::new(),
            &config::Bot::default(),
            &config::Rating::default(),
        );
        router(Arc::new(commander))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn message(text: &str) -> Value {
        json!({
            "oauth_client_id": "oauthId",
            "item": {
                "message": { "message": text, "mentions": [], "from": { "name": "My Name" } },
                "room": { "id": 12321 }
            }
        })
    }

    fn installation_with_room() -> Installation {
        let mut installation = Installation::new("oauthId", "oauthSecret");
        installation
            .rooms
            .insert("12321".to_string(), Room::default());
        installation
    }

    #[tokio::test]
    async fn test_webhook_replies_with_text() {
        let mut installations = MockInstallationStore::new();
        installations
            .expect_get_installation()
            .returning(|_| Ok(Some(installation_with_room())));
        let app = create_app(installations);

        let response = app
            .oneshot(post_json("/webhook", message("list")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let reply: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            reply,
            json!({
                "message": "There is no foosball league running in this room!",
                "message_format": "text"
            })
        );
    }

    #[tokio::test]
    async fn test_webhook_adds_members() {
        let mut installations = MockInstallationStore::new();
        installations
            .expect_get_installation()
            .returning(|_| Ok(Some(installation_with_room())));
        installations
            .expect_add_members()
            .withf(|oauth_id, room_id, members| {
                oauth_id == "oauthId" && room_id == "12321" && members.len() == 1
            })
            .times(1)
            .returning(|_, _, _| Ok(()));
        let app = create_app(installations);

        let response = app
            .oneshot(post_json("/webhook", message("add me")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let reply: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(reply["message"], "OK, I've added My Name to the league.");
    }

    #[tokio::test]
    async fn test_webhook_unknown_installation_has_no_content() {
        let mut installations = MockInstallationStore::new();
        installations
            .expect_get_installation()
            .returning(|_| Ok(None));
        let app = create_app(installations);

        let response = app
            .oneshot(post_json("/webhook", message("list")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_webhook_storage_failure() {
        let mut installations = MockInstallationStore::new();
        installations
            .expect_get_installation()
            .returning(|_| Err(anyhow!("storage unavailable")));
        let app = create_app(installations);

        let response = app
            .oneshot(post_json("/webhook", message("list")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_webhook_rejects_malformed_payload() {
        let app = create_app(MockInstallationStore::new());

        let response = app
            .oneshot(post_json("/webhook", json!({ "item": {} })))
            .await
            .unwrap();

        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_installed() {
        let mut installations = MockInstallationStore::new();
        installations
            .expect_put_installation()
            .withf(|oauth_id, oauth_secret| oauth_id == "oauthId" && oauth_secret == "oauthSecret")
            .times(1)
            .returning(|_, _| Ok(()));
        let app = create_app(installations);

        let response = app
            .oneshot(post_json(
                "/installed",
                json!({ "oauthId": "oauthId", "oauthSecret": "oauthSecret" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
