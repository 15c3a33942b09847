//! Integration tests for [`repost_telegram::build_engine`].
//!
//! Wires the engine from a config pointing at a temp template file and a no-op Bot, without
//! connecting to Telegram.

use async_trait::async_trait;
use repost_core::{Bot, Chat, Event, Inbound, Menu, Result, VideoRef};
use repost_telegram::{build_engine, RepostConfig};
use std::sync::Arc;
use template_store::TemplateStore;

struct NoopBot;

#[async_trait]
impl Bot for NoopBot {
    async fn send_message(&self, _chat: &Chat, _text: &str) -> Result<()> {
        Ok(())
    }

    async fn send_menu(&self, _chat: &Chat, _text: &str, _menu: &Menu) -> Result<String> {
        Ok("1".to_string())
    }

    async fn edit_message(&self, _chat: &Chat, _message_id: &str, _text: &str) -> Result<()> {
        Ok(())
    }

    async fn send_video(&self, _chat: &Chat, _video: &VideoRef, _caption: &str) -> Result<()> {
        Ok(())
    }
}

fn config(templates_file: String) -> RepostConfig {
    RepostConfig {
        bot_token: "test_token".to_string(),
        telegram_api_url: None,
        release_channel_id: -1001,
        reserve_channel_id: -1002,
        templates_file,
        log_file: "logs/test.log".to_string(),
        send_timeout_secs: 5,
        persist_timeout_secs: 5,
        session_idle_secs: 0,
    }
}

/// **Test: Engine loads templates already present in the configured file.**
#[tokio::test]
async fn test_build_engine_loads_existing_templates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("templates.json");
    std::fs::write(
        &path,
        r#"{"MySeries": {"release": "Episode {episode}", "reserve": "Backup {episode}"}}"#,
    )
    .unwrap();

    let engine = build_engine(&config(path.display().to_string()), Arc::new(NoopBot))
        .await
        .unwrap();

    assert_eq!(engine.templates().list_names().await, vec!["MySeries"]);
}

/// **Test: Engine built on a missing file accepts events and keeps running.**
#[tokio::test]
async fn test_build_engine_with_missing_file_handles_video() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");

    let engine = build_engine(&config(path.display().to_string()), Arc::new(NoopBot))
        .await
        .unwrap();
    let inbound = Inbound::new(
        Chat::private(1),
        1,
        Event::VideoReceived {
            video_ref: VideoRef::new("vid"),
        },
    );

    engine.handle(&inbound).await.unwrap();
    assert!(engine.templates().list_names().await.is_empty());
}
