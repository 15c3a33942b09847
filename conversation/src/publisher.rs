//! Distribution publisher: sends one video to the release and reserve destinations.

use repost_core::{Bot, DeliveryOutcome, Destination, PublishError, VideoRef};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, instrument};

/// Default bound on one outbound video send.
pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(60);

/// Sends a video with per-destination captions to the two configured channels.
pub struct Publisher {
    bot: Arc<dyn Bot>,
    release: Destination,
    reserve: Destination,
    send_timeout: Duration,
}

impl Publisher {
    pub fn new(bot: Arc<dyn Bot>, release: Destination, reserve: Destination) -> Self {
        Self {
            bot,
            release,
            reserve,
            send_timeout: DEFAULT_SEND_TIMEOUT,
        }
    }

    pub fn with_send_timeout(mut self, timeout: Duration) -> Self {
        self.send_timeout = timeout;
        self
    }

    /// Sends to both destinations concurrently and waits for both. Neither send is retried and a
    /// successful send is never undone; any failure returns both outcomes.
    #[instrument(skip_all, fields(video = %video))]
    pub async fn publish(
        &self,
        video: &VideoRef,
        release_caption: &str,
        reserve_caption: &str,
    ) -> Result<(), PublishError> {
        let (release, reserve) = tokio::join!(
            self.send(&self.release, video, release_caption),
            self.send(&self.reserve, video, reserve_caption),
        );

        if release.is_sent() && reserve.is_sent() {
            info!("step: video published to both destinations");
            Ok(())
        } else {
            Err(PublishError { release, reserve })
        }
    }

    async fn send(
        &self,
        destination: &Destination,
        video: &VideoRef,
        caption: &str,
    ) -> DeliveryOutcome {
        let chat = destination.chat();
        match tokio::time::timeout(self.send_timeout, self.bot.send_video(&chat, video, caption))
            .await
        {
            Ok(Ok(())) => {
                info!(
                    destination = %destination.kind,
                    chat_id = destination.chat_id,
                    "Video sent"
                );
                DeliveryOutcome::Sent
            }
            Ok(Err(e)) => {
                error!(
                    destination = %destination.kind,
                    chat_id = destination.chat_id,
                    error = %e,
                    "Failed to send video"
                );
                DeliveryOutcome::Failed(e.to_string())
            }
            Err(_) => {
                error!(
                    destination = %destination.kind,
                    chat_id = destination.chat_id,
                    timeout_secs = self.send_timeout.as_secs_f64(),
                    "Video send timed out"
                );
                DeliveryOutcome::Failed(format!(
                    "timed out after {}s",
                    self.send_timeout.as_secs_f64()
                ))
            }
        }
    }
}
