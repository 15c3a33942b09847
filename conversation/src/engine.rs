//! Dispatch engine: resolves the caller's session, runs the state machine, and performs the
//! resulting actions. Events of one conversation are handled strictly one at a time.

use dashmap::DashMap;
use repost_core::{Bot, ConversationKey, Inbound, Result, VideoRef};
use std::sync::Arc;
use template_store::{SeriesTemplate, TemplateStore};
use tokio::sync::Mutex;
use tracing::{error, info, instrument, warn};

use crate::machine::{transition, Action, Transition};
use crate::messages;
use crate::publisher::Publisher;
use crate::state::Session;
use crate::store::SessionStore;

pub struct ConversationEngine {
    bot: Arc<dyn Bot>,
    templates: Arc<dyn TemplateStore>,
    sessions: Arc<dyn SessionStore>,
    publisher: Publisher,
    /// One turn lock per conversation.
    turns: DashMap<ConversationKey, Arc<Mutex<()>>>,
}

impl ConversationEngine {
    pub fn new(
        bot: Arc<dyn Bot>,
        templates: Arc<dyn TemplateStore>,
        sessions: Arc<dyn SessionStore>,
        publisher: Publisher,
    ) -> Self {
        Self {
            bot,
            templates,
            sessions,
            publisher,
            turns: DashMap::new(),
        }
    }

    pub fn templates(&self) -> &Arc<dyn TemplateStore> {
        &self.templates
    }

    /// Handles one inbound event. Returns the first outbound failure, after still attempting
    /// every remaining action. If a menu cannot be shown, the session goes back to where it was
    /// before the event and the operator gets a plain notice instead.
    #[instrument(
        skip(self, inbound),
        fields(chat_id = inbound.chat.id, user_id = inbound.user_id, event = inbound.event.kind())
    )]
    pub async fn handle(&self, inbound: &Inbound) -> Result<()> {
        let key = inbound.key();
        let turn = self.turns.entry(key).or_default().clone();
        let result = {
            let _turn = turn.lock().await;
            self.take_turn(key, inbound).await
        };
        drop(turn);
        self.turns.remove_if(&key, |_, lock| Arc::strong_count(lock) == 1);
        result
    }

    /// Conversations with a turn in progress or waiting.
    pub fn open_turns(&self) -> usize {
        self.turns.len()
    }

    async fn take_turn(&self, key: ConversationKey, inbound: &Inbound) -> Result<()> {
        let session = self.sessions.load(key).await?;
        let names = self.templates.list_names().await;
        let Transition {
            session: next,
            actions,
        } = transition(&session, &inbound.event, &names);

        info!(
            from = session.state.name(),
            to = next.state.name(),
            actions = actions.len(),
            "step: transition"
        );

        self.store_session(key, next).await?;

        let mut first_error = None;
        for action in actions {
            let shows_menu = matches!(action, Action::ReplyWithMenu { .. });
            if let Err(e) = self.perform(inbound, action).await {
                error!(error = %e, "Failed to deliver message to operator");
                if shows_menu {
                    warn!(state = session.state.name(), "Menu not shown, session restored");
                    self.store_session(key, session.clone()).await?;
                    if let Err(notice) = self
                        .bot
                        .send_message(&inbound.chat, messages::MENU_NOT_SHOWN)
                        .await
                    {
                        error!(error = %notice, "Failed to send menu failure notice");
                    }
                }
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn store_session(&self, key: ConversationKey, session: Session) -> Result<()> {
        if session.is_idle() {
            self.sessions.clear(key).await
        } else {
            self.sessions.save(key, session).await
        }
    }

    async fn perform(&self, inbound: &Inbound, action: Action) -> Result<()> {
        match action {
            Action::Reply(text) => self.bot.send_message(&inbound.chat, &text).await,
            Action::ReplyWithMenu { text, menu } => {
                let message_id = self.bot.send_menu(&inbound.chat, &text, &menu).await?;
                info!(message_id = %message_id, buttons = menu.buttons.len(), "Menu sent");
                Ok(())
            }
            Action::EditOrigin(text) => match &inbound.origin_message_id {
                Some(message_id) => {
                    match self.bot.edit_message(&inbound.chat, message_id, &text).await {
                        Ok(()) => Ok(()),
                        Err(e) => {
                            warn!(error = %e, message_id = %message_id, "Edit failed, sending new message");
                            self.bot.send_message(&inbound.chat, &text).await
                        }
                    }
                }
                None => self.bot.send_message(&inbound.chat, &text).await,
            },
            Action::SaveTemplate(template) => self.save_template(inbound, template).await,
            Action::Publish {
                video_ref,
                series,
                episode,
            } => self.publish(inbound, &video_ref, &series, &episode).await,
        }
    }

    async fn save_template(&self, inbound: &Inbound, template: SeriesTemplate) -> Result<()> {
        let name = template.name.clone();
        let text = match self.templates.upsert(template).await {
            Ok(()) => {
                info!(name = %name, "step: template saved");
                messages::template_saved(&name)
            }
            Err(e) => {
                error!(name = %name, error = %e, "Template save failed");
                messages::template_not_saved(&name, &e.to_string())
            }
        };
        self.bot.send_message(&inbound.chat, &text).await
    }

    async fn publish(
        &self,
        inbound: &Inbound,
        video_ref: &VideoRef,
        series: &str,
        episode: &str,
    ) -> Result<()> {
        let template = match self.templates.get(series).await {
            Ok(template) => template,
            Err(e) => {
                warn!(series = %series, error = %e, "Series template vanished before publish");
                return self
                    .bot
                    .send_message(&inbound.chat, &messages::series_missing(series))
                    .await;
            }
        };

        let (release_caption, reserve_caption) = template.captions(episode);
        let text = match self
            .publisher
            .publish(video_ref, &release_caption, &reserve_caption)
            .await
        {
            Ok(()) => {
                info!(series = %series, episode = %episode, "step: episode published");
                messages::episode_published(episode, series)
            }
            Err(e) => {
                error!(
                    series = %series,
                    episode = %episode,
                    partial = e.is_partial(),
                    error = %e,
                    "Episode publish failed"
                );
                messages::episode_not_published(episode, series, &e)
            }
        };
        self.bot.send_message(&inbound.chat, &text).await
    }
}
