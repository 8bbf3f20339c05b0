//! The options page as a UI surface.
//!
//! A surface lives as long as the page is open. While alive it listens to the
//! message relay, and it turns user commands into field bindings and form
//! submissions.

use std::str::FromStr;

use thiserror::Error;
use tokio::sync::mpsc::Sender;
use torrent2box_bridge::MessageToBackground;
use torrent2box_bridge::notification::{IconVariant, NotificationEvent, UnknownIconVariant};
use torrent2box_bridge::options::OptionsDto;
use torrent2box_bridge::relay::{MessageRelay, SurfaceSubscription};
use torrent2box_bridge::storage::SettingsStore;

use crate::autofocus::Capability;
use crate::forms::options_form::{
    FieldInputError, OPTIONS_LAYOUT, OptionsForm, apply_field, field_value, load_options_form,
};
use crate::forms::{FormController, SubmitOutcome};
use crate::toast::Toaster;

/// A user action on the options page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCommand {
    /// `set <field> <value>`
    Set { field: String, value: String },
    /// `save`
    Save,
    /// `show`
    Show,
    /// `notify <variant> <body>`, a test notification sent through the
    /// background context.
    Notify(NotificationEvent),
    /// `quit`
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error(transparent)]
    Variant(#[from] UnknownIconVariant),
}

impl FromStr for SurfaceCommand {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        match command {
            "" => Err(CommandError::Empty),
            "set" => {
                let (field, value) = rest
                    .split_once(char::is_whitespace)
                    .ok_or(CommandError::Usage("set <field> <value>"))?;
                Ok(SurfaceCommand::Set {
                    field: field.to_string(),
                    value: value.trim().to_string(),
                })
            }
            "save" => Ok(SurfaceCommand::Save),
            "show" => Ok(SurfaceCommand::Show),
            "notify" => {
                let (variant, body) = rest
                    .split_once(char::is_whitespace)
                    .ok_or(CommandError::Usage("notify <info|success|error> <body>"))?;
                let variant = variant.parse::<IconVariant>()?;
                Ok(SurfaceCommand::Notify(NotificationEvent::new(
                    variant,
                    body.trim(),
                )))
            }
            "quit" | "exit" => Ok(SurfaceCommand::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

pub struct OptionsSurface<S, R> {
    form: OptionsForm<S, R>,
    subscription: SurfaceSubscription,
    background: Sender<MessageToBackground>,
    /// Last message relayed from the background context.
    last_message: Option<String>,
    /// Last field binding error, shown until the next command.
    input_error: Option<FieldInputError>,
}

impl<S, R> OptionsSurface<S, R>
where
    S: SettingsStore<OptionsDto>,
    R: Toaster,
{
    /// Opens the page: subscribes to the relay, then loads the options once.
    pub async fn open(
        store: S,
        toaster: R,
        relay: &MessageRelay,
        background: Sender<MessageToBackground>,
    ) -> Self {
        let subscription = relay.subscribe();
        let form = load_options_form(store, toaster).await;
        Self {
            form,
            subscription,
            background,
            last_message: None,
            input_error: None,
        }
    }

    pub fn form(&self) -> &OptionsForm<S, R> {
        &self.form
    }

    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }

    /// Waits for the next relayed message, `None` once the relay is gone.
    pub async fn next_relayed(&mut self) -> Option<String> {
        self.subscription.recv().await
    }

    /// Updates the page with a message relayed from the background context.
    pub fn receive(&mut self, message: String) {
        log::debug!("Options page received: {message}");
        self.last_message = Some(message);
    }

    /// Applies one user command. Returns `false` when the page should close.
    pub async fn handle_command(&mut self, command: SurfaceCommand) -> bool {
        self.input_error = None;
        match command {
            SurfaceCommand::Set { field, value } => {
                if let Err(error) = apply_field(self.form.draft_mut(), &field, &value) {
                    self.input_error = Some(error);
                }
            }
            SurfaceCommand::Save => {
                if self.form.submit().await == SubmitOutcome::Saved {
                    self.send_to_background(MessageToBackground::OptionsSaved)
                        .await;
                }
            }
            SurfaceCommand::Show => {}
            SurfaceCommand::Notify(event) => {
                self.send_to_background(MessageToBackground::Notify(event))
                    .await;
            }
            SurfaceCommand::Quit => return false,
        }
        true
    }

    async fn send_to_background(&self, message: MessageToBackground) {
        if let Err(error) = self.background.send(message).await {
            log::warn!("Background context is gone: {error}");
        }
    }

    /// Text rendering of the page.
    pub fn render(&self) -> String {
        let state = self.form.state();
        let focus = OPTIONS_LAYOUT.focus_target().map(|field| field.name);

        let mut lines = Vec::new();
        for field in OPTIONS_LAYOUT.fields {
            let Some(value) = field_value(&state.draft, field.name) else {
                continue;
            };
            let marker = if Some(field.name) == focus { ">" } else { " " };
            lines.push(format!("{marker} {:<8} {value}", field.label));
        }
        if let Some(target) = focus {
            lines.push(format!(
                "  [{}] {target}",
                Capability::AutofocusFirstInput.tag()
            ));
        }
        if let Some(error) = &self.input_error {
            lines.push(format!("! {error}"));
        }
        if let Some(error) = &state.error_message {
            lines.push(format!("! {error}"));
        }
        lines.extend(
            self.form
                .validation_errors()
                .iter()
                .map(|error| format!("  {error}")),
        );
        if let Some(message) = &self.last_message {
            lines.push(format!("* {message}"));
        }

        let mut page = lines.join("\n");
        page.push('\n');
        page
    }
}
