use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Selects the icon shown next to a notification.
///
/// The set is closed: every variant maps to a themed icon the notification
/// center resolves by name (see [`IconVariant::icon_name`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IconVariant {
    /// Neutral informational message.
    #[default]
    Info,
    /// A forwarded item was accepted or an operation completed.
    Success,
    /// Something went wrong and the user should look at it.
    Error,
}

impl IconVariant {
    /// Icon name from the freedesktop icon naming specification.
    pub fn icon_name(self) -> &'static str {
        match self {
            IconVariant::Info => "dialog-information",
            IconVariant::Success => "emblem-default",
            IconVariant::Error => "dialog-error",
        }
    }
}

/// Text that does not name an [`IconVariant`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown icon variant `{0}`")]
pub struct UnknownIconVariant(pub String);

impl std::str::FromStr for IconVariant {
    type Err = UnknownIconVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "info" => Ok(IconVariant::Info),
            "success" => Ok(IconVariant::Success),
            "error" => Ok(IconVariant::Error),
            _ => Err(UnknownIconVariant(value.to_string())),
        }
    }
}

/// An event raised in the background context that should reach the user.
///
/// Built at the call site and handed over to the notification gateway, which
/// consumes it exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationEvent {
    /// Icon to present the notification with.
    pub kind: IconVariant,
    /// User-facing text of the notification.
    pub body: String,
}

impl NotificationEvent {
    pub fn new(kind: IconVariant, body: impl Into<String>) -> Self {
        Self {
            kind,
            body: body.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_variants_case_insensitively() {
        assert_eq!("Success".parse::<IconVariant>(), Ok(IconVariant::Success));
        assert_eq!("error".parse::<IconVariant>(), Ok(IconVariant::Error));
    }

    #[test]
    fn unknown_variant_keeps_the_input() {
        let error = "Warning".parse::<IconVariant>().unwrap_err();
        assert_eq!(error, UnknownIconVariant("Warning".to_string()));
        assert_eq!(error.to_string(), "unknown icon variant `Warning`");
    }

    #[test]
    fn variants_use_themed_icon_names() {
        assert_eq!(IconVariant::Info.icon_name(), "dialog-information");
        assert_eq!(IconVariant::Success.icon_name(), "emblem-default");
        assert_eq!(IconVariant::Error.icon_name(), "dialog-error");
        for variant in [IconVariant::Info, IconVariant::Success, IconVariant::Error] {
            assert!(!variant.icon_name().contains('/'));
        }
    }
}
