//! The options page form: which server items are forwarded to.

use thiserror::Error;
use torrent2box_bridge::options::OptionsDto;
use torrent2box_bridge::storage::SettingsStore;

use super::Form;
use super::validation::Validator;
use crate::autofocus::{Capability, FieldDescriptor, FieldKind, FormLayout};
use crate::toast::Toaster;

pub type OptionsForm<S, R> = Form<OptionsDto, S, R>;

/// Fields of the options page, in display order.
pub const OPTIONS_LAYOUT: FormLayout = FormLayout {
    fields: &[
        FieldDescriptor {
            name: "server",
            label: "Server",
            kind: FieldKind::Input,
        },
        FieldDescriptor {
            name: "port",
            label: "Port",
            kind: FieldKind::Input,
        },
        FieldDescriptor {
            name: "save",
            label: "Save",
            kind: FieldKind::Button,
        },
    ],
    capabilities: &[Capability::AutofocusFirstInput],
};

/// A field binding could not be applied to the draft.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldInputError {
    #[error("Unknown field '{0}'")]
    UnknownField(String),
    #[error("'{value}' is not a valid port number")]
    InvalidPort { value: String },
}

pub fn options_validator() -> Validator<OptionsDto> {
    Validator::new()
        .field("server", |options: &OptionsDto| {
            if options.server.trim().is_empty() {
                Err("must not be empty".to_string())
            } else {
                Ok(())
            }
        })
        .field("server", |options: &OptionsDto| {
            if options.server.chars().any(char::is_whitespace) {
                Err("must not contain whitespace".to_string())
            } else if options.server.contains("://") {
                Err("must be a host name, without a scheme".to_string())
            } else {
                Ok(())
            }
        })
        .field("port", |options: &OptionsDto| {
            if options.port == 0 {
                Err("must be between 1 and 65535".to_string())
            } else {
                Ok(())
            }
        })
}

/// Loads the stored options once and builds the form around them.
pub async fn load_options_form<S, R>(store: S, toaster: R) -> OptionsForm<S, R>
where
    S: SettingsStore<OptionsDto>,
    R: Toaster,
{
    Form::load(OptionsDto::default(), options_validator(), store, toaster).await
}

/// Applies raw user input for `field` to the draft.
pub fn apply_field(
    draft: &mut OptionsDto,
    field: &str,
    value: &str,
) -> Result<(), FieldInputError> {
    match field {
        "server" => draft.server = value.trim().to_string(),
        "port" => {
            draft.port = value
                .trim()
                .parse()
                .map_err(|_| FieldInputError::InvalidPort {
                    value: value.to_string(),
                })?;
        }
        other => return Err(FieldInputError::UnknownField(other.to_string())),
    }
    Ok(())
}

/// Current value of `field` as display text.
pub fn field_value(options: &OptionsDto, field: &str) -> Option<String> {
    match field {
        "server" => Some(options.server.clone()),
        "port" => Some(options.port.to_string()),
        _ => None,
    }
}
