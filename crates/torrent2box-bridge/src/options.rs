use serde::{Deserialize, Serialize};

/// Name of the file the options are persisted to, inside the user's
/// configuration directory.
pub const OPTIONS_FILE_NAME: &str = "options.toml";

/// User-editable options of the extension.
///
/// The default value is intentionally not valid: a fresh install has no
/// server configured, and the options form refuses to save it until the user
/// fills both fields in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct OptionsDto {
    /// Host name or address of the remote service items are forwarded to.
    pub server: String,
    /// TCP port of the remote service.
    pub port: u16,
}

impl OptionsDto {
    pub fn new(server: impl Into<String>, port: u16) -> Self {
        Self {
            server: server.into(),
            port,
        }
    }

    /// Returns `server:port`, the address the background context talks to.
    pub fn address(&self) -> String {
        format!("{}:{}", self.server, self.port)
    }
}
