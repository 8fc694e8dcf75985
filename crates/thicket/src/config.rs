//! Server-side settings the outbound layer reads.

/// Settings consulted when building outbound responses.
///
/// The session layer owns one of these for the whole server; the send
/// operations only ever read it. Two responses depend on it: the
/// version-mismatch rejection embeds [`client_version`] in its message,
/// and the map response carries [`greeting_text`] to newly entered
/// clients.
///
/// [`client_version`]: ServerConfig::client_version
/// [`greeting_text`]: ServerConfig::greeting_text
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Exact client version the server accepts.
    pub client_version: String,
    /// Greeting shown to a client on entering a map.
    pub greeting_text: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            client_version: "0.1.0".to_string(),
            greeting_text: "Welcome to the Thicket server!".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_nonempty_fields() {
        let config = ServerConfig::default();
        assert!(!config.client_version.is_empty());
        assert!(!config.greeting_text.is_empty());
    }
}
