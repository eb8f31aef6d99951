/// Application configuration, fixed at build time.
///
/// The values come from compile-time environment variables so the wasm bundle
/// carries them the same way the server binary does. `admin_pin` is compared
/// verbatim on the client; it gates the summary UI and nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the assignment backend, without a trailing slash.
    pub endpoint: String,
    /// Organizer PIN unlocking the summary panel.
    pub admin_pin: String,
    /// Whether participants must also enter a personal PIN to reveal
    /// their assignment.
    pub require_pin: bool,
}

const DEFAULT_ENDPOINT: &str = "http://localhost:3000/intercambio";
const DEFAULT_ADMIN_PIN: &str = "1234";

impl AppConfig {
    pub fn from_env() -> Self {
        AppConfig {
            endpoint: option_env!("INTERCAMBIO_API_URL")
                .unwrap_or(DEFAULT_ENDPOINT)
                .to_string(),
            admin_pin: option_env!("INTERCAMBIO_ADMIN_PIN")
                .unwrap_or(DEFAULT_ADMIN_PIN)
                .to_string(),
            require_pin: option_env!("INTERCAMBIO_REQUIRE_PIN") != Some("0"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        // The test binary is built without the INTERCAMBIO_* variables set.
        let config = AppConfig::from_env();
        assert_eq!(config.endpoint, "http://localhost:3000/intercambio");
        assert_eq!(config.admin_pin, "1234");
        assert!(config.require_pin);
    }
}
