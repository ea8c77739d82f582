use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by the theming engine.
///
/// Stored-data problems (malformed JSON columns, bad color strings) never
/// reach this type; they are absorbed by the resolver's fallback chains.
/// What remains is the API boundary and genuine state inconsistencies.
#[derive(Error, Debug)]
pub enum ThemingError {
    #[error("Theme API call failed: {message}")]
    Api {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    },

    #[error("Theme with id '{theme_id}' not found in the theme library")]
    ThemeNotFound { theme_id: Uuid },

    #[error("The page has no active theme selected")]
    NoActiveTheme,

    #[error("Failed to serialize theme data: {message}")]
    Serialization { message: String },
}

impl ThemingError {
    /// Convenience constructor for API failures without an underlying source.
    pub fn api(message: impl Into<String>) -> Self {
        ThemingError::Api {
            message: message.into(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for ThemingError {
    fn from(err: serde_json::Error) -> Self {
        ThemingError::Serialization {
            message: err.to_string(),
        }
    }
}
