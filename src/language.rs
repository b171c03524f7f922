//! Supported chat languages and the speech resources bound to each

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PolychatError, config};

/// A chat language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Language {
    #[default]
    English,
    Hindi,
    Telugu,
}

impl Language {
    /// All languages in display order
    pub const ALL: [Language; 3] = [Language::English, Language::Hindi, Language::Telugu];

    /// Short code sent to the chat backend
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
            Language::Telugu => "te",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
            Language::Telugu => "Telugu",
        }
    }

    /// Name of the packaged recognition model bundle for this language
    pub fn model_bundle(self) -> &'static str {
        match self {
            Language::English => "vosk-model-small-en-us-0.15",
            Language::Hindi => "vosk-model-small-hi-0.22",
            Language::Telugu => "vosk-model-small-te-0.42",
        }
    }

    /// BCP 47 tag handed to a platform speech recognizer
    pub fn recognizer_locale(self) -> &'static str {
        match self {
            Language::English => "en-US",
            Language::Hindi => "hi-IN",
            Language::Telugu => "te-IN",
        }
    }

    /// POSIX-style locale for text-to-speech voices
    pub fn tts_locale(self) -> &'static str {
        match self {
            Language::English => "en_US",
            Language::Hindi => "hi_IN",
            Language::Telugu => "te_IN",
        }
    }

    /// Default bundle list: every language model, in display order
    pub fn default_bundles() -> Vec<String> {
        Self::ALL
            .iter()
            .map(|l| l.model_bundle().to_string())
            .collect()
    }
}

impl FromStr for Language {
    type Err = PolychatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "hi" | "hindi" => Ok(Language::Hindi),
            "te" | "telugu" => Ok(Language::Telugu),
            other => Err(config::unknown_language(other)),
        }
    }
}

impl TryFrom<String> for Language {
    type Error = PolychatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Language> for String {
    fn from(language: Language) -> Self {
        language.code().to_string()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.code())
    }
}
