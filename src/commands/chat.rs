//! Chat command implementation
//!
//! A [`ChatSession`] owns the transcript and drives the exchange with the
//! backend. With `--provision`, models are provisioned first and any issues
//! land in the transcript. Output is rendered from a transcript subscription, so every
//! message (replies, backend errors, model warnings) reaches the terminal
//! through the same path.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use console::Style;
use crossbeam_channel::Receiver;
use inquire::InquireError;
use tracing::{debug, warn};

use crate::asset::DirAssetSource;
use crate::chat::ChatClient;
use crate::cli::ChatArgs;
use crate::config::{self, AppConfig, Prefs};
use crate::error::{PolychatError, Result, fs as fs_err};
use crate::language::Language;
use crate::model::ModelDir;
use crate::provision::Provisioner;
use crate::transcript::{Author, Transcript, TranscriptEntry, TranscriptObserver};

/// Typed at the prompt to end an interactive session
const QUIT_COMMAND: &str = "/quit";

/// Extra time granted to the worker beyond the HTTP timeout
const REPLY_GRACE: Duration = Duration::from_secs(2);

/// Run chat command
pub fn run(config_path: Option<PathBuf>, args: ChatArgs) -> Result<()> {
    let app_config = AppConfig::load(config_path.as_deref())?;
    let language = match args.language.as_deref() {
        Some(code) => code.parse::<Language>()?,
        None => Prefs::load(&config::data_dir()?)?.language,
    };
    let models_dir = app_config.models_dir(args.models.as_deref())?;
    let client = ChatClient::new(app_config.backend_url.clone(), app_config.request_timeout())?;
    debug!(url = client.url(), language = language.code(), "Starting chat session");

    let mut session = ChatSession::new(client, language, app_config.request_timeout());
    let output = session.transcript.subscribe();
    if args.provision {
        let source = DirAssetSource::new(app_config.assets_dir(None));
        Provisioner::new(&source, &models_dir).provision(
            &app_config.bundles,
            &mut TranscriptObserver::new(&mut session.transcript),
        );
    }
    session.check_model(&models_dir);
    render(&output);

    let result = match args.message {
        Some(message) => {
            let sent = session.send(&message);
            render(&output);
            match sent {
                Ok(Some(_)) => Ok(()),
                Ok(None) => Err(PolychatError::EmptyMessage),
                Err(e) => Err(e),
            }
        }
        None => interactive(&mut session, &output),
    };

    if let Some(path) = &args.save {
        save_transcript(path, &session.transcript().snapshot())?;
    }
    result
}

/// One conversation with the backend in a fixed language
pub struct ChatSession {
    client: ChatClient,
    language: Language,
    reply_timeout: Duration,
    transcript: Transcript,
}

impl ChatSession {
    pub fn new(client: ChatClient, language: Language, request_timeout: Duration) -> Self {
        Self {
            client,
            language,
            reply_timeout: request_timeout + REPLY_GRACE,
            transcript: Transcript::new(),
        }
    }

    /// Warn in the transcript when the language's model cannot be loaded
    pub fn check_model(&mut self, models_dir: &Path) -> bool {
        match ModelDir::for_language(models_dir, self.language) {
            Ok(model) => {
                debug!(
                    bundle = model.bundle(),
                    path = %model.path().display(),
                    entries = model.entries().len(),
                    "Model loaded"
                );
                true
            }
            Err(e) => {
                warn!(language = self.language.code(), "{e}");
                self.transcript.push_system(&format!("Error: {e}"));
                self.transcript.push_system(&format!(
                    "Voice input is unavailable for {}",
                    self.language.name()
                ));
                false
            }
        }
    }

    /// Send one message and append the outcome to the transcript.
    ///
    /// Returns `Ok(None)` when the text was blank and nothing was sent.
    pub fn send(&mut self, text: &str) -> Result<Option<String>> {
        if self.transcript.push_user(text).is_none() {
            return Ok(None);
        }

        let mut pending = self.client.spawn(text, self.language);
        match pending.wait(self.reply_timeout) {
            Ok(reply) => {
                self.transcript.push_bot(&reply);
                Ok(Some(reply))
            }
            Err(e) => {
                // A reply arriving after the timeout is not shown
                pending.cancel();
                self.transcript.push_system(&format!("Error: {e}"));
                Err(e)
            }
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }
}

fn interactive(session: &mut ChatSession, output: &Receiver<TranscriptEntry>) -> Result<()> {
    println!(
        "Chatting in {}. Type {} to leave.",
        session.language,
        Style::new().cyan().apply_to(QUIT_COMMAND)
    );

    loop {
        let line = match inquire::Text::new(&format!("[{}]", session.language.code())).prompt() {
            Ok(line) => line,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e.into()),
        };
        if line.trim() == QUIT_COMMAND {
            break;
        }

        // Errors are already in the transcript; the session goes on
        if let Err(e) = session.send(&line) {
            debug!("Message failed: {e}");
        }
        render(output);
    }

    Ok(())
}

/// Print transcript entries that arrived since the last call
fn render(output: &Receiver<TranscriptEntry>) {
    for entry in output.try_iter() {
        match entry.author {
            // The prompt already echoed what the user typed
            Author::User => {}
            Author::Bot => println!("{} {}", Style::new().green().bold().apply_to("bot:"), entry.text),
            Author::System => eprintln!("{}", Style::new().yellow().apply_to(&entry.text)),
        }
    }
}

fn save_transcript(path: &Path, entries: &[TranscriptEntry]) -> Result<()> {
    let json = serde_json::to_string_pretty(entries)
        .map_err(|e| fs_err::io_error(format!("Failed to serialize transcript: {e}")))?;
    fs::write(path, json).map_err(|e| {
        fs_err::io_error(format!(
            "Failed to write transcript to {}: {e}",
            path.display()
        ))
    })?;
    debug!(path = %path.display(), entries = entries.len(), "Saved transcript");
    Ok(())
}
