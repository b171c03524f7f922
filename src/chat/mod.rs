//! Chat backend client
//!
//! One request, one reply: the message text and language code go out as
//! JSON, the reply text comes back under `response`.
//!
//! ```text
//! POST <backend_url>   {"text": "namaste", "language": "hi"}
//! 200 OK               {"response": "..."}
//! 400 Bad Request      {"response": "Please provide a message"}
//! ```
//!
//! [`ChatClient::send`] blocks. [`ChatClient::spawn`] runs the same call on
//! a worker thread and hands back a [`PendingReply`] that receives exactly
//! one result; cancelling or dropping it discards whatever arrives later.

use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, bounded};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::{PolychatError, Result, chat};
use crate::language::Language;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest<'a> {
    pub text: &'a str,
    pub language: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

/// Blocking HTTP client for the chat backend
#[derive(Debug, Clone)]
pub struct ChatClient {
    url: String,
    http: reqwest::blocking::Client,
}

impl ChatClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let url = url.into();
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| chat::request_failed(&url, e.to_string()))?;
        Ok(Self { url, http })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send `text` and wait for the reply text
    pub fn send(&self, text: &str, language: Language) -> Result<String> {
        let text = text.trim();
        if text.is_empty() {
            return Err(PolychatError::EmptyMessage);
        }

        let request = ChatRequest {
            text,
            language: language.code(),
        };
        debug!(url = %self.url, language = request.language, "Sending chat request");

        let response = self
            .http
            .post(&self.url)
            .json(&request)
            .send()
            .map_err(|e| chat::request_failed(&self.url, e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .map_err(|e| chat::request_failed(&self.url, e.to_string()))?;

        let reply = parse_reply(status.as_u16(), &body);
        match &reply {
            Ok(text) => debug!(chars = text.len(), "Received chat reply"),
            Err(e) => error!("{e}"),
        }
        reply
    }

    /// Send on a worker thread; the result arrives through the returned handle
    pub fn spawn(&self, text: &str, language: Language) -> PendingReply {
        let (tx, rx) = bounded(1);
        let client = self.clone();
        let text = text.to_string();

        thread::spawn(move || {
            let result = client.send(&text, language);
            // The receiver is gone when the owner cancelled; nothing to deliver to
            let _ = tx.send(result);
        });

        PendingReply { rx: Some(rx) }
    }
}

/// Map a backend status and body onto reply text or an error
pub fn parse_reply(status: u16, body: &str) -> Result<String> {
    let parsed: std::result::Result<ChatReply, _> = serde_json::from_str(body);

    if (200..300).contains(&status) {
        return parsed.map(|r| r.response).map_err(|e| {
            chat::backend(status, format!("malformed reply: {e}"))
        });
    }

    let message = match parsed {
        Ok(reply) => reply.response,
        Err(_) if body.trim().is_empty() => "empty response body".to_string(),
        Err(_) => body.trim().to_string(),
    };
    Err(chat::backend(status, message))
}

/// Single-assignment handle to a reply computed on a worker thread
#[derive(Debug)]
pub struct PendingReply {
    rx: Option<Receiver<Result<String>>>,
}

impl PendingReply {
    /// Wait up to `timeout` for the reply.
    ///
    /// On timeout the reply is still pending; wait again or [`cancel`](Self::cancel).
    pub fn wait(&mut self, timeout: Duration) -> Result<String> {
        let Some(rx) = &self.rx else {
            return Err(PolychatError::ChatCancelled);
        };
        let result = match rx.recv_timeout(timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => {
                return Err(PolychatError::ChatTimeout {
                    seconds: timeout.as_secs(),
                });
            }
            // The worker died without answering
            Err(RecvTimeoutError::Disconnected) => Err(PolychatError::ChatCancelled),
        };
        self.rx = None;
        result
    }

    /// Stop listening; a reply arriving later is discarded
    pub fn cancel(&mut self) {
        self.rx = None;
    }
}

#[cfg(test)]
mod tests;
