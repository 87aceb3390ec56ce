use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ServerConfig {
    pub base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                base_url: "http://localhost:8000".to_string(),
            },
        }
    }
}

/// One extracurricular activity as the server reports it. The participant
/// roster is server-authoritative; the client never edits it in place.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Activity {
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    #[serde(default)]
    pub participants: Vec<String>,
}

impl Activity {
    /// Remaining capacity, rendered as given — may go negative if the
    /// server over-books, we don't clamp.
    pub fn spots_left(&self) -> i64 {
        self.max_participants as i64 - self.participants.len() as i64
    }
}

/// Full snapshot of the server's activity catalog, keyed by activity name.
/// Replaced wholesale on every fetch, never patched incrementally.
pub type Catalog = BTreeMap<String, Activity>;

/// Server verdict on a signup or unregister write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// 2xx with a `{message}` body.
    Accepted { message: String },
    /// Non-2xx; `detail` comes from the error body when the server sent one.
    Rejected { detail: Option<String> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

impl StatusKind {
    pub fn css_class(self) -> &'static str {
        match self {
            StatusKind::Success => "success",
            StatusKind::Error => "error",
        }
    }
}

/// The single transient status message. Hidden until an operation completes,
/// auto-hidden again five seconds later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub text: String,
    pub kind: StatusKind,
    pub visible: bool,
}

impl Default for Status {
    fn default() -> Self {
        Self {
            text: String::new(),
            kind: StatusKind::Success,
            visible: false,
        }
    }
}
