//! Domain library for the Tech Day catalog.
//!
//! This crate only depends on `serde` (inherited from the workspace) and holds
//! the catalog types, the repository port, and error definitions. Keep HTTP
//! and IO concerns out of this crate.

use std::error::Error;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Opaque key identifying a speaker in the fixture (e.g. `s1`).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SpeakerKey(String);

impl SpeakerKey {
    pub fn new<S: Into<String>>(s: S) -> Result<Self, CoreError> {
        let val = s.into();
        if val.trim().is_empty() {
            return Err(CoreError::InvalidKey("empty".into()));
        }
        Ok(Self(val))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SpeakerKey {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<SpeakerKey> for String {
    fn from(k: SpeakerKey) -> Self {
        k.0
    }
}

impl Display for SpeakerKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A person presenting at the event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speaker {
    pub name: String,
    pub role: String,
    /// Public profile URL. Older fixtures call this field `linkedin`.
    #[serde(alias = "linkedin")]
    pub profile_link: String,
}

/// A schedule entry. Breaks are talks with no speakers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Talk {
    pub id: String,
    pub title: String,
    pub category: String,
    pub description: String,
    /// Display-formatted range, e.g. `09:00 - 10:00`.
    pub time: String,
    #[serde(default)]
    pub speakers: Vec<SpeakerKey>,
}

/// A talk with its speaker keys resolved against the store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EnrichedTalk {
    #[serde(flatten)]
    pub talk: Talk,
    /// Resolved speakers in `talk.speakers` order; unknown keys are skipped.
    pub speaker_details: Vec<Speaker>,
}

/// Static metadata about the event itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventInfo {
    pub title: String,
    pub date: String,
    pub location: String,
    pub description: String,
}

/// Everything the landing page needs for one query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CatalogSearch {
    pub event: EventInfo,
    pub schedule: Vec<EnrichedTalk>,
    pub speakers: Vec<Speaker>,
    /// The query as supplied, or empty when none was given.
    pub query: String,
}

/// Read-only repository port for the catalog fixture.
///
/// Implementations are immutable after construction, so every accessor is
/// infallible and can be shared across threads without locking.
pub trait CatalogRepository: Send + Sync {
    fn event_info(&self) -> &EventInfo;
    /// All talks in fixture order.
    fn all_talks(&self) -> &[Talk];
    fn speaker_by_id(&self, key: &SpeakerKey) -> Option<&Speaker>;
    /// All speakers in fixture order.
    fn all_speakers(&self) -> &[Speaker];
}

/// Core domain errors (no external error crates to keep deps minimal).
#[derive(Debug, PartialEq, Eq)]
pub enum CoreError {
    InvalidKey(String),
    DuplicateSpeaker(String),
    DuplicateTalk(String),
    InvalidFixture(String),
}

impl Display for CoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CoreError::InvalidKey(msg) => write!(f, "invalid speaker key: {}", msg),
            CoreError::DuplicateSpeaker(key) => write!(f, "duplicate speaker key: {}", key),
            CoreError::DuplicateTalk(id) => write!(f, "duplicate talk id: {}", id),
            CoreError::InvalidFixture(msg) => write!(f, "invalid fixture: {}", msg),
        }
    }
}

impl Error for CoreError {}

/// Return a short about/version line for the binary to print.
pub fn about() -> String {
    let pkg = env!("CARGO_PKG_NAME");
    let ver = env!("CARGO_PKG_VERSION");
    format!("{} v{} - catalog library loaded", pkg, ver)
}

pub mod adapters;
pub mod query;
pub mod service;
