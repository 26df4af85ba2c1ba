use std::fmt;

/// Processing state of a media container as reported by `?fields=status_code`.
///
/// Only `Finished` and `Error` end a poll loop; every other value means
/// "not ready yet".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerStatus {
    /// Provider is still transcoding / fetching the media.
    InProgress,
    /// Container can be published.
    Finished,
    /// Provider gave up on the media. Must never be published.
    Error,
    /// Any other value (`EXPIRED`, `PUBLISHED`, a missing field, ...).
    Unknown(String),
}

impl ContainerStatus {
    /// Parse the raw `status_code` value.
    ///
    /// Never fails: unrecognised values land in `Unknown`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "IN_PROGRESS" => ContainerStatus::InProgress,
            "FINISHED" => ContainerStatus::Finished,
            "ERROR" => ContainerStatus::Error,
            other => ContainerStatus::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ContainerStatus::InProgress => "IN_PROGRESS",
            ContainerStatus::Finished => "FINISHED",
            ContainerStatus::Error => "ERROR",
            ContainerStatus::Unknown(raw) => raw.as_str(),
        }
    }

    /// Returns `true` if polling must stop on this status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ContainerStatus::Finished | ContainerStatus::Error)
    }

    /// Returns `true` if the container may be handed to `media_publish`.
    pub fn is_publishable(&self) -> bool {
        matches!(self, ContainerStatus::Finished)
    }
}

impl fmt::Display for ContainerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
