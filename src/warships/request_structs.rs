//! Request bodies sent to the warships server.

use serde::Serialize;

/// Body of `POST /api/game`, registering a new match.
///
/// Empty optional fields are left out of the JSON so the server applies its
/// own defaults (random opponent matching, no description).
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct InitGameRequest {
    /// Own nickname
    pub nick: String,
    /// Own description shown to the opponent
    #[serde(skip_serializing_if = "String::is_empty")]
    pub desc: String,
    /// Nickname of the challenged opponent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_nick: Option<String>,
    /// Whether to play against the server bot
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub wpbot: bool,
}

/// Body of `POST /api/game/fire`.
#[derive(Serialize, Debug)]
pub(crate) struct FireRequest<'a> {
    /// Targeted cell, e.g. `B7`
    pub coord: &'a str,
}
