//! Validated game settings taken from the command line.

use crate::session::SessionError;

/// Shortest accepted nickname, in characters.
const NICK_MIN_LEN: usize = 2;
/// Longest accepted nickname, in characters.
const NICK_MAX_LEN: usize = 10;

/// What the player asked for, built once at start-up and shared by every game
/// cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Own nickname, 2 to 10 characters
    pub nick: String,
    /// Own description, may be empty
    pub desc: String,
    /// Opponent to challenge, skipping discovery
    pub target_nick: Option<String>,
    /// Play against the server bot
    pub wpbot: bool,
    /// Wait to be challenged instead of picking an opponent
    pub wait: bool,
}

impl Settings {
    /// Validates the command-line values.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Validation`] when the nickname is missing or its
    /// length is out of range, or when `wpbot` and `wait` are both set.
    pub fn new(
        nick: Option<String>,
        desc: String,
        target_nick: Option<String>,
        wpbot: bool,
        wait: bool,
    ) -> Result<Self, SessionError> {
        let nick = nick.ok_or_else(|| SessionError::Validation("nick is required".to_owned()))?;

        let length = nick.chars().count();
        if !(NICK_MIN_LEN..=NICK_MAX_LEN).contains(&length) {
            return Err(SessionError::Validation(format!(
                "nick must be between {} and {} characters, got {}",
                NICK_MIN_LEN, NICK_MAX_LEN, length
            )));
        }

        if wpbot && wait {
            return Err(SessionError::Validation(
                "wpbot flag and waiting flag are mutually exclusive".to_owned(),
            ));
        }

        Ok(Settings {
            nick,
            desc,
            target_nick: target_nick.filter(|target| !target.is_empty()),
            wpbot,
            wait,
        })
    }

    /// Whether the opponent has to be picked interactively.
    pub fn needs_discovery(&self) -> bool {
        self.target_nick.is_none() && !self.wpbot && !self.wait
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(nick: &str) -> Result<Settings, SessionError> {
        Settings::new(Some(nick.to_owned()), String::new(), None, false, false)
    }

    #[test]
    fn test_nick_length() {
        assert!(settings("ab").is_ok());
        assert!(settings("abcdefghij").is_ok());
        assert!(matches!(settings("a"), Err(SessionError::Validation(_))));
        assert!(matches!(
            settings("abcdefghijk"),
            Err(SessionError::Validation(_))
        ));
    }

    #[test]
    fn test_nick_length_counts_characters() {
        assert!(settings("żółwiątko").is_ok());
        assert!(settings("ż").is_err());
    }

    #[test]
    fn test_nick_required() {
        let result = Settings::new(None, String::new(), None, false, false);
        assert!(matches!(result, Err(SessionError::Validation(_))));
    }

    #[test]
    fn test_wpbot_and_wait_are_exclusive() {
        let result = Settings::new(Some("alice".to_owned()), String::new(), None, true, true);

        match result {
            Err(SessionError::Validation(message)) => {
                assert_eq!(message, "wpbot flag and waiting flag are mutually exclusive")
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_needs_discovery() {
        assert!(settings("alice").unwrap().needs_discovery());

        let targeted = Settings::new(
            Some("alice".to_owned()),
            String::new(),
            Some("bob".to_owned()),
            false,
            false,
        )
        .unwrap();
        assert!(!targeted.needs_discovery());

        let bot = Settings::new(Some("alice".to_owned()), String::new(), None, true, false).unwrap();
        assert!(!bot.needs_discovery());

        let waiting =
            Settings::new(Some("alice".to_owned()), String::new(), None, false, true).unwrap();
        assert!(!waiting.needs_discovery());
    }

    #[test]
    fn test_empty_target_is_none() {
        let settings = Settings::new(
            Some("alice".to_owned()),
            String::new(),
            Some(String::new()),
            false,
            false,
        )
        .unwrap();

        assert_eq!(settings.target_nick, None);
        assert!(settings.needs_discovery());
    }
}
