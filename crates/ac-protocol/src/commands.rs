//! Command table: exact trigger phrase → device command code + reply text.
//!
//! Resolution is a pure lookup. Matching is byte-exact: no trimming, no
//! case folding, no Unicode normalization. Text that is not a trigger
//! resolves to the default reply with no command.

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

/// Reply sent when the text matches no trigger.
pub const DEFAULT_REPLY: &str = "理解できません";

/// One row of the command table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommandEntry {
    /// Exact chat text that invokes this command.
    pub trigger: String,
    /// Payload published to the device.
    pub command: String,
    /// Text sent back to the chat sender.
    pub reply: String,
}

/// Outcome of resolving a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution<'a> {
    /// Command code to publish, `None` for unmapped text.
    pub command: Option<&'a str>,
    /// Reply text for the sender.
    pub reply: &'a str,
}

impl Resolution<'_> {
    pub fn is_unmapped(&self) -> bool {
        self.command.is_none()
    }
}

/// Errors raised while building a command table.
#[derive(Debug, Error)]
pub enum CommandTableError {
    #[error("command table has no entries")]
    Empty,

    #[error("duplicate trigger '{0}'")]
    DuplicateTrigger(String),

    #[error("entry {index}: {field} must not be empty")]
    EmptyField { index: usize, field: &'static str },

    #[error("default_reply must not be empty")]
    EmptyDefaultReply,

    #[error("invalid command table: {0}")]
    Parse(String),
}

/// Ordered trigger table plus the default reply.
#[derive(Debug, Clone)]
pub struct CommandMapping {
    entries: Vec<CommandEntry>,
    index: HashMap<String, usize>,
    default_reply: String,
}

/// On-disk TOML shape.
#[derive(Deserialize)]
struct CommandTableFile {
    #[serde(default = "default_reply")]
    default_reply: String,
    #[serde(default)]
    commands: Vec<CommandEntry>,
}

fn default_reply() -> String {
    DEFAULT_REPLY.to_string()
}

impl CommandMapping {
    /// Build a table, rejecting empty tables, blank fields and duplicate triggers.
    pub fn new(
        entries: Vec<CommandEntry>,
        default_reply: impl Into<String>,
    ) -> Result<Self, CommandTableError> {
        if entries.is_empty() {
            return Err(CommandTableError::Empty);
        }
        let default_reply: String = default_reply.into();
        if default_reply.is_empty() {
            return Err(CommandTableError::EmptyDefaultReply);
        }

        let mut index = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            if entry.trigger.is_empty() {
                return Err(CommandTableError::EmptyField {
                    index: i,
                    field: "trigger",
                });
            }
            if entry.command.is_empty() {
                return Err(CommandTableError::EmptyField {
                    index: i,
                    field: "command",
                });
            }
            if entry.reply.is_empty() {
                return Err(CommandTableError::EmptyField {
                    index: i,
                    field: "reply",
                });
            }
            if index.insert(entry.trigger.clone(), i).is_some() {
                return Err(CommandTableError::DuplicateTrigger(entry.trigger.clone()));
            }
        }

        Ok(Self {
            entries,
            index,
            default_reply,
        })
    }

    /// The four aircon commands the ESP32 firmware understands.
    pub fn builtin() -> Self {
        let entries: Vec<CommandEntry> = [
            ("暖房つけて", "heatOn", "暖房つけました"),
            ("除湿つけて", "defOn", "除湿つけました"),
            ("冷房つけて", "airOn", "冷房つけました"),
            ("エアコンけして", "airconOff", "けしました"),
        ]
        .into_iter()
        .map(|(trigger, command, reply)| CommandEntry {
            trigger: trigger.into(),
            command: command.into(),
            reply: reply.into(),
        })
        .collect();

        Self {
            index: index_of(&entries),
            entries,
            default_reply: DEFAULT_REPLY.to_string(),
        }
    }

    /// Load a table from TOML (`default_reply` + `[[commands]]`).
    pub fn from_toml_str(source: &str) -> Result<Self, CommandTableError> {
        let file: CommandTableFile =
            toml::from_str(source).map_err(|e| CommandTableError::Parse(e.to_string()))?;
        Self::new(file.commands, file.default_reply)
    }

    /// Look up `text` as an exact trigger.
    pub fn resolve(&self, text: &str) -> Resolution<'_> {
        match self.index.get(text) {
            Some(&i) => {
                let entry = &self.entries[i];
                Resolution {
                    command: Some(entry.command.as_str()),
                    reply: &entry.reply,
                }
            }
            None => Resolution {
                command: None,
                reply: &self.default_reply,
            },
        }
    }

    pub fn entries(&self) -> &[CommandEntry] {
        &self.entries
    }

    pub fn default_reply(&self) -> &str {
        &self.default_reply
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CommandMapping {
    fn default() -> Self {
        Self::builtin()
    }
}

fn index_of(entries: &[CommandEntry]) -> HashMap<String, usize> {
    entries
        .iter()
        .enumerate()
        .map(|(i, e)| (e.trigger.clone(), i))
        .collect()
}
