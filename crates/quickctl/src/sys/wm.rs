use derive_more::{AsRef, Deref, Display, From, Into};
use hyprland::data::Monitors;
use hyprland::prelude::*;
use serde::{Deserialize, Serialize};
use std::process::{Command, Stdio};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, From, Into, AsRef)]
pub struct MonitorName(String);

crate::impl_string_newtype!(MonitorName);

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ShellCommand(String);

crate::impl_string_newtype!(ShellCommand);

impl ShellCommand {
    /// Whether the command is non-empty and its quoting is balanced.
    pub fn is_runnable(&self) -> bool {
        shell_words::split(&self.0).is_ok_and(|words| !words.is_empty())
    }
}

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("Command '{0}' is empty or has unbalanced quotes")]
    NotRunnable(ShellCommand),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub fn get_active_monitor() -> Option<MonitorName> {
    Monitors::get()
        .ok()?
        .into_iter()
        .find(|m| m.focused)
        .map(|m| MonitorName(m.name))
}

pub fn spawn(exec: &ShellCommand) -> Result<(), ActionError> {
    if !exec.is_runnable() {
        return Err(ActionError::NotRunnable(exec.clone()));
    }
    Command::new("sh")
        .arg("-c")
        .arg(&exec.0)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runnable_commands_need_words_and_balanced_quotes() {
        assert!(ShellCommand::new("firefox --new-window").is_runnable());
        assert!(ShellCommand::new("notify-send 'hello there'").is_runnable());
        assert!(!ShellCommand::new("").is_runnable());
        assert!(!ShellCommand::new("   ").is_runnable());
        assert!(!ShellCommand::new("echo 'unterminated").is_runnable());
    }

    #[test]
    fn unrunnable_command_is_rejected_before_spawning() {
        let err = spawn(&ShellCommand::new("")).unwrap_err();
        assert!(matches!(err, ActionError::NotRunnable(_)));
    }
}
