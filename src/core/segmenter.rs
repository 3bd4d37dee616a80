// Splits the chronological history into sessions
//
// There are no timestamps in the log, so we guess. A session ends when you type something
// like "exit" or "tmux", or when a long run of commands hits something that looks like
// the start of a fresh shell ("cd", "ls").

use crate::models::{CommandRecord, Session};

/// Commands that end a session. Prefix match on the whole command text, so "tmuxinator" counts too.
pub const SESSION_TERMINATORS: &[&str] = &["exit", "tmux", "logout", "shutdown", "reboot"];

/// Sessions longer than this restart on a fresh-shell looking command
pub const RESTART_THRESHOLD: usize = 50;

pub struct SessionSegmenter;

impl SessionSegmenter {
    /// Partition records into sessions in one forward pass
    ///
    /// The record that triggers a boundary always belongs to the session it closes.
    /// Concatenating the returned sessions gives back `records` exactly.
    pub fn segment(records: &[CommandRecord]) -> Vec<Session<'_>> {
        let mut sessions = Vec::new();
        let mut start = 0;

        for (index, record) in records.iter().enumerate() {
            // current record is already part of the open session
            let current_len = index - start + 1;

            let is_session_end = Self::is_session_end(&record.command);
            let is_restart = Self::is_heuristic_restart(&record.command, current_len);
            let is_last = index + 1 == records.len();

            if is_session_end || is_restart || is_last {
                sessions.push(Session {
                    id: sessions.len() + 1,
                    start,
                    commands: &records[start..=index],
                    ended_with: is_session_end.then_some(record.command.as_str()),
                });
                start = index + 1;
            }
        }

        tracing::info!("Detected {} sessions", sessions.len());
        sessions
    }

    fn is_session_end(command: &str) -> bool {
        SESSION_TERMINATORS
            .iter()
            .any(|terminator| command.starts_with(terminator))
    }

    fn is_heuristic_restart(command: &str, current_len: usize) -> bool {
        current_len > RESTART_THRESHOLD
            && (command == "cd" || command == "cd ~" || command == "ls" || command.starts_with("tmux"))
    }
}
