//! Text front end for the preview session
//!
//! Each input line is one command. A key command is held for one frame and
//! released on the next, so the session sees exactly one key-press edge.

use std::io::BufRead;
use std::str::FromStr;

use material_preview::input::{KeySet, PreviewKey};
use material_preview::render::DrawCommand;
use thiserror::Error;

/// One line of driver input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Press and release a preview key
    Key(PreviewKey),
    /// Leave the frame loop
    Quit,
}

impl Command {
    /// Held-key snapshots for the frames this command spans
    pub fn frames(self) -> [KeySet; 2] {
        match self {
            Self::Key(key) => [KeySet::key(key), KeySet::empty()],
            Self::Quit => [KeySet::empty(); 2],
        }
    }
}

/// Command parsing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The line is not a known command
    #[error("Unknown command '{0}' (expected up, down, render, shape, menu, reload or quit)")]
    Unknown(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let word = s.trim();
        if word.eq_ignore_ascii_case("quit") || word.eq_ignore_ascii_case("exit") {
            return Ok(Self::Quit);
        }
        word.parse::<PreviewKey>()
            .map(Self::Key)
            .map_err(|_| CommandError::Unknown(word.to_string()))
    }
}

/// Iterator over commands read from `input`, skipping blank lines
///
/// Unparseable lines are logged and skipped; read errors end the stream.
pub fn commands<R: BufRead>(input: R) -> impl Iterator<Item = Command> {
    input
        .lines()
        .map_while(|line| match line {
            Ok(line) => Some(line),
            Err(e) => {
                log::error!("Failed to read input: {}", e);
                None
            }
        })
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| match line.parse::<Command>() {
            Ok(command) => Some(command),
            Err(e) => {
                log::warn!("{}", e);
                None
            }
        })
}

/// Log one frame's draw calls
pub fn log_frame(commands: &[DrawCommand]) {
    for command in commands {
        match command {
            DrawCommand::Clear(color) => log::trace!("clear {:?}", color),
            DrawCommand::Mesh { triangle_count, texture_size } => log::debug!(
                "mesh: {} triangles, texture {}x{}",
                triangle_count,
                texture_size.0,
                texture_size.1
            ),
            DrawCommand::Rect { position, size, .. } => {
                log::debug!("highlight at {:?} size {:?}", position, size);
            }
            DrawCommand::Text(label) => {
                for line in label.text.lines() {
                    log::debug!("text {:?}: {}", label.position, line);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_commands() {
        assert_eq!("up".parse::<Command>(), Ok(Command::Key(PreviewKey::SelectUp)));
        assert_eq!("F2".parse::<Command>(), Ok(Command::Key(PreviewKey::Reload)));
        assert_eq!("QUIT".parse::<Command>(), Ok(Command::Quit));
        assert!(matches!("jump".parse::<Command>(), Err(CommandError::Unknown(w)) if w == "jump"));
    }

    #[test]
    fn test_command_stream_skips_noise() {
        let input = Cursor::new("menu\n\n  down \nbogus\nrender\nquit\n");
        let parsed: Vec<Command> = commands(input).collect();
        assert_eq!(
            parsed,
            vec![
                Command::Key(PreviewKey::ToggleMenu),
                Command::Key(PreviewKey::SelectDown),
                Command::Key(PreviewKey::Confirm),
                Command::Quit,
            ]
        );
    }

    #[test]
    fn test_key_command_spans_press_and_release() {
        let [press, release] = Command::Key(PreviewKey::Confirm).frames();
        assert_eq!(press, KeySet::CONFIRM);
        assert!(release.is_empty());
    }
}
