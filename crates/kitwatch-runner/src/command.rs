//! Command line parsing.

use crate::error::RunnerError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A program plus arguments, invoked verbatim on every trigger.
///
/// The configuration surface is a single string. It is split with POSIX
/// shell-word rules, so `python3 "my script.py"` yields two words. No shell
/// runs the command: globs, variables, pipes and redirections are passed
/// through literally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunCommand {
    program: String,
    args: Vec<String>,
}

impl RunCommand {
    /// Build a command from an explicit program and arguments.
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a single command line string.
    pub fn parse(line: &str) -> Result<Self, RunnerError> {
        let words = shell_words::split(line).map_err(|e| RunnerError::InvalidCommand {
            line: line.to_string(),
            message: e.to_string(),
        })?;

        let mut words = words.into_iter();
        match words.next() {
            Some(program) if !program.is_empty() => Ok(Self {
                program,
                args: words.collect(),
            }),
            _ => Err(RunnerError::EmptyCommand),
        }
    }

    /// Program name or path.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments after the program.
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl std::str::FromStr for RunCommand {
    type Err = RunnerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RunCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let words = std::iter::once(self.program.as_str()).chain(self.args.iter().map(String::as_str));
        write!(f, "{}", shell_words::join(words))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_words() {
        let cmd = RunCommand::parse("node assets/code/sample.mjs --fast").unwrap();
        assert_eq!(cmd.program(), "node");
        assert_eq!(cmd.args(), ["assets/code/sample.mjs", "--fast"]);
    }

    #[test]
    fn test_parse_collapses_repeated_spaces() {
        let cmd = RunCommand::parse("  echo   hello  ").unwrap();
        assert_eq!(cmd, RunCommand::new("echo", ["hello"]));
    }

    #[test]
    fn test_parse_quoted_argument_keeps_spaces() {
        let cmd = RunCommand::parse(r#"python3 "my script.py" 'a b'"#).unwrap();
        assert_eq!(cmd.args(), ["my script.py", "a b"]);
    }

    #[test]
    fn test_parse_rejects_empty_and_unbalanced() {
        assert!(matches!(RunCommand::parse("   "), Err(RunnerError::EmptyCommand)));
        assert!(matches!(RunCommand::parse("\"\""), Err(RunnerError::EmptyCommand)));
        assert!(matches!(
            RunCommand::parse("echo \"oops"),
            Err(RunnerError::InvalidCommand { .. })
        ));
    }

    #[test]
    fn test_display_requotes() {
        let cmd = RunCommand::new("python3", ["my script.py"]);
        assert_eq!(cmd.to_string(), "python3 'my script.py'");
        assert_eq!(RunCommand::parse(&cmd.to_string()).unwrap(), cmd);
    }
}
