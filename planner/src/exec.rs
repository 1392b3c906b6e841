use std::process::Command;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ExternalProcessError {
    #[error("Cannot run an empty command")]
    EmptyCommand,
    #[error("Failed to spawn command '{command}'")]
    Spawn {
        command: String,
        source: std::io::Error,
    },
    #[error("Command '{command}' failed with return code {code} and stderr:\n{stderr}")]
    Failed {
        command: String,
        code: i32,
        stderr: String,
    },
}

/// run one planned command to completion with captured output
///
/// A non zero exit is turned into a single descriptive error carrying the
/// full command line and the captured stderr. Retries and timeouts are the
/// scheduler's business, not ours.
pub fn run_command(command: &[String]) -> Result<String, ExternalProcessError> {
    let (program, args) = command
        .split_first()
        .ok_or(ExternalProcessError::EmptyCommand)?;
    let rendered = command.join(" ");

    debug!("Running '{rendered}'");

    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|source| ExternalProcessError::Spawn {
            command: rendered.clone(),
            source,
        })?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    } else {
        Err(ExternalProcessError::Failed {
            command: rendered,
            code: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
