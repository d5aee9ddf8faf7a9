use std::io;
use std::process::Command;

use thiserror::Error;

/// Why the selected command could not replace this process.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("command not found: {command}")]
    NotFound { command: String },
    #[error("permission denied: {command}")]
    PermissionDenied { command: String },
    #[error("empty command")]
    EmptyCommand,
    #[error("cannot parse command {command:?}: {source}")]
    Parse {
        command: String,
        source: shell_words::ParseError,
    },
    #[error("error executing command {command:?}: {source}")]
    Other { command: String, source: io::Error },
}

impl LaunchError {
    pub fn exit_code(&self) -> u8 {
        match self {
            LaunchError::NotFound { .. } => 127,
            LaunchError::PermissionDenied { .. } => 126,
            LaunchError::EmptyCommand | LaunchError::Parse { .. } | LaunchError::Other { .. } => 1,
        }
    }

    fn from_io(command: &str, err: io::Error) -> Self {
        let command = command.to_string();
        match err.kind() {
            io::ErrorKind::NotFound => LaunchError::NotFound { command },
            io::ErrorKind::PermissionDenied => LaunchError::PermissionDenied { command },
            _ => LaunchError::Other {
                command,
                source: err,
            },
        }
    }
}

/// Split a command line with shell word rules into a ready-to-run process.
pub fn prepare(command: &str) -> Result<Command, LaunchError> {
    let words = shell_words::split(command).map_err(|source| LaunchError::Parse {
        command: command.to_string(),
        source,
    })?;
    let (program, args) = words.split_first().ok_or(LaunchError::EmptyCommand)?;
    let mut process = Command::new(program);
    process.args(args);
    Ok(process)
}

/// Replace the current process image with `command`. Only returns on failure.
#[cfg(unix)]
pub fn replace_process(command: &str) -> LaunchError {
    use std::os::unix::process::CommandExt;

    let mut process = match prepare(command) {
        Ok(process) => process,
        Err(err) => return err,
    };
    log::info!("exec {command:?}");
    let err = process.exec();
    LaunchError::from_io(command, err)
}

/// Without `exec`, run the command to completion and mirror its exit status.
#[cfg(not(unix))]
pub fn replace_process(command: &str) -> LaunchError {
    let mut process = match prepare(command) {
        Ok(process) => process,
        Err(err) => return err,
    };
    match process.status() {
        Ok(status) => std::process::exit(status.code().unwrap_or(1)),
        Err(err) => LaunchError::from_io(command, err),
    }
}
