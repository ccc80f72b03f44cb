use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): Command completed, possibly with warnings
/// - `Failure` (1): Invalid input, nothing written: a missing project
///   directory, translate source or prune file, or an existing config on `init`
/// - `Error` (2): Command failed (output not writable, bad config, etc.)
///
/// Unreadable files, malformed literals and collaborator failures are
/// warnings; they never move a run away from `Success`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Command completed, possibly with warnings.
    Success,
    /// Command refused its input.
    Failure,
    /// Command failed with a fatal error.
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_code_values() {
        assert_eq!(ExitCode::from(ExitStatus::Success), ExitCode::from(0));
        assert_eq!(ExitCode::from(ExitStatus::Failure), ExitCode::from(1));
        assert_eq!(ExitCode::from(ExitStatus::Error), ExitCode::from(2));
    }
}
