//! Process exit codes.

/// Exit codes for the dupescan binary.
///
/// Every completed run exits 0, including runs that find no duplicates
/// and runs where individual files could not be read or acted on (those
/// are logged, not fatal). Nonzero codes are reserved for runs that
/// could not complete: 1 for unexpected errors, 2 for usage errors
/// (clap's convention, emitted by the argument parser itself).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// The run completed, duplicates or not.
    Success = 0,
    /// The run aborted on an unexpected error.
    GeneralError = 1,
    /// Invalid command-line usage.
    Usage = 2,
}

impl ExitCode {
    /// Numeric exit code for `std::process::exit`.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::GeneralError.as_i32(), 1);
        assert_eq!(ExitCode::Usage.as_i32(), 2);
    }
}
