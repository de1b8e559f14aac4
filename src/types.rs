/// Exit code used when [`ErrorHandling::Exit`] terminates the process on an error.
pub const EXIT_CODE: i32 = 2;

/// What to do with an error once resolution or the final flag parse has failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorHandling {
    /// Return the error to the caller. A help request counts as success.
    Continue,
    /// Print the error to the output stream and exit with [`EXIT_CODE`].
    /// A help request exits with status 0 after the usage text.
    #[default]
    Exit,
    /// Panic with the error. A help request panics too, after the usage text.
    Panic,
}
