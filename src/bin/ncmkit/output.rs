use std::fmt::Display;

/// How much the CLI prints besides errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    Normal,
    /// Adds `DIAG:` lines and stage-level tracing.
    Verbose,
}

/// Console printer: results go to stdout, everything else to stderr.
pub struct Output {
    verbosity: Verbosity,
}

impl Output {
    pub const fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    pub fn quiet(&self) -> bool {
        self.verbosity == Verbosity::Quiet
    }

    /// Result line on stdout, suppressed by `--quiet`.
    pub fn info_user(&self, msg: impl Display) {
        if !self.quiet() {
            println!("{msg}");
        }
    }

    pub fn warn_user(&self, msg: impl Display) {
        if !self.quiet() {
            eprintln!("WARN: {msg}");
        }
    }

    /// Errors are printed at every verbosity.
    pub fn error_user(msg: impl Display) {
        eprintln!("ERROR: {msg}");
    }

    /// Diagnostic line, only with `--verbose`.
    pub fn info_diag(&self, msg: impl Display) {
        if self.verbosity == Verbosity::Verbose {
            eprintln!("DIAG: {msg}");
        }
    }
}
