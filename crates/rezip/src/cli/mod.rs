use std::fmt;

pub mod app;
pub mod args;

pub use app::App;
pub use args::Config;

/// Stage of a run that failed, used as the prefix of the error line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Arguments,
    Repackaging,
    Validation,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Arguments => "Arguments",
            Phase::Repackaging => "Repackaging",
            Phase::Validation => "Validation",
        };
        f.write_str(name)
    }
}

#[derive(Debug)]
pub struct PhaseError {
    pub phase: Phase,
    pub error: anyhow::Error,
}

impl fmt::Display for PhaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Error: {:#}", self.phase, self.error)
    }
}

pub trait InPhase<T> {
    fn phase(self, phase: Phase) -> Result<T, PhaseError>;
}

impl<T, E: Into<anyhow::Error>> InPhase<T> for Result<T, E> {
    fn phase(self, phase: Phase) -> Result<T, PhaseError> {
        self.map_err(|e| PhaseError {
            phase,
            error: e.into(),
        })
    }
}
