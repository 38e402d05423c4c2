use std::{error::Error, fmt, io};

/// Why a Cartesian state could not be turned into orbital elements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Degeneracy {
    ZeroRadius,
    ZeroAngularMomentum,
    NearParabolic,
    NonFinite,
}

impl fmt::Display for Degeneracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Degeneracy::ZeroRadius => write!(f, "zero radius"),
            Degeneracy::ZeroAngularMomentum => write!(f, "zero angular momentum"),
            Degeneracy::NearParabolic => write!(f, "near-parabolic energy"),
            Degeneracy::NonFinite => write!(f, "non-finite state"),
        }
    }
}

#[derive(Debug)]
pub enum SimErrors {
    EpochOutOfBounds {
        target: f64,
        earliest: f64,
        latest: f64,
    },
    HistoryLengthMismatch {
        epochs: usize,
        cartesian: usize,
        elements: usize,
    },
    DegenerateOrbit(Degeneracy),
    UnsynchronizedHistories {
        spacecraft: String,
        neighbor: String,
    },
    InvalidWalkerPattern {
        total: usize,
        planes: usize,
    },
    InvalidStepSize(f64),
    InvalidDuration(f64),
    UnknownBody(String),
    UnknownSpacecraft(String),
    InvalidEpoch(String),
    IoError(io::Error),
    CsvError(csv::Error),
    ConfigError(serde_yaml::Error),
}

impl fmt::Display for SimErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimErrors::EpochOutOfBounds {
                target,
                earliest,
                latest,
            } => write!(
                f,
                "Epoch {} is outside the propagated span [{}, {}]",
                target, earliest, latest
            ),
            SimErrors::HistoryLengthMismatch {
                epochs,
                cartesian,
                elements,
            } => write!(
                f,
                "State history is inconsistent: {} epochs, {} cartesian states, {} element sets",
                epochs, cartesian, elements
            ),
            SimErrors::DegenerateOrbit(d) => write!(f, "Degenerate orbit: {}", d),
            SimErrors::UnsynchronizedHistories {
                spacecraft,
                neighbor,
            } => write!(
                f,
                "History of {} is not synchronized with neighbor {}",
                spacecraft, neighbor
            ),
            SimErrors::InvalidWalkerPattern { total, planes } => write!(
                f,
                "Walker pattern needs the satellite count ({}) to be a multiple of the plane count ({})",
                total, planes
            ),
            SimErrors::InvalidStepSize(dt) => write!(f, "Invalid step size {} s", dt),
            SimErrors::InvalidDuration(d) => write!(f, "Invalid propagation duration {} s", d),
            SimErrors::UnknownBody(name) => write!(f, "Unknown central body '{}'", name),
            SimErrors::UnknownSpacecraft(name) => write!(f, "Unknown spacecraft '{}'", name),
            SimErrors::InvalidEpoch(e) => write!(f, "Invalid epoch {}", e),
            SimErrors::IoError(e) => write!(f, "I/O error: {}", e),
            SimErrors::CsvError(e) => write!(f, "CSV error: {}", e),
            SimErrors::ConfigError(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

impl Error for SimErrors {}

impl From<io::Error> for SimErrors {
    fn from(err: io::Error) -> Self {
        SimErrors::IoError(err)
    }
}

impl From<csv::Error> for SimErrors {
    fn from(err: csv::Error) -> Self {
        SimErrors::CsvError(err)
    }
}

impl From<serde_yaml::Error> for SimErrors {
    fn from(err: serde_yaml::Error) -> Self {
        SimErrors::ConfigError(err)
    }
}
