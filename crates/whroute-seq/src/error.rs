use std::fmt;

/// Invalid optimizer setup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeqError {
    /// A genetic algorithm needs at least one individual.
    EmptyPopulation,
    /// Probabilities and fractions must lie in `[0, 1]`.
    InvalidProbability { name: &'static str, value: f32 },
}

impl fmt::Display for SeqError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPopulation => write!(f, "population is empty"),
            Self::InvalidProbability { name, value } => {
                write!(f, "{name} must be within [0, 1], got {value}")
            }
        }
    }
}

impl std::error::Error for SeqError {}
