//! Optimizers for the order in which a sequence of items is visited.
//!
//! Candidates are permutations of `0..n`, scored by a caller-supplied
//! fitness function where higher is better.
//!
//! - [`Ga`]: a genetic algorithm with elitism and roulette-wheel selection.
//! - [`PermSearch`]: exhaustive search over every permutation, for small `n`.
//!
//! Every random decision draws from an RNG the caller passes in, so a
//! seeded generator reproduces a run exactly.

mod error;
mod ga;
mod perm;
mod sample;

pub use error::SeqError;
pub use ga::{Chromosome, Ga, GaConfig, make_population, ordered_crossover, swap_mutation};
pub use perm::{PermSearch, Permutations, permutations};
pub use sample::random_sample;
