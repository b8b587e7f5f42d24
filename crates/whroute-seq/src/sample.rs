use rand::Rng;
use rand::seq::SliceRandom;

/// Shuffle `items` in place with `rng` and return them.
pub fn random_sample<T>(mut items: Vec<T>, rng: &mut impl Rng) -> Vec<T> {
    items.shuffle(rng);
    items
}
