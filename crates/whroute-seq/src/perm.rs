//! Exhaustive permutation search.

/// Lexicographic iterator over every permutation of `0..n`.
///
/// Starts at the identity and yields `n!` vectors, one at a time. `n = 0`
/// yields a single empty permutation.
#[derive(Debug, Clone)]
pub struct Permutations {
    current: Vec<usize>,
    done: bool,
}

/// Every permutation of `0..n`, in lexicographic order.
pub fn permutations(n: usize) -> Permutations {
    Permutations {
        current: (0..n).collect(),
        done: false,
    }
}

impl Iterator for Permutations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.done {
            return None;
        }
        let out = self.current.clone();
        self.done = !next_permutation(&mut self.current);
        Some(out)
    }
}

/// Advance `v` to its lexicographic successor. Returns `false` (leaving `v`
/// unchanged) when `v` is already the last permutation.
fn next_permutation(v: &mut [usize]) -> bool {
    let Some(i) = v.windows(2).rposition(|w| w[0] < w[1]) else {
        return false;
    };
    // v[i + 1..] is non-increasing; find the rightmost element above v[i].
    let Some(j) = v.iter().rposition(|&x| x > v[i]) else {
        return false;
    };
    v.swap(i, j);
    v[i + 1..].reverse();
    true
}

/// Finds the fittest ordering of `0..size` by scoring every permutation.
///
/// Cost grows as `size!`; meant for the handful of stops where exhaustive
/// search is cheaper than tuning a [`Ga`](crate::Ga).
pub struct PermSearch<F> {
    size: usize,
    fitness: F,
}

impl<F: Fn(&[usize]) -> f32> PermSearch<F> {
    /// Search orderings of `0..size`, higher `fitness` being better.
    pub fn new(size: usize, fitness: F) -> Self {
        Self { size, fitness }
    }

    /// Return the best permutation and its fitness. On ties the earliest
    /// permutation in lexicographic order wins.
    pub fn run(&self) -> (Vec<usize>, f32) {
        let mut perms = permutations(self.size);
        // There is always at least one permutation, the identity.
        let mut best = perms.next().unwrap_or_default();
        let mut best_fit = (self.fitness)(&best);
        let mut scored = 1usize;
        for p in perms {
            let fit = (self.fitness)(&p);
            scored += 1;
            if fit > best_fit {
                best = p;
                best_fit = fit;
            }
        }
        log::debug!("perm search: scored {scored} orderings of {}, best {best_fit}", self.size);
        (best, best_fit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn lexicographic_order() {
        let all: Vec<_> = permutations(3).collect();
        assert_eq!(
            all,
            vec![
                vec![0, 1, 2],
                vec![0, 2, 1],
                vec![1, 0, 2],
                vec![1, 2, 0],
                vec![2, 0, 1],
                vec![2, 1, 0],
            ]
        );
    }

    #[test]
    fn counts_and_uniqueness() {
        let all: Vec<_> = permutations(5).collect();
        assert_eq!(all.len(), 120);
        let unique: HashSet<_> = all.iter().cloned().collect();
        assert_eq!(unique.len(), 120);
    }

    #[test]
    fn degenerate_sizes() {
        assert_eq!(permutations(0).collect::<Vec<_>>(), vec![Vec::<usize>::new()]);
        assert_eq!(permutations(1).collect::<Vec<_>>(), vec![vec![0]]);
    }

    #[test]
    fn finds_best_ordering() {
        // Reward orderings close to descending.
        let search = PermSearch::new(4, |p: &[usize]| {
            p.iter().enumerate().map(|(i, &g)| (i as f32) * (3 - g as i32) as f32).sum()
        });
        let (best, fit) = search.run();
        assert_eq!(best, vec![3, 2, 1, 0]);
        assert_eq!(fit, 14.0);
    }

    #[test]
    fn ties_keep_first() {
        let (best, fit) = PermSearch::new(3, |_: &[usize]| 1.0).run();
        assert_eq!(best, vec![0, 1, 2]);
        assert_eq!(fit, 1.0);
    }

    #[test]
    fn empty_search() {
        let (best, fit) = PermSearch::new(0, |p: &[usize]| p.len() as f32).run();
        assert!(best.is_empty());
        assert_eq!(fit, 0.0);
    }
}
