//! Genetic algorithm over permutations.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::{Rng, RngExt};

use crate::error::SeqError;
use crate::sample::random_sample;

/// One candidate ordering.
pub type Chromosome = Vec<usize>;

type Fitness<'a> = Box<dyn Fn(&[usize]) -> f32 + 'a>;
type CrossoverFn<'a, R> = Box<dyn Fn(&[usize], &[usize], &mut R) -> Chromosome + 'a>;
type MutateFn<'a, R> = Box<dyn Fn(Chromosome, f32, &mut R) -> Chromosome + 'a>;

/// Stall limit used when neither limit is set, so a run always ends.
const FALLBACK_STALL_LIMIT: usize = 10;

/// Tuning knobs for [`Ga`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Chance that a child is mutated.
    pub mutation_prob: f32,
    /// Fraction of the population carried over unchanged each generation.
    pub elite_frac: f32,
    /// Stop after this many generations.
    pub max_generations: Option<usize>,
    /// Stop after this many consecutive generations without a change in
    /// the best fitness.
    pub stall_limit: Option<usize>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            mutation_prob: 0.2,
            elite_frac: 0.1,
            max_generations: None,
            stall_limit: Some(FALLBACK_STALL_LIMIT),
        }
    }
}

impl GaConfig {
    /// Set the chance that a child is mutated.
    pub fn with_mutation_prob(mut self, p: f32) -> Self {
        self.mutation_prob = p;
        self
    }

    /// Set the fraction of the population kept unchanged.
    pub fn with_elite_frac(mut self, f: f32) -> Self {
        self.elite_frac = f;
        self
    }

    /// Set or clear the generation limit.
    pub fn with_max_generations(mut self, n: Option<usize>) -> Self {
        self.max_generations = n;
        self
    }

    /// Set or clear the stall limit.
    pub fn with_stall_limit(mut self, n: Option<usize>) -> Self {
        self.stall_limit = n;
        self
    }

    /// Check the probabilities and make sure at least one limit is set.
    fn validated(mut self) -> Result<Self, SeqError> {
        unit_interval("mutation probability", self.mutation_prob)?;
        unit_interval("elite fraction", self.elite_frac)?;
        if self.max_generations.is_none() && self.stall_limit.is_none() {
            self.stall_limit = Some(FALLBACK_STALL_LIMIT);
        }
        Ok(self)
    }
}

fn unit_interval(name: &'static str, value: f32) -> Result<(), SeqError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(SeqError::InvalidProbability { name, value });
    }
    Ok(())
}

/// Genetic algorithm evolving a fixed-size population of orderings.
///
/// Each generation ranks the population by fitness, keeps the elite, fills
/// the rest of the breeding pool by roulette-wheel selection, shuffles the
/// pool and pairs it from both ends for crossover and mutation. Fitness is
/// maximised; negative values get no share of the wheel.
pub struct Ga<'a, R: Rng> {
    rng: R,
    population: Vec<Chromosome>,
    config: GaConfig,
    fitness: Fitness<'a>,
    crossover: CrossoverFn<'a, R>,
    mutate: MutateFn<'a, R>,
}

impl<'a, R: Rng + 'a> Ga<'a, R> {
    /// Create a GA with the default [`GaConfig`] and operators.
    pub fn new(
        population: Vec<Chromosome>,
        fitness: impl Fn(&[usize]) -> f32 + 'a,
        rng: R,
    ) -> Result<Self, SeqError> {
        if population.is_empty() {
            return Err(SeqError::EmptyPopulation);
        }
        Ok(Self {
            rng,
            population,
            config: GaConfig::default(),
            fitness: Box::new(fitness),
            crossover: Box::new(ordered_crossover::<R>),
            mutate: Box::new(swap_mutation::<R>),
        })
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: GaConfig) -> Result<Self, SeqError> {
        self.config = config.validated()?;
        Ok(self)
    }

    /// Replace the crossover operator.
    pub fn with_crossover(
        mut self,
        f: impl Fn(&[usize], &[usize], &mut R) -> Chromosome + 'a,
    ) -> Self {
        self.crossover = Box::new(f);
        self
    }

    /// Replace the mutation operator. It receives the mutation probability.
    pub fn with_mutation(mut self, f: impl Fn(Chromosome, f32, &mut R) -> Chromosome + 'a) -> Self {
        self.mutate = Box::new(f);
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// The current generation.
    pub fn population(&self) -> &[Chromosome] {
        &self.population
    }

    /// The random source driving selection and the operators.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Evolve until a limit is hit. Returns the number of generations bred.
    pub fn run(&mut self) -> usize {
        let mut generation = 0usize;
        let mut stall = 0usize;
        let mut best = self.best().1;
        loop {
            if self.config.max_generations.is_some_and(|max| generation >= max) {
                break;
            }
            self.population = self.breed();
            generation += 1;

            let next_best = self.best().1;
            log::trace!("ga: generation {generation} best {next_best}");
            if next_best == best {
                stall += 1;
                if self.config.stall_limit.is_some_and(|limit| stall >= limit) {
                    break;
                }
            } else {
                stall = 0;
                best = next_best;
            }
        }
        log::debug!("ga: stopped after {generation} generations, best {best}");
        generation
    }

    /// The fittest individual and its fitness; the earliest wins on ties.
    pub fn best(&self) -> (&[usize], f32) {
        let mut best = (self.population[0].as_slice(), (self.fitness)(&self.population[0]));
        for c in &self.population[1..] {
            let fit = (self.fitness)(c);
            if fit > best.1 {
                best = (c.as_slice(), fit);
            }
        }
        best
    }

    fn elite_size(&self) -> usize {
        (self.population.len() as f32 * self.config.elite_frac) as usize
    }

    /// Population indices with their fitness, fittest first. Stable, so
    /// equal fitness keeps population order.
    fn ranked(&self) -> Vec<(usize, f32)> {
        let mut ranked: Vec<(usize, f32)> = self
            .population
            .iter()
            .enumerate()
            .map(|(i, c)| (i, (self.fitness)(c)))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }

    /// Breeding pool: the elite in rank order, then roulette picks.
    fn selection(&mut self) -> Vec<Chromosome> {
        let ranked = self.ranked();
        let elite = self.elite_size();
        let total: f32 = ranked.iter().map(|&(_, f)| f.max(0.0)).sum();

        let mut pool: Vec<Chromosome> = ranked[..elite]
            .iter()
            .map(|&(i, _)| self.population[i].clone())
            .collect();

        for _ in elite..ranked.len() {
            let pick = if total > 0.0 {
                let target = self.rng.random::<f32>() * total;
                let mut cum = 0.0;
                ranked
                    .iter()
                    .find(|&&(_, f)| {
                        cum += f.max(0.0);
                        target <= cum
                    })
                    .or(ranked.last())
                    .map(|&(i, _)| i)
            } else {
                // Nobody has positive fitness; fall back to a uniform pick.
                Some(ranked[self.rng.random_range(0..ranked.len())].0)
            };
            if let Some(i) = pick {
                pool.push(self.population[i].clone());
            }
        }
        pool
    }

    fn breed(&mut self) -> Vec<Chromosome> {
        let mut pool = self.selection();
        let elite = self.elite_size();

        let mut children: Vec<Chromosome> = pool[..elite].to_vec();

        pool.shuffle(&mut self.rng);
        let n = pool.len();
        for i in 0..n - elite {
            let child = (self.crossover)(&pool[i], &pool[n - 1 - i], &mut self.rng);
            let child = (self.mutate)(child, self.config.mutation_prob, &mut self.rng);
            children.push(child);
        }
        children
    }
}

/// Build `size` random orderings of `0..genes`.
pub fn make_population(size: usize, genes: usize, rng: &mut impl Rng) -> Vec<Chromosome> {
    (0..size)
        .map(|_| random_sample((0..genes).collect(), &mut *rng))
        .collect()
}

/// Copy a random-length prefix of `a` (shorter than `a`), then append the
/// genes of `b` not already present, in `b`'s order.
///
/// Two permutations of the same set always yield another permutation.
pub fn ordered_crossover<R: Rng>(a: &[usize], b: &[usize], rng: &mut R) -> Chromosome {
    if a.len() < 2 {
        return a.to_vec();
    }
    let cut = rng.random_range(0..a.len() - 1);
    let mut child: Chromosome = a[..cut].to_vec();
    let mut seen: HashSet<usize> = child.iter().copied().collect();
    for &g in b {
        if seen.insert(g) {
            child.push(g);
        }
    }
    child
}

/// With probability `prob`, swap two randomly chosen genes.
pub fn swap_mutation<R: Rng>(mut c: Chromosome, prob: f32, rng: &mut R) -> Chromosome {
    if c.len() < 2 || rng.random::<f32>() >= prob {
        return c;
    }
    let i = rng.random_range(0..c.len());
    let j = rng.random_range(0..c.len());
    c.swap(i, j);
    c
}
