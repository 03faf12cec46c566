// ABOUTME: Population-based search choosing breakfast, lunch, and dinner candidate indices
// ABOUTME: Tournament selection, single-point crossover, and point mutation over index triples
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Companion Contributors

//! # Evolutionary Selector
//!
//! Each individual is a triple of indices into the candidate list. The score
//! only looks at index distinctness and the caller's goal, never at which
//! meals were picked, so the search settles on an arbitrary triple of distinct
//! indices. The process is kept as-is; callers inject the RNG so runs are
//! reproducible under a seeded generator.

use companion_core::constants::meal_search::{
    BASE_FITNESS, GENERATIONS, MAINTENANCE_GOAL_BONUS, MEALS_PER_PLAN, MUTATION_RATE,
    POPULATION_SIZE, TARGETED_GOAL_BONUS, TOURNAMENT_SIZE, VARIETY_BONUS,
};
use companion_core::models::MealTag;
use rand::seq::index::sample;
use rand::Rng;

/// Breakfast, lunch, and dinner indices into the candidate list
pub type MealIndices = [usize; MEALS_PER_PLAN];

/// Tunables of the search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchParameters {
    /// Individuals per generation
    pub population_size: usize,
    /// Generations to evolve
    pub generations: usize,
    /// Per-offspring mutation probability in `[0, 1]`
    pub mutation_rate: f64,
    /// Members drawn per tournament
    pub tournament_size: usize,
}

impl Default for SearchParameters {
    fn default() -> Self {
        Self {
            population_size: POPULATION_SIZE,
            generations: GENERATIONS,
            mutation_rate: MUTATION_RATE,
            tournament_size: TOURNAMENT_SIZE,
        }
    }
}

/// Score an individual for `fitness_goal`
#[must_use]
pub fn fitness(individual: &MealIndices, fitness_goal: &str) -> f64 {
    let [a, b, c] = *individual;
    let variety = if a != b && b != c && a != c {
        VARIETY_BONUS
    } else {
        0.0
    };
    let goal_bonus = match MealTag::parse(fitness_goal) {
        Some(MealTag::WeightLoss | MealTag::WeightGain) => TARGETED_GOAL_BONUS,
        _ => MAINTENANCE_GOAL_BONUS,
    };
    BASE_FITNESS + variety + goal_bonus
}

/// Stateless evolutionary search over index triples
#[derive(Debug, Clone, Copy, Default)]
pub struct EvolutionarySelector {
    params: SearchParameters,
}

impl EvolutionarySelector {
    /// Create a selector; the mutation rate is clamped into `[0, 1]`
    #[must_use]
    pub fn new(mut params: SearchParameters) -> Self {
        params.mutation_rate = if params.mutation_rate.is_nan() {
            0.0
        } else {
            params.mutation_rate.clamp(0.0, 1.0)
        };
        Self { params }
    }

    /// Parameters in effect
    #[must_use]
    pub const fn params(&self) -> &SearchParameters {
        &self.params
    }

    /// Pick breakfast, lunch, and dinner indices into `candidates`
    ///
    /// Returns `[0, 0, 0]` when `candidates` is empty. With one or two
    /// candidates every individual starts at `[0, 0, 0]` and only mutation can
    /// move it, so repeated indices are expected.
    pub fn select<T, R>(&self, candidates: &[T], fitness_goal: &str, rng: &mut R) -> MealIndices
    where
        R: Rng + ?Sized,
    {
        let candidate_count = candidates.len();
        let mut population: Vec<MealIndices> = (0..self.params.population_size)
            .map(|_| initial_individual(candidate_count, rng))
            .collect();

        for _ in 0..self.params.generations {
            let scores: Vec<f64> = population
                .iter()
                .map(|individual| fitness(individual, fitness_goal))
                .collect();

            population = (0..self.params.population_size)
                .map(|_| {
                    let first = self.tournament(&population, &scores, rng);
                    let second = self.tournament(&population, &scores, rng);
                    let mut child = crossover(&first, &second, rng);
                    self.mutate(&mut child, candidate_count, rng);
                    child
                })
                .collect();
        }

        let best = best_individual(&population, fitness_goal);
        tracing::trace!(
            candidates = candidate_count,
            ?best,
            "Meal search finished"
        );
        best
    }

    fn tournament<R>(&self, population: &[MealIndices], scores: &[f64], rng: &mut R) -> MealIndices
    where
        R: Rng + ?Sized,
    {
        let entrants = self.params.tournament_size.clamp(1, population.len());
        let mut winner: Option<usize> = None;
        for member in sample(rng, population.len(), entrants) {
            if winner.is_none_or(|current| scores[member] > scores[current]) {
                winner = Some(member);
            }
        }
        winner.map_or([0; MEALS_PER_PLAN], |index| population[index])
    }

    fn mutate<R>(&self, child: &mut MealIndices, candidate_count: usize, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        if !rng.gen_bool(self.params.mutation_rate) {
            return;
        }
        let position = rng.gen_range(0..MEALS_PER_PLAN);
        if candidate_count > 0 {
            child[position] = rng.gen_range(0..candidate_count);
        }
    }
}

fn initial_individual<R>(candidate_count: usize, rng: &mut R) -> MealIndices
where
    R: Rng + ?Sized,
{
    if candidate_count < MEALS_PER_PLAN {
        return [0; MEALS_PER_PLAN];
    }
    let picks = sample(rng, candidate_count, MEALS_PER_PLAN);
    [picks.index(0), picks.index(1), picks.index(2)]
}

fn crossover<R>(first: &MealIndices, second: &MealIndices, rng: &mut R) -> MealIndices
where
    R: Rng + ?Sized,
{
    let cut = rng.gen_range(1..MEALS_PER_PLAN);
    let mut child = *second;
    child[..cut].copy_from_slice(&first[..cut]);
    child
}

/// First individual with the strictly highest score
fn best_individual(population: &[MealIndices], fitness_goal: &str) -> MealIndices {
    let mut best: Option<(MealIndices, f64)> = None;
    for individual in population {
        let score = fitness(individual, fitness_goal);
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((*individual, score));
        }
    }
    best.map_or([0; MEALS_PER_PLAN], |(individual, _)| individual)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_fitness_rewards_distinct_indices() {
        assert!((fitness(&[0, 1, 2], "weight_loss") - 135.0).abs() < f64::EPSILON);
        assert!((fitness(&[0, 0, 2], "weight_gain") - 115.0).abs() < f64::EPSILON);
        assert!((fitness(&[3, 1, 2], "stay_fit") - 130.0).abs() < f64::EPSILON);
        assert!((fitness(&[1, 1, 1], "unknown") - 110.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_candidates_select_zero_triple() {
        let mut rng = StdRng::seed_from_u64(7);
        let candidates: [u8; 0] = [];
        let picked = EvolutionarySelector::default().select(&candidates, "weight_loss", &mut rng);
        assert_eq!(picked, [0, 0, 0]);
    }

    #[test]
    fn test_single_candidate_always_index_zero() {
        let mut rng = StdRng::seed_from_u64(11);
        let picked = EvolutionarySelector::default().select(&["X"], "weight_loss", &mut rng);
        assert_eq!(picked, [0, 0, 0]);
    }

    #[test]
    fn test_indices_stay_in_range_and_converge_to_distinct() {
        let candidates: Vec<u32> = (0..8).collect();
        let selector = EvolutionarySelector::default();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let [a, b, c] = selector.select(&candidates, "stay_fit", &mut rng);
            assert!(a < 8 && b < 8 && c < 8);
            assert!(a != b && b != c && a != c, "seed {seed} gave {a},{b},{c}");
        }
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let candidates = ["a", "b", "c", "d", "e"];
        let selector = EvolutionarySelector::default();
        let first = selector.select(&candidates, "weight_gain", &mut StdRng::seed_from_u64(42));
        let second = selector.select(&candidates, "weight_gain", &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn test_two_candidates_reach_only_valid_indices() {
        let selector = EvolutionarySelector::new(SearchParameters {
            mutation_rate: 1.0,
            ..SearchParameters::default()
        });
        let mut rng = StdRng::seed_from_u64(5);
        let picked = selector.select(&["a", "b"], "weight_loss", &mut rng);
        assert!(picked.iter().all(|&index| index < 2));
    }

    #[test]
    fn test_mutation_rate_is_clamped() {
        let selector = EvolutionarySelector::new(SearchParameters {
            mutation_rate: 3.5,
            ..SearchParameters::default()
        });
        assert!((selector.params().mutation_rate - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_population_returns_zero_triple() {
        let selector = EvolutionarySelector::new(SearchParameters {
            population_size: 0,
            ..SearchParameters::default()
        });
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(selector.select(&[1, 2, 3, 4], "stay_fit", &mut rng), [0, 0, 0]);
    }

    #[test]
    fn test_crossover_takes_prefix_from_first_parent() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let child = crossover(&[1, 2, 3], &[7, 8, 9], &mut rng);
            assert!(child == [1, 8, 9] || child == [1, 2, 9]);
        }
    }
}
