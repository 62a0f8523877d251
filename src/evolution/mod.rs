pub mod coverage;
pub mod fitness;
pub mod operators;
pub mod population;

use crate::calendar::DateCandidate;
use crate::config::GaConfig;
use crate::evolution::coverage::{CoverageReport, should_terminate};
use crate::evolution::operators::{
    MutationRate, crossover, mutate, mutation_rate, select_parents,
};
use crate::evolution::population::{Population, initialize_population};
use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// What one generation cycle produced, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationReport {
    /// Parents picked by the selector
    pub parents: usize,
    /// Children produced by crossover
    pub children: usize,
    /// Rate applied to this generation's children
    pub mutation: MutationRate,
    /// Size of the next population after truncation
    pub population_size: usize,
}

/// Final state of a run, handed to the export layer.
#[derive(Debug, Clone)]
pub struct EvolutionOutcome {
    /// The last generation, in population order
    pub population: Population,
    /// Value of the generation counter when the loop stopped
    pub generations: usize,
    /// Coverage of the final population
    pub coverage: CoverageReport,
}

/// Drives the generation loop: select, cross over, mutate, merge elites,
/// then check coverage.
///
/// The engine owns its random source. Seed it through `GaConfig::seed` (or
/// hand one in with [`EvolutionEngine::with_rng`]) to make a run repeatable.
pub struct EvolutionEngine<'a> {
    /// User-defined parameters for the run
    config: &'a GaConfig,
    /// Every random draw of the run comes from here
    rng: StdRng,
    /// Current generation, replaced after every cycle
    population: Population,
}

impl<'a> EvolutionEngine<'a> {
    /// Creates an engine seeded from `config.seed`, or from the OS when unset.
    pub fn new(config: &'a GaConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(config, rng)
    }

    pub fn with_rng(config: &'a GaConfig, rng: StdRng) -> Self {
        Self {
            config,
            rng,
            population: Vec::with_capacity(config.population_size),
        }
    }

    pub fn population(&self) -> &[DateCandidate] {
        &self.population
    }

    /// Replaces the current generation with a fresh seed generation.
    pub fn initialize_population(&mut self) {
        self.population = initialize_population(self.config.population_size, &mut self.rng);
    }

    /// Runs the search until coverage is reached or the generation budget
    /// runs out, and returns the last generation.
    pub fn evolve(&mut self) -> EvolutionOutcome {
        info!(
            "Initializing population of size {}...",
            self.config.population_size
        );
        self.initialize_population();

        let mut generation = 0;
        while !should_terminate(
            &self.population,
            generation,
            self.config.coverage_threshold,
            self.config.max_generations,
        ) {
            let report = self.step();
            generation += 1;
            info!(
                "Generation {}: Population Size = {}",
                generation, report.population_size
            );
        }

        info!("Evolution terminated at generation {}", generation);
        EvolutionOutcome {
            population: self.population.clone(),
            generations: generation,
            coverage: CoverageReport::of(&self.population),
        }
    }

    /// Runs one generation cycle over the current population.
    ///
    /// The top `elite_count` parents are carried over unchanged ahead of the
    /// mutated children. Elites and children are not deduplicated against
    /// each other, and the merged generation is cut to `population_size`.
    pub fn step(&mut self) -> GenerationReport {
        let parents = select_parents(&self.population, self.config.num_parents);
        let children = crossover(&parents, self.config.num_children);

        let mutation = mutation_rate(&children);
        debug!(
            "Mutation rate {:.3} (diversity {:.2}, diverse: {})",
            mutation.rate,
            mutation.diversity,
            mutation.is_diverse()
        );
        let mutated = mutate(&children, mutation.rate, &mut self.rng);

        let mut next_generation: Population = parents
            .iter()
            .take(self.config.elite_count)
            .copied()
            .chain(mutated)
            .collect();
        next_generation.truncate(self.config.population_size);

        let report = GenerationReport {
            parents: parents.len(),
            children: children.len(),
            mutation,
            population_size: next_generation.len(),
        };
        self.population = next_generation;
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::is_valid;
    use crate::evolution::population::BOUNDARY_SEEDS;

    // Helper to create a seeded config with the default sizes
    fn get_test_config() -> GaConfig {
        GaConfig {
            seed: Some(42),
            ..GaConfig::default()
        }
    }

    #[test]
    fn test_initialize_population() {
        let config = get_test_config();
        let mut engine = EvolutionEngine::new(&config);
        assert!(engine.population().is_empty());

        engine.initialize_population();
        assert_eq!(engine.population().len(), config.population_size);
        for seed in BOUNDARY_SEEDS {
            assert!(engine.population().contains(&seed));
        }
    }

    #[test]
    fn test_step_carries_elites_first() {
        let config = get_test_config();
        let mut engine = EvolutionEngine::new(&config);
        engine.initialize_population();

        let expected_elites = select_parents(engine.population(), config.num_parents);
        let report = engine.step();

        assert_eq!(report.parents, config.num_parents);
        assert_eq!(report.children, config.num_children);
        assert_eq!(&engine.population()[..5], &expected_elites[..5]);
        assert_eq!(report.population_size, 5 + config.num_children);
        assert_eq!(engine.population().len(), report.population_size);
    }

    #[test]
    fn test_step_truncates_to_population_size() {
        let config = GaConfig {
            population_size: 12,
            ..get_test_config()
        };
        let mut engine = EvolutionEngine::new(&config);
        engine.initialize_population();

        let report = engine.step();
        assert_eq!(report.children, config.num_children);
        assert_eq!(report.population_size, 12);
        assert_eq!(engine.population().len(), 12);
    }

    #[test]
    fn test_step_without_children_keeps_only_elites() {
        let config = GaConfig {
            num_children: 0,
            ..get_test_config()
        };
        let mut engine = EvolutionEngine::new(&config);
        engine.initialize_population();

        let report = engine.step();
        assert_eq!(report.children, 0);
        assert_eq!(report.mutation.rate, 0.05);
        assert_eq!(engine.population().len(), config.elite_count);
    }

    #[test]
    fn test_step_without_parents_empties_population() {
        let config = GaConfig {
            num_parents: 0,
            ..get_test_config()
        };
        let mut engine = EvolutionEngine::new(&config);
        engine.initialize_population();

        let report = engine.step();
        assert_eq!(report.parents, 0);
        assert!(engine.population().is_empty());

        // an empty population keeps cycling without panicking
        let report = engine.step();
        assert_eq!(report.population_size, 0);
    }

    #[test]
    fn test_zero_generation_budget_returns_seed_generation() {
        let config = GaConfig {
            max_generations: 0,
            ..get_test_config()
        };
        let mut engine = EvolutionEngine::new(&config);
        let outcome = engine.evolve();

        assert_eq!(outcome.generations, 0);
        assert_eq!(outcome.population.len(), config.population_size);
        assert_eq!(&outcome.population[..5], &BOUNDARY_SEEDS);
    }

    #[test]
    fn test_unreachable_threshold_uses_whole_budget() {
        let config = GaConfig {
            coverage_threshold: 1.5,
            max_generations: 7,
            ..get_test_config()
        };
        let mut engine = EvolutionEngine::new(&config);
        let outcome = engine.evolve();

        assert_eq!(outcome.generations, 7);
        assert!(outcome.population.len() <= config.population_size);
    }

    #[test]
    fn test_zero_threshold_stops_immediately() {
        let config = GaConfig {
            coverage_threshold: 0.0,
            ..get_test_config()
        };
        let mut engine = EvolutionEngine::new(&config);
        assert_eq!(engine.evolve().generations, 0);
    }

    #[test]
    fn test_full_evolution_run_completes() {
        let config = get_test_config();
        let mut engine = EvolutionEngine::new(&config);
        let outcome = engine.evolve();

        assert!(outcome.generations <= config.max_generations);
        assert!(outcome.population.len() <= config.population_size);
        assert!(!outcome.population.is_empty());

        // the reported counts can be recomputed from the returned population
        let valid = outcome
            .population
            .iter()
            .filter(|c| is_valid(c.day, c.month, c.year))
            .count();
        assert_eq!(outcome.coverage.valid, valid);
        assert_eq!(outcome.coverage.invalid, outcome.population.len() - valid);

        // stopping early means coverage was reached
        if outcome.generations < config.max_generations {
            assert!(outcome.coverage.satisfies(config.coverage_threshold));
        }
    }

    #[test]
    fn test_same_seed_same_outcome() {
        let config = GaConfig {
            coverage_threshold: 2.0,
            max_generations: 15,
            ..get_test_config()
        };
        let first = EvolutionEngine::new(&config).evolve();
        let second = EvolutionEngine::new(&config).evolve();

        assert_eq!(first.population, second.population);
        assert_eq!(first.generations, second.generations);
    }
}
