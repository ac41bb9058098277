//! Steady-state tournament search over automaton genomes.

use log::info;

use crate::evolve::{EvolveRng, Fitness};
use crate::schema::{ConfigError, SdaGenome, SearchConfig};

/// Extremes of one tournament sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TournamentPicks {
    best: usize,
    second_best: usize,
    worst: usize,
    second_worst: usize,
}

impl TournamentPicks {
    /// Single linear pass over the sampled indices.
    ///
    /// The first two sampled indices seed both extreme pairs; the remainder
    /// is scanned with `>=` / `<=` comparisons, so ties favor the
    /// later-scanned index for both the best and the worst pair.
    fn scan(sample: &[usize], scores: &[f64]) -> Self {
        let (mut best, mut second_best) = (sample[0], sample[1]);
        if scores[best] < scores[second_best] {
            std::mem::swap(&mut best, &mut second_best);
        }
        let (mut worst, mut second_worst) = (sample[0], sample[1]);
        if scores[worst] > scores[second_worst] {
            std::mem::swap(&mut worst, &mut second_worst);
        }
        for &index in &sample[2..] {
            if scores[index] >= scores[best] {
                second_best = best;
                best = index;
            } else if scores[index] >= scores[second_best] {
                second_best = index;
            }
            if scores[index] <= scores[worst] {
                second_worst = worst;
                worst = index;
            } else if scores[index] <= scores[second_worst] {
                second_worst = index;
            }
        }
        Self {
            best,
            second_best,
            worst,
            second_worst,
        }
    }
}

/// Steady-state genetic search over a fixed-size population of genomes.
///
/// Each [`update`] samples a tournament, crosses over the two best members,
/// and replaces the two worst with the offspring. Only the tournament's two
/// lowest-scoring slots are ever overwritten, so with a tournament of three
/// or more the population's maximum score never decreases.
///
/// [`update`]: SearchEngine::update
pub struct SearchEngine<F> {
    config: SearchConfig,
    rng: EvolveRng,
    fitness: F,
    genomes: Vec<SdaGenome>,
    scores: Vec<f64>,
    generation: usize,
}

impl<F: Fitness> SearchEngine<F> {
    /// Validate the configuration, then build and score a random initial
    /// population.
    pub fn new(config: SearchConfig, fitness: F) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = config.random_seed.unwrap_or_else(rand::random);
        let mut rng = EvolveRng::new(seed);
        let genomes: Vec<SdaGenome> = (0..config.population_size)
            .map(|_| rng.random_genome(config.sda_size))
            .collect();
        let scores = genomes.iter().map(|g| fitness.evaluate(g)).collect();
        Ok(Self {
            config,
            rng,
            fitness,
            genomes,
            scores,
            generation: 0,
        })
    }

    /// One steady-state generation step: tournament, crossover, replacement.
    ///
    /// The two offspring overwrite the tournament's two worst slots and are
    /// rescored immediately, so `scores[i]` is never stale.
    pub fn update(&mut self) {
        let sample = self
            .rng
            .sample_indices(self.genomes.len(), self.config.tournament_size);
        let picks = TournamentPicks::scan(&sample, &self.scores);
        debug_assert_ne!(picks.worst, picks.second_worst);

        let (child1, child2) = self.rng.crossover(
            &self.genomes[picks.best],
            &self.genomes[picks.second_best],
            self.config.max_mutations,
        );
        self.replace(picks.worst, child1);
        self.replace(picks.second_worst, child2);
        self.generation += 1;
    }

    fn replace(&mut self, slot: usize, genome: SdaGenome) {
        self.scores[slot] = self.fitness.evaluate(&genome);
        self.genomes[slot] = genome;
    }

    /// Run the configured number of generations, reporting the population
    /// maximum at the configured interval.
    pub fn evolve(&mut self) {
        info!("initial population: max score {}", self.best_score());
        for step in 0..self.config.generations {
            if self.config.report_interval > 0 && step % self.config.report_interval == 0 {
                info!("generation {step}: max score {}", self.best_score());
            }
            self.update();
        }
    }

    /// The genome with the strictly greatest score; the earliest slot wins
    /// under ties.
    pub fn best(&self) -> &SdaGenome {
        let mut best = 0;
        for i in 1..self.scores.len() {
            if self.scores[i] > self.scores[best] {
                best = i;
            }
        }
        &self.genomes[best]
    }

    /// Maximum score in the current population.
    pub fn best_score(&self) -> f64 {
        self.scores.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Current population genomes, slot-aligned with [`scores`](Self::scores).
    pub fn genomes(&self) -> &[SdaGenome] {
        &self.genomes
    }

    /// Current population scores.
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// Number of update steps performed.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// The configuration this engine was built with.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evolve::OnesDensity;

    fn small_config(seed: u64) -> SearchConfig {
        SearchConfig {
            sda_size: 8,
            population_size: 12,
            tournament_size: 4,
            max_mutations: 1,
            generations: 50,
            report_interval: 0,
            random_seed: Some(seed),
        }
    }

    #[test]
    fn test_scan_picks_extremes() {
        let scores = [5.0, 1.0, 9.0, 9.0, 2.0, 7.0, 3.0];
        let sample = [0, 1, 2, 3, 4, 5, 6];
        let picks = TournamentPicks::scan(&sample, &scores);
        // The later 9 wins the best slot; the earlier 9 is demoted to second.
        assert_eq!(picks.best, 3);
        assert_eq!(picks.second_best, 2);
        assert_eq!(picks.worst, 1);
        assert_eq!(picks.second_worst, 4);
    }

    #[test]
    fn test_scan_ties_favor_later_index() {
        let scores = [3.0, 3.0, 3.0];
        let picks = TournamentPicks::scan(&[0, 1, 2], &scores);
        assert_eq!(picks.best, 2);
        assert_eq!(picks.second_best, 0);
        assert_eq!(picks.worst, 2);
        assert_eq!(picks.second_worst, 0);
    }

    #[test]
    fn test_scan_indices_are_population_slots() {
        // Sampled indices need not be contiguous or ordered.
        let mut scores = vec![0.0; 40];
        scores[31] = 9.0;
        scores[17] = 6.0;
        scores[5] = -2.0;
        scores[23] = 1.0;
        let picks = TournamentPicks::scan(&[23, 31, 5, 17], &scores);
        assert_eq!(picks.best, 31);
        assert_eq!(picks.second_best, 17);
        assert_eq!(picks.worst, 5);
        assert_eq!(picks.second_worst, 23);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = SearchConfig {
            population_size: 4,
            tournament_size: 7,
            ..Default::default()
        };
        let err = SearchEngine::new(config, OnesDensity::new(20)).err().unwrap();
        assert_eq!(
            err,
            ConfigError::TournamentExceedsPopulation {
                tournament: 7,
                population: 4
            }
        );
    }

    #[test]
    fn test_initial_population_scored() {
        let fitness = OnesDensity::new(20);
        let engine = SearchEngine::new(small_config(1), fitness).unwrap();
        assert_eq!(engine.genomes().len(), 12);
        assert_eq!(engine.scores().len(), 12);
        for (genome, &score) in engine.genomes().iter().zip(engine.scores()) {
            assert_eq!(fitness.evaluate(genome), score);
        }
    }

    #[test]
    fn test_scores_stay_consistent_after_updates() {
        let fitness = OnesDensity::new(20);
        let mut engine = SearchEngine::new(small_config(2), fitness).unwrap();
        for _ in 0..50 {
            engine.update();
        }
        assert_eq!(engine.generation(), 50);
        for (genome, &score) in engine.genomes().iter().zip(engine.scores()) {
            assert_eq!(fitness.evaluate(genome), score);
        }
    }

    #[test]
    fn test_max_score_never_decreases() {
        // Steady-state replacement only overwrites tournament losers, so the
        // population maximum is monotone.
        let mut engine = SearchEngine::new(small_config(3), OnesDensity::new(20)).unwrap();
        let mut max = engine.best_score();
        for _ in 0..300 {
            engine.update();
            let now = engine.best_score();
            assert!(now >= max);
            max = now;
        }
    }

    #[test]
    fn test_seeded_runs_reproduce() {
        let mut first = SearchEngine::new(small_config(9), OnesDensity::new(20)).unwrap();
        let mut second = SearchEngine::new(small_config(9), OnesDensity::new(20)).unwrap();
        first.evolve();
        second.evolve();
        assert_eq!(first.best(), second.best());
        assert_eq!(first.scores(), second.scores());
    }

    #[test]
    fn test_best_prefers_earliest_on_ties() {
        let config = SearchConfig {
            generations: 0,
            ..small_config(4)
        };
        let mut engine = SearchEngine::new(config, OnesDensity::new(8)).unwrap();
        // Force a known score landscape.
        for score in engine.scores.iter_mut() {
            *score = 1.0;
        }
        engine.scores[5] = 7.0;
        engine.scores[9] = 7.0;
        let expected = engine.genomes[5].clone();
        assert_eq!(engine.best(), &expected);
    }
}
