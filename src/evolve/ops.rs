//! Genetic operators: random generation, mutation, and two-point crossover.

use rand::prelude::*;

use crate::schema::{Label, SdaGenome};

/// Label draw table. Single-bit labels appear twice, making them twice as
/// likely as any two-bit label.
const LABEL_DRAW: [Label; 8] = [
    Label::One,
    Label::One,
    Label::Zero,
    Label::Zero,
    Label::ZeroZero,
    Label::OneOne,
    Label::ZeroOne,
    Label::OneZero,
];

/// Random number generator wrapper for the genetic operators.
pub struct EvolveRng {
    rng: StdRng,
}

impl EvolveRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create with random seed.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    fn random_label(&mut self) -> Label {
        LABEL_DRAW[self.rng.gen_range(0..LABEL_DRAW.len())]
    }

    /// Generate a random genome of `states` states: each emission label drawn
    /// from the weighted table, each transition target uniform over the state
    /// range.
    pub fn random_genome(&mut self, states: usize) -> SdaGenome {
        let emit = (0..states).map(|_| self.random_label()).collect();
        let transitions = (0..states)
            .map(|_| {
                [
                    self.rng.gen_range(0..states),
                    self.rng.gen_range(0..states),
                ]
            })
            .collect();
        SdaGenome::from_parts(emit, transitions)
    }

    /// Apply between 1 and `max_mutations` point mutations in place.
    ///
    /// Each mutation picks a state uniformly and replaces either its emission
    /// label (fresh weighted draw) or one of its two transition targets
    /// (fresh uniform draw), with equal probability. `max_mutations` must be
    /// at least 1.
    pub fn mutate(&mut self, genome: &mut SdaGenome, max_mutations: usize) {
        debug_assert!(max_mutations >= 1);
        let states = genome.states();
        let count = self.rng.gen_range(1..=max_mutations);
        for _ in 0..count {
            let state = self.rng.gen_range(0..states);
            if self.rng.gen_bool(0.5) {
                let label = self.random_label();
                genome.set_emit(state, label);
            } else {
                let slot = self.rng.gen_range(0..2);
                let target = self.rng.gen_range(0..states);
                genome.set_transition(state, slot, target);
            }
        }
    }

    /// Two-point crossover over state slots, followed by mutation of both
    /// children.
    ///
    /// The crossover points are `point1` uniform over the state range and
    /// `point2 = (point1 + offset) mod states` with `offset` uniform over
    /// `1..states`, swapped so `point1 <= point2`. Child 1 takes parent 2's
    /// slots inside `[point1, point2)` and parent 1's outside; child 2 is the
    /// mirror. Both children own their tables outright — nothing is shared
    /// with the parents. Requires at least two states.
    pub fn crossover(
        &mut self,
        parent1: &SdaGenome,
        parent2: &SdaGenome,
        max_mutations: usize,
    ) -> (SdaGenome, SdaGenome) {
        let states = parent1.states();
        debug_assert_eq!(states, parent2.states());
        debug_assert!(states >= 2);

        let point1 = self.rng.gen_range(0..states);
        let point2 = (point1 + self.rng.gen_range(1..states)) % states;
        let (lo, hi) = if point1 <= point2 {
            (point1, point2)
        } else {
            (point2, point1)
        };

        let (mut child1, mut child2) = exchange_segments(parent1, parent2, lo, hi);
        self.mutate(&mut child1, max_mutations);
        self.mutate(&mut child2, max_mutations);
        (child1, child2)
    }

    /// Sample `count` distinct indices uniformly from `0..population`.
    pub(crate) fn sample_indices(&mut self, population: usize, count: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.rng, population, count).into_vec()
    }
}

/// Swap the `[lo, hi)` state slots between two parents, producing two fully
/// independent children.
fn exchange_segments(
    parent1: &SdaGenome,
    parent2: &SdaGenome,
    lo: usize,
    hi: usize,
) -> (SdaGenome, SdaGenome) {
    let mut child1 = parent1.clone();
    let mut child2 = parent2.clone();
    for state in lo..hi {
        child1.set_emit(state, parent2.emit(state));
        child2.set_emit(state, parent1.emit(state));
        for slot in 0..2 {
            child1.set_transition(state, slot, parent2.transitions()[state][slot]);
            child2.set_transition(state, slot, parent1.transitions()[state][slot]);
        }
    }
    (child1, child2)
}
