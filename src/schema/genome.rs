//! Genome types for self-driving automata.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Emission label: the bit fragment appended to the output when a transition
/// lands on a state.
///
/// The alphabet is fixed to the six bit-literals of length one or two, so a
/// genome can never carry a malformed label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    #[serde(rename = "0")]
    Zero,
    #[serde(rename = "1")]
    One,
    #[serde(rename = "00")]
    ZeroZero,
    #[serde(rename = "01")]
    ZeroOne,
    #[serde(rename = "10")]
    OneZero,
    #[serde(rename = "11")]
    OneOne,
}

impl Label {
    /// Bits emitted by this label, in output order.
    pub const fn bits(self) -> &'static [u8] {
        match self {
            Label::Zero => &[0],
            Label::One => &[1],
            Label::ZeroZero => &[0, 0],
            Label::ZeroOne => &[0, 1],
            Label::OneZero => &[1, 0],
            Label::OneOne => &[1, 1],
        }
    }

    /// Number of bits this label contributes per visit (1 or 2).
    pub const fn width(self) -> usize {
        self.bits().len()
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits() {
            write!(f, "{bit}")?;
        }
        Ok(())
    }
}

/// Genome validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenomeError {
    #[error("genome needs at least one state")]
    Empty,
    #[error("emit table has {emit} entries but transition table has {transitions}")]
    LengthMismatch { emit: usize, transitions: usize },
    #[error("state {state} transition on bit {bit} targets {target}, outside 0..{states}")]
    TransitionOutOfRange {
        state: usize,
        bit: u8,
        target: usize,
        states: usize,
    },
}

/// The evolvable configuration of a self-driving automaton.
///
/// A genome of `N` states carries one emission [`Label`] per state and one
/// `[next_on_0, next_on_1]` transition pair per state. Runtime bit generation
/// lives in [`crate::automaton::BitStream`]; the genome itself is immutable
/// outside the genetic operators.
///
/// Construction validates the transition table, so every `SdaGenome` in
/// circulation satisfies the genome invariants. Deserialization funnels
/// through the same validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GenomeRepr", into = "GenomeRepr")]
pub struct SdaGenome {
    emit: Vec<Label>,
    transitions: Vec<[usize; 2]>,
}

/// Raw wire form of a genome, before validation.
#[derive(Serialize, Deserialize)]
struct GenomeRepr {
    emit: Vec<Label>,
    transitions: Vec<[usize; 2]>,
}

impl From<SdaGenome> for GenomeRepr {
    fn from(genome: SdaGenome) -> Self {
        Self {
            emit: genome.emit,
            transitions: genome.transitions,
        }
    }
}

impl TryFrom<GenomeRepr> for SdaGenome {
    type Error = GenomeError;

    fn try_from(raw: GenomeRepr) -> Result<Self, GenomeError> {
        SdaGenome::new(raw.emit, raw.transitions)
    }
}

impl SdaGenome {
    /// Build a genome, validating that both tables have the same non-zero
    /// length and that every transition targets a valid state.
    pub fn new(emit: Vec<Label>, transitions: Vec<[usize; 2]>) -> Result<Self, GenomeError> {
        if emit.is_empty() {
            return Err(GenomeError::Empty);
        }
        if emit.len() != transitions.len() {
            return Err(GenomeError::LengthMismatch {
                emit: emit.len(),
                transitions: transitions.len(),
            });
        }
        let states = emit.len();
        for (state, pair) in transitions.iter().enumerate() {
            for (bit, &target) in pair.iter().enumerate() {
                if target >= states {
                    return Err(GenomeError::TransitionOutOfRange {
                        state,
                        bit: bit as u8,
                        target,
                        states,
                    });
                }
            }
        }
        Ok(Self { emit, transitions })
    }

    /// Assemble a genome the genetic operators already know to be valid.
    pub(crate) fn from_parts(emit: Vec<Label>, transitions: Vec<[usize; 2]>) -> Self {
        debug_assert_eq!(emit.len(), transitions.len());
        debug_assert!(!emit.is_empty());
        debug_assert!(
            transitions
                .iter()
                .all(|pair| pair.iter().all(|&t| t < emit.len()))
        );
        Self { emit, transitions }
    }

    /// Number of states.
    pub fn states(&self) -> usize {
        self.emit.len()
    }

    /// Emission label of a state.
    pub fn emit(&self, state: usize) -> Label {
        self.emit[state]
    }

    /// Successor of `state` when the driving bit is `bit` (0 or 1).
    pub fn transition(&self, state: usize, bit: u8) -> usize {
        debug_assert!(bit <= 1);
        self.transitions[state][bit as usize]
    }

    /// Full emission table.
    pub fn emits(&self) -> &[Label] {
        &self.emit
    }

    /// Full transition table.
    pub fn transitions(&self) -> &[[usize; 2]] {
        &self.transitions
    }

    pub(crate) fn set_emit(&mut self, state: usize, label: Label) {
        self.emit[state] = label;
    }

    pub(crate) fn set_transition(&mut self, state: usize, slot: usize, target: usize) {
        debug_assert!(target < self.states());
        self.transitions[state][slot] = target;
    }
}
