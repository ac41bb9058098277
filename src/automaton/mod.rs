//! Automaton module - Runtime bit generation for self-driving automata.

mod bitstream;

pub use bitstream::*;
