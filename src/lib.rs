//! Evolutionary search over self-driving automata for 2-D room layouts.
//!
//! A *self-driving automaton* (SDA) is a finite-state bit generator that
//! grows its output stream by feeding the stream back in as its own driving
//! input. This crate pairs the automaton runtime with a steady-state genetic
//! algorithm that searches the space of automaton genomes against a
//! pluggable fitness function, plus the room/envelope model and raster
//! renderer for the decoded layouts.
//!
//! # Architecture
//!
//! The crate is split into four modules:
//!
//! - `schema`: configuration and genome types
//! - `automaton`: runtime bit generation
//! - `evolve`: genetic operators and the steady-state search engine
//! - `map`: room model, the map-decoder seam, and PNG rendering
//!
//! # Example
//!
//! ```rust,no_run
//! use sda_mapgen::{OnesDensity, SearchConfig, SearchEngine};
//!
//! let config = SearchConfig {
//!     generations: 1_000,
//!     random_seed: Some(42),
//!     ..SearchConfig::default()
//! };
//!
//! let mut engine = SearchEngine::new(config, OnesDensity::new(100))?;
//! engine.evolve();
//!
//! println!("best score: {}", engine.best_score());
//! # Ok::<(), sda_mapgen::ConfigError>(())
//! ```

pub mod automaton;
pub mod evolve;
pub mod map;
pub mod schema;

// Re-export commonly used types
pub use automaton::BitStream;
pub use evolve::{EvolveRng, Fitness, OnesDensity, SearchEngine};
pub use map::{Envelope, MapDecoder, Room, envelope};
pub use schema::{ConfigError, GenomeError, Label, SdaGenome, SearchConfig};
