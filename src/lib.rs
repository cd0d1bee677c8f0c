//! tegenome: circular genomes that accumulate transposable elements.
//!
//! A genome is a ring of positions into which transposable elements (TEs) are
//! inserted, copied and disabled. Inserting into an active TE disables it.
//! Two interchangeable storage strategies implement the [`Genome`] contract:
//! a flat vector ([`ArrayGenome`]) and an arena-backed circular linked list
//! ([`LinkedGenome`]).

pub mod base;
pub mod errors;
pub mod genome;
pub mod prelude;
pub mod simulation;

pub use base::Symbol;
pub use genome::{AnyGenome, ArrayGenome, Backend, Genome, LinkedGenome, TeId};
