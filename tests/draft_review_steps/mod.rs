//! Step definitions for draft review BDD scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
