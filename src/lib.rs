//! Advent of Code 2021 solutions. Each day is a binary under `src/bin` that
//! hands its `solve` to [`harness::run`].

pub mod diagnostic;
pub mod dive;
pub mod harness;
pub mod sonar;
