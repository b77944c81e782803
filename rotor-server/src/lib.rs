//! Rotor planner.
//!
//! Answers: "on a graph where each node offers one edge per time step, in
//! rotation, how soon can I get from node 1 to node n, and how little do I
//! have to wait to do it?"

pub mod cache;
pub mod domain;
pub mod graph;
pub mod input;
pub mod planner;
pub mod web;
