//! Core of the DNA tree: stochastic branch growth and ribbon outlines.
//!
//! Main components:
//! - [`dna`] — per-branch growth state and its integration step.
//! - [`branch`] — one branch and its grow / go dormant / sprout state machine.
//! - [`ribbon`] — tapered outline built from a branch's path and normals.
//! - [`tree`] — the orchestrator that owns all branches and runs ticks.
//! - [`render`] — drawing contract ([`render::Surface`], [`render::Frame`]).
//! - [`config`] and [`palette`] — tunables, config files, and colors.
//! - [`error`] — errors raised while building a tree.
//! - [`types`] — shared ids, colors, and small geometry helpers.

pub mod branch;
pub mod config;
pub mod dna;
pub mod error;
pub mod palette;
pub mod render;
pub mod ribbon;
pub mod tree;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use palette::Palette;
pub use tree::{TickReport, Tree};
