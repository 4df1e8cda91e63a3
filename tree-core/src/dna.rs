//! Growth state carried by every branch.
//!
//! `rho` holds the angular velocity of the growing tip followed by its
//! first three derivatives. Each growth step integrates the chain once, so
//! a small jerk term slowly bends the branch into organic curves.

use rand::Rng;
use std::f32::consts::FRAC_PI_2;

pub const RHO_LEN: usize = 4;

/// Canonical starting vector: pointing straight up, not turning.
pub const UPRIGHT_AT_REST: [f32; RHO_LEN] = [FRAC_PI_2, 0.0, 0.0, 0.0];

/// Turn applied to a child's heading, to the left or to the right.
pub const CHILD_TURN: f32 = 0.1;

/// Half-widths of the uniform ranges for `rho[1..]` of a derived vector.
pub const DERIVATIVE_SPREAD: [f32; RHO_LEN - 1] = [0.3, 0.03, 0.003];

#[derive(Clone, Debug, PartialEq)]
pub struct Dna {
    pub rho: [f32; RHO_LEN],
    /// Growth steps taken, inherited from the parent at sprout time.
    pub age: u32,
    /// Recursion depth; the root is generation 0.
    pub generation: u32,
}

impl Dna {
    pub fn new(rho: [f32; RHO_LEN], age: u32, generation: u32) -> Self {
        Self {
            rho,
            age,
            generation,
        }
    }

    /// Root growth state: a randomized variation of [`UPRIGHT_AT_REST`].
    pub fn root(rng: &mut impl Rng) -> Self {
        Self::new(derive_child_rho(&UPRIGHT_AT_REST, rng), 0, 0)
    }

    /// Integrates the derivative chain by one step and ages the state.
    ///
    /// Lower orders are updated first, so `rho[i]` absorbs the value
    /// `rho[i + 1]` had before this step. The highest order never changes.
    pub fn evolve(&mut self, dt: f32) {
        for i in 0..RHO_LEN - 1 {
            self.rho[i] += self.rho[i + 1] * dt;
        }
        self.age += 1;
    }

    /// Growth state for a child sprouting from this one.
    pub fn sprout(&self, rng: &mut impl Rng) -> Self {
        Self::new(
            derive_child_rho(&self.rho, rng),
            self.age,
            self.generation + 1,
        )
    }

    #[inline]
    pub fn angular_velocity(&self) -> f32 {
        self.rho[0]
    }
}

/// Derives a fresh vector for a new branch.
///
/// The heading keeps the parent's angle plus a left or right turn of
/// [`CHILD_TURN`]; the derivatives are resampled from shrinking ranges.
pub fn derive_child_rho(parent: &[f32; RHO_LEN], rng: &mut impl Rng) -> [f32; RHO_LEN] {
    let turn = if rng.random_bool(0.5) {
        CHILD_TURN
    } else {
        -CHILD_TURN
    };

    let mut rho = [parent[0] + turn, 0.0, 0.0, 0.0];
    for (slot, spread) in rho[1..].iter_mut().zip(DERIVATIVE_SPREAD) {
        *slot = rng.random_range(-spread..spread);
    }
    rho
}
