//! A single branch and its per-tick state machine.
//!
//! A branch is `Growing` until either its heading has turned more than a
//! full circle since it was created (it curled up) or it has grown past the
//! configured age. Both transitions are permanent; a dormant branch keeps
//! its geometry and is still drawn.

use crate::{
    config::Config,
    dna::Dna,
    ribbon::ribbon_polygon,
    types::{BranchId, Color, polar},
};
use glam::Vec2;
use rand::Rng;
use std::f32::consts::{FRAC_PI_2, TAU};
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DormantReason {
    /// Turned more than a full circle since creation.
    Curled,
    /// Grew past `Config::max_age`.
    Aged,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BranchState {
    Growing,
    Dormant(DormantReason),
}

/// A request, produced by [`Branch::update`], to create a child branch.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprout {
    pub parent: BranchId,
    pub origin: Vec2,
    pub dna: Dna,
}

#[derive(Clone, Debug)]
pub struct Branch {
    id: BranchId,
    parent: Option<BranchId>,
    dna: Dna,
    start_angular_velocity: f32,
    path: Vec<Vec2>,
    normals: Vec<Vec2>,
    color: Color,
    grow_speed: f32,
    state: BranchState,
    dormant_ticks: u32,
}

/// Unit normal to the right of heading `angle`.
#[inline]
fn normal_for(angle: f32) -> Vec2 {
    polar(1.0, angle - FRAC_PI_2)
}

impl Branch {
    pub fn new(
        id: BranchId,
        parent: Option<BranchId>,
        dna: Dna,
        origin: Vec2,
        color: Color,
        grow_speed: f32,
    ) -> Self {
        let heading = dna.angular_velocity();
        Self {
            id,
            parent,
            start_angular_velocity: heading,
            dna,
            path: vec![origin],
            normals: vec![normal_for(heading)],
            color,
            grow_speed,
            state: BranchState::Growing,
            dormant_ticks: 0,
        }
    }

    /// `true` once the heading has drifted more than a full turn.
    #[inline]
    pub fn is_curled(&self) -> bool {
        (self.start_angular_velocity - self.dna.angular_velocity()).abs() > TAU
    }

    /// Advances the branch by one tick.
    ///
    /// Order of evaluation:
    /// 1. A curled branch does nothing at all, not even a random draw.
    /// 2. `too_old` is taken once, before growing.
    /// 3. If not too old, append one point and normal, then evolve the DNA.
    ///    A branch that curls or passes `max_age` in this step is marked
    ///    dormant right away.
    /// 4. Roll for a sprout. It needs `!too_old` and room for another
    ///    generation below `max_recursion_depth`.
    ///
    /// Because `too_old` is taken before the growth step, the tick on which
    /// the age first passes `max_age` may still sprout.
    pub fn update(&mut self, cfg: &Config, rng: &mut impl Rng) -> Option<Sprout> {
        if self.is_curled() {
            self.mark_dormant(DormantReason::Curled);
            return None;
        }

        let too_old = self.dna.age > cfg.max_age;
        if too_old {
            self.mark_dormant(DormantReason::Aged);
        } else {
            self.grow(cfg);
        }

        let need_sprout = rng.random::<f32>() < cfg.sprout_probability;
        let too_branchy = self.dna.generation + 1 >= cfg.max_recursion_depth;
        if too_old || too_branchy || !need_sprout {
            return None;
        }

        let sprout = Sprout {
            parent: self.id,
            origin: self.tip(),
            dna: self.dna.sprout(rng),
        };
        debug!(
            parent = self.id,
            generation = sprout.dna.generation,
            age = sprout.dna.age,
            "branch sprouted"
        );
        Some(sprout)
    }

    fn grow(&mut self, cfg: &Config) {
        let heading = self.dna.angular_velocity();
        let next = self.tip() + polar(self.grow_speed, heading);
        self.path.push(next);
        self.normals.push(normal_for(heading));
        self.dna.evolve(cfg.dt);

        if self.is_curled() {
            self.mark_dormant(DormantReason::Curled);
        } else if self.dna.age > cfg.max_age {
            self.mark_dormant(DormantReason::Aged);
        }
    }

    fn mark_dormant(&mut self, reason: DormantReason) {
        match self.state {
            BranchState::Growing => {
                debug!(id = self.id, ?reason, len = self.path.len(), "branch went dormant");
                self.state = BranchState::Dormant(reason);
            }
            BranchState::Dormant(_) => self.dormant_ticks = self.dormant_ticks.saturating_add(1),
        }
    }

    /// Closed tapered outline used to fill the branch.
    pub fn polygon(&self) -> Vec<Vec2> {
        ribbon_polygon(&self.path, &self.normals)
    }

    pub fn id(&self) -> BranchId {
        self.id
    }

    /// Id of the branch this one sprouted from. With a retention policy the
    /// parent may already have been pruned, so a lookup by this id can fail.
    pub fn parent(&self) -> Option<BranchId> {
        self.parent
    }

    pub fn dna(&self) -> &Dna {
        &self.dna
    }

    pub fn age(&self) -> u32 {
        self.dna.age
    }

    pub fn generation(&self) -> u32 {
        self.dna.generation
    }

    pub fn start_angular_velocity(&self) -> f32 {
        self.start_angular_velocity
    }

    pub fn path(&self) -> &[Vec2] {
        &self.path
    }

    pub fn normals(&self) -> &[Vec2] {
        &self.normals
    }

    /// Current growing end of the path.
    pub fn tip(&self) -> Vec2 {
        // `path` starts with the origin and is append-only.
        self.path[self.path.len() - 1]
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn grow_speed(&self) -> f32 {
        self.grow_speed
    }

    pub fn state(&self) -> BranchState {
        self.state
    }

    pub fn is_growing(&self) -> bool {
        self.state == BranchState::Growing
    }

    /// Ticks spent dormant after the tick the branch went dormant.
    pub fn dormant_ticks(&self) -> u32 {
        self.dormant_ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn cfg() -> Config {
        Config {
            sprout_probability: 0.0,
            ..Config::default()
        }
    }

    fn branch(rho: [f32; 4]) -> Branch {
        Branch::new(
            0,
            None,
            Dna::new(rho, 0, 0),
            Vec2::ZERO,
            Color::rgb(0, 0, 0),
            10.0,
        )
    }

    #[test]
    fn new_branch_has_one_point_and_one_normal() {
        let b = branch([FRAC_PI_2, 0.0, 0.0, 0.0]);
        assert_eq!(b.path(), &[Vec2::ZERO]);
        assert_eq!(b.normals().len(), 1);
        assert!(b.is_growing());
    }

    #[test]
    fn upright_branch_grows_up_screen() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut b = branch([FRAC_PI_2, 0.0, 0.0, 0.0]);

        assert!(b.update(&cfg(), &mut rng).is_none());

        assert_eq!(b.path().len(), 2);
        assert_eq!(b.normals().len(), 2);
        assert_eq!(b.age(), 1);

        let tip = b.tip();
        assert!(tip.x.abs() < 1e-4);
        assert!((tip.y + 10.0).abs() < 1e-4, "tip = {tip:?}");

        // Heading up, so the normal points to screen-right.
        let n = b.normals()[1];
        assert!((n.x - 1.0).abs() < 1e-5 && n.y.abs() < 1e-5, "normal = {n:?}");
    }

    #[test]
    fn aged_branch_freezes_but_may_sprout_on_transition_tick() {
        let mut rng = StdRng::seed_from_u64(0);
        let cfg = Config {
            max_age: 2,
            sprout_probability: 1.0,
            ..Config::default()
        };
        let mut b = branch([FRAC_PI_2, 0.0, 0.0, 0.0]);

        // Ages 0, 1, 2 are all <= max_age, so three growth steps happen.
        for _ in 0..3 {
            assert!(b.update(&cfg, &mut rng).is_some());
        }
        assert_eq!(b.age(), 3);
        assert_eq!(b.path().len(), 4);
        assert_eq!(b.state(), BranchState::Dormant(DormantReason::Aged));
        assert_eq!(b.dormant_ticks(), 0);

        // From here on the branch is too old: no growth and no sprouts.
        for _ in 0..5 {
            assert!(b.update(&cfg, &mut rng).is_none());
            assert_eq!(b.path().len(), 4);
            assert_eq!(b.age(), 3);
        }
        assert_eq!(b.state(), BranchState::Dormant(DormantReason::Aged));
        assert_eq!(b.dormant_ticks(), 5);
    }

    #[test]
    fn curled_branch_never_grows_or_sprouts_again() {
        let mut rng = StdRng::seed_from_u64(0);
        let cfg = Config {
            sprout_probability: 1.0,
            max_recursion_depth: 5,
            ..Config::default()
        };
        // rho[0] changes by 10 * 0.2 = 2 radians per growth step.
        let mut b = branch([0.0, 10.0, 0.0, 0.0]);

        let mut ticks = 0;
        while !b.is_curled() {
            b.update(&cfg, &mut rng);
            ticks += 1;
        }
        assert_eq!(ticks, 4);
        // Recorded on the growth step that curled it.
        assert_eq!(b.state(), BranchState::Dormant(DormantReason::Curled));
        let len = b.path().len();

        for _ in 0..3 {
            assert!(b.update(&cfg, &mut rng).is_none());
            assert_eq!(b.path().len(), len);
            assert_eq!(b.normals().len(), len);
        }
        assert_eq!(b.state(), BranchState::Dormant(DormantReason::Curled));
    }

    #[test]
    fn curled_branch_does_not_consume_randomness() {
        let cfg = Config {
            sprout_probability: 0.5,
            ..Config::default()
        };
        let mut b = branch([0.0, 0.0, 0.0, 0.0]);
        b.dna.rho[0] = 7.0;

        let mut rng = StdRng::seed_from_u64(77);
        b.update(&cfg, &mut rng);
        let after: u64 = rng.random();

        let expected: u64 = StdRng::seed_from_u64(77).random();
        assert_eq!(after, expected);
    }

    #[test]
    fn last_generation_never_sprouts() {
        let mut rng = StdRng::seed_from_u64(1);
        let cfg = Config {
            sprout_probability: 1.0,
            max_recursion_depth: 3,
            ..Config::default()
        };
        let mut b = Branch::new(
            4,
            Some(1),
            Dna::new([FRAC_PI_2, 0.0, 0.0, 0.0], 0, 2),
            Vec2::ZERO,
            Color::rgb(0, 0, 0),
            10.0,
        );
        for _ in 0..10 {
            assert!(b.update(&cfg, &mut rng).is_none());
        }
        assert_eq!(b.path().len(), 11);
    }

    #[test]
    fn sprout_starts_at_tip_with_parent_age() {
        let mut rng = StdRng::seed_from_u64(2);
        let cfg = Config {
            sprout_probability: 1.0,
            ..Config::default()
        };
        let mut b = branch([FRAC_PI_2, 0.0, 0.0, 0.0]);

        let sprout = b.update(&cfg, &mut rng).unwrap();
        assert_eq!(sprout.parent, 0);
        assert_eq!(sprout.origin, b.tip());
        assert_eq!(sprout.dna.age, b.age());
        assert_eq!(sprout.dna.generation, 1);
    }

    #[test]
    fn polygon_has_two_points_per_path_point() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut b = branch([FRAC_PI_2, 0.1, 0.0, 0.0]);
        for _ in 0..6 {
            b.update(&cfg(), &mut rng);
        }
        assert_eq!(b.polygon().len(), 2 * b.path().len());
    }

    #[test]
    fn dormancy_is_recorded_on_the_growth_step_that_ends_it() {
        let mut rng = StdRng::seed_from_u64(3);
        let cfg = Config {
            max_age: 1,
            ..cfg()
        };
        let mut b = branch([FRAC_PI_2, 0.0, 0.0, 0.0]);

        b.update(&cfg, &mut rng);
        assert!(b.is_growing());
        b.update(&cfg, &mut rng);
        assert_eq!(b.age(), 2);
        assert!(!b.is_growing());

        b.update(&cfg, &mut rng);
        assert_eq!(b.path().len(), 3);
        assert_eq!(b.dormant_ticks(), 1);
    }
}
