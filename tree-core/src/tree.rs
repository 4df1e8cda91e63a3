use crate::{
    branch::{Branch, Sprout},
    config::Config,
    dna::Dna,
    error::Result,
    palette::Palette,
    render::{Animation, Frame, Shape, Surface},
    types::BranchId,
};
use glam::Vec2;
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, info};

/// Summary of one [`Tree::tick`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    /// 1-based number of the tick that just ran.
    pub tick: u64,
    /// Branches that were part of this tick's snapshot.
    pub updated: usize,
    /// Branches created this tick. They join the frame on the next tick.
    pub sprouted: Vec<BranchId>,
    /// Branches dropped by the retention policy before the snapshot.
    pub pruned: usize,
}

/// Owns every branch of one growing tree and drives it tick by tick.
///
/// Branches live in creation order in a flat arena. A tick runs in two
/// phases: every branch in a snapshot of the arena is updated (newest
/// first), and only afterwards are the sprouted children appended. The
/// snapshot is also what [`Tree::frame`] draws, so a new branch shows up
/// one tick after it was created.
#[derive(Debug)]
pub struct Tree<R: Rng = StdRng> {
    cfg: Config,
    palette: Palette,
    rng: R,
    branches: Vec<Branch>,
    next_id: BranchId,
    visible: usize,
    ticks: u64,
}

impl<R: Rng> Tree<R> {
    /// Validates `cfg` and plants the root at `cfg.origin`.
    pub fn new(cfg: Config, palette: Palette, mut rng: R) -> Result<Self> {
        cfg.validate()?;

        let root = Dna::root(&mut rng);
        let origin = cfg.origin;
        let mut tree = Self {
            cfg,
            palette,
            rng,
            branches: Vec::with_capacity(64),
            next_id: 0,
            visible: 0,
            ticks: 0,
        };
        tree.spawn(None, root, origin);

        info!(
            palette = tree.palette.name(),
            heading = tree.branches[0].start_angular_velocity(),
            "planted tree"
        );
        Ok(tree)
    }

    fn spawn(&mut self, parent: Option<BranchId>, dna: Dna, origin: Vec2) -> BranchId {
        let id = self.next_id;
        self.next_id += 1;
        let color = self.palette.color_for(dna.generation);
        self.branches.push(Branch::new(
            id,
            parent,
            dna,
            origin,
            color,
            self.cfg.grow_speed,
        ));
        id
    }

    /// Advances every branch by one tick.
    pub fn tick(&mut self) -> TickReport {
        self.ticks += 1;
        let pruned = self.prune();

        // Phase 1: update a frozen snapshot, newest branch first.
        let snapshot = self.branches.len();
        let mut sprouts: Vec<Sprout> = Vec::new();
        for branch in self.branches[..snapshot].iter_mut().rev() {
            if let Some(sprout) = branch.update(&self.cfg, &mut self.rng) {
                sprouts.push(sprout);
            }
        }

        // Phase 2: insert children after the whole pass.
        let sprouted = sprouts
            .into_iter()
            .map(|s| self.spawn(Some(s.parent), s.dna, s.origin))
            .collect::<Vec<_>>();
        self.visible = snapshot;

        if !sprouted.is_empty() {
            debug!(
                tick = self.ticks,
                count = sprouted.len(),
                total = self.branches.len(),
                "new branches"
            );
        }

        TickReport {
            tick: self.ticks,
            updated: snapshot,
            sprouted,
            pruned,
        }
    }

    /// Drops branches that have stayed dormant for too long.
    fn prune(&mut self) -> usize {
        let Some(limit) = self.cfg.prune_dormant_after else {
            return 0;
        };

        let before = self.branches.len();
        self.branches
            .retain(|b| b.is_growing() || b.dormant_ticks() <= limit);
        let pruned = before - self.branches.len();
        if pruned > 0 {
            debug!(tick = self.ticks, pruned, "pruned dormant branches");
        }
        pruned
    }

    /// Shapes of the branches updated by the last tick, in painting order.
    ///
    /// Newest branches come first so the trunk is painted over its
    /// children. Empty before the first tick.
    pub fn frame(&self) -> Frame {
        let shapes = self.branches[..self.visible]
            .iter()
            .rev()
            .map(|b| Shape {
                branch: b.id(),
                color: b.color(),
                opacity: self.cfg.fill_opacity,
                polygon: b.polygon(),
            })
            .collect();
        Frame { shapes }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// All live branches in creation order.
    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    pub fn branch(&self, id: BranchId) -> Option<&Branch> {
        // Ids grow with the arena order, so a binary search is enough.
        self.branches
            .binary_search_by_key(&id, Branch::id)
            .ok()
            .map(|i| &self.branches[i])
    }

    pub fn len(&self) -> usize {
        self.branches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    pub fn growing_count(&self) -> usize {
        self.branches.iter().filter(|b| b.is_growing()).count()
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }
}

impl Tree<StdRng> {
    /// A tree whose growth is fully determined by `seed`.
    pub fn seeded(cfg: Config, palette: Palette, seed: u64) -> Result<Self> {
        Self::new(cfg, palette, StdRng::seed_from_u64(seed))
    }

    /// Builds a tree from `cfg` alone.
    ///
    /// Uses `cfg.seed` when present and OS entropy otherwise. The palette
    /// is resolved from `cfg.palette` with the same random source.
    pub fn from_config(cfg: Config) -> Result<Self> {
        let mut rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let palette = Palette::resolve(cfg.palette.as_deref(), &mut rng)?;
        Self::new(cfg, palette, rng)
    }
}

impl<R: Rng> Animation for Tree<R> {
    fn tick(&mut self, surface: &mut dyn Surface) {
        Tree::tick(self);
        self.frame().draw(surface);
    }
}
