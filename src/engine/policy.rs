//! Epsilon-greedy cell selection with zone rotation and anti-repetition
//!
//! Every call targets the zone opposite to the one used last. The candidate
//! pool is built by walking [`FALLBACK_TIERS`] in order and stopping at the
//! first tier that leaves at least one unrevealed cell:
//!
//! | Tier | Cells considered | Memory respected |
//! |------|------------------|------------------|
//! | `RotatedZone` | preferred cells of the target zone | yes |
//! | `OtherZone` | preferred cells of the other zone | yes |
//! | `AnyPreferred` | preferred cells of both zones | no |
//! | `AnyCell` | all 25 cells | no |
//!
//! Each tier is strictly wider than the previous one, so a cell is returned
//! whenever any cell is still unrevealed.

use std::fmt;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::store::StateStore;
use crate::{
    error::{Error, Result},
    grid::{Cell, Zone, ZoneLayout},
    ports::RandomSource,
};

/// Default size of the top slice EXPLOIT picks from.
pub const DEFAULT_EXPLOIT_TOP_K: usize = 3;

/// Which branch of epsilon-greedy fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Strategy {
    Explore,
    Exploit,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Explore => write!(f, "EXPLORE"),
            Strategy::Exploit => write!(f, "EXPLOIT"),
        }
    }
}

/// Candidate-pool tiers, narrowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackTier {
    RotatedZone,
    OtherZone,
    AnyPreferred,
    AnyCell,
}

/// Order in which tiers are tried.
pub const FALLBACK_TIERS: [FallbackTier; 4] = [
    FallbackTier::RotatedZone,
    FallbackTier::OtherZone,
    FallbackTier::AnyPreferred,
    FallbackTier::AnyCell,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ZoneConstraint {
    Preferred(Zone),
    AnyPreferred,
    Unconstrained,
}

impl FallbackTier {
    fn constraints(self, target: Zone) -> (ZoneConstraint, bool) {
        match self {
            FallbackTier::RotatedZone => (ZoneConstraint::Preferred(target), true),
            FallbackTier::OtherZone => (ZoneConstraint::Preferred(target.opposite()), true),
            FallbackTier::AnyPreferred => (ZoneConstraint::AnyPreferred, false),
            FallbackTier::AnyCell => (ZoneConstraint::Unconstrained, false),
        }
    }

    /// Whether the anti-repetition memory still filters this tier.
    pub fn respects_memory(self) -> bool {
        matches!(self, FallbackTier::RotatedZone | FallbackTier::OtherZone)
    }
}

impl fmt::Display for FallbackTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FallbackTier::RotatedZone => "rotated-zone",
            FallbackTier::OtherZone => "other-zone",
            FallbackTier::AnyPreferred => "any-preferred",
            FallbackTier::AnyCell => "any-cell",
        };
        f.write_str(name)
    }
}

/// Outcome of one selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionResult {
    pub cell: Cell,
    pub strategy: Strategy,
    pub zone: Zone,
    /// `round(value_estimate * 100)`
    pub confidence: u8,
    pub epsilon_at_selection: f64,
    pub value_estimate_at_selection: f64,
    pub tier: FallbackTier,
}

/// Candidate pool produced by one fallback tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidatePool {
    pub tier: FallbackTier,
    pub cells: Vec<Cell>,
    /// Zone the pool was drawn from, `None` for the cross-zone tiers.
    pub zone: Option<Zone>,
}

/// Epsilon-greedy selection policy.
#[derive(Debug, Clone)]
pub struct Policy {
    layout: ZoneLayout,
    exploit_top_k: usize,
}

impl Policy {
    pub fn new(layout: ZoneLayout, exploit_top_k: usize) -> Self {
        Self {
            layout,
            exploit_top_k: exploit_top_k.max(1),
        }
    }

    pub fn layout(&self) -> &ZoneLayout {
        &self.layout
    }

    /// Cells a single tier would offer, given the store and this game's reveals.
    pub fn tier_candidates(
        &self,
        tier: FallbackTier,
        store: &StateStore,
        revealed: &[Cell],
    ) -> CandidatePool {
        let target = store.last_zone().opposite();
        let (constraint, respect_memory) = tier.constraints(target);

        let (base, zone): (Vec<Cell>, Option<Zone>) = match constraint {
            ZoneConstraint::Preferred(zone) => (self.layout.preferred(zone).to_vec(), Some(zone)),
            ZoneConstraint::AnyPreferred => (self.layout.all_preferred().collect(), None),
            ZoneConstraint::Unconstrained => (Cell::all().collect(), None),
        };

        let cells = base
            .into_iter()
            .filter(|cell| !revealed.contains(cell))
            .filter(|&cell| !respect_memory || !store.is_in_memory(cell))
            .collect();

        CandidatePool { tier, cells, zone }
    }

    /// First non-empty pool along [`FALLBACK_TIERS`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::ExhaustedBoard`] if every cell is already revealed.
    pub fn candidate_pool(&self, store: &StateStore, revealed: &[Cell]) -> Result<CandidatePool> {
        FALLBACK_TIERS
            .iter()
            .map(|&tier| self.tier_candidates(tier, store, revealed))
            .find(|pool| !pool.cells.is_empty())
            .ok_or(Error::ExhaustedBoard {
                revealed: revealed.len(),
            })
    }

    /// Pick the next cell to reveal.
    ///
    /// The only store writes are the last-zone marker and the explore/exploit
    /// counters.
    pub fn select_next(
        &self,
        store: &mut StateStore,
        revealed: &[Cell],
        rng: &mut dyn RandomSource,
    ) -> Result<SelectionResult> {
        let pool = self.candidate_pool(store, revealed)?;
        let epsilon = store.epsilon();

        let (strategy, cell) = if rng.next_unit() < epsilon {
            (Strategy::Explore, pick(rng, &pool.cells))
        } else {
            let ranked = store.values().rank(&pool.cells);
            let top = &ranked[..self.exploit_top_k.min(ranked.len())];
            (Strategy::Exploit, pick(rng, top))
        };

        let zone = pool.zone.unwrap_or_else(|| self.layout.zone_of(cell));
        store.set_last_zone(zone);
        store.record_strategy(strategy);

        if !pool.tier.respects_memory() {
            warn!(
                "Selection widened to tier '{}' ({} revealed, memory constraint dropped)",
                pool.tier,
                revealed.len()
            );
        }

        let value = store.value_estimate(cell);
        debug!(
            "Selected cell {cell} via {strategy} from tier '{}' in {zone} zone (epsilon {epsilon:.4}, value {value:.3})",
            pool.tier
        );

        Ok(SelectionResult {
            cell,
            strategy,
            zone,
            confidence: confidence(value),
            epsilon_at_selection: epsilon,
            value_estimate_at_selection: value,
            tier: pool.tier,
        })
    }
}

fn pick(rng: &mut dyn RandomSource, cells: &[Cell]) -> Cell {
    debug_assert!(!cells.is_empty());
    let index = rng.next_index(cells.len()).min(cells.len() - 1);
    cells[index]
}

fn confidence(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 100.0).round() as u8
}
