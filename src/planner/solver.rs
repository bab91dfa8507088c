use std::collections::BTreeMap;
use std::fmt;

use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

use crate::catalog::Catalog;
use crate::models::{Category, DayMenu, NutrientBounds, NutrientTotals};

/// Why no daily menu could be produced.
///
/// This is an expected outcome of a search, not a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Infeasibility {
    /// The catalog has no candidates for a category.
    MissingCategory(Category),
    /// Some bound has min > max, so no total can satisfy it.
    DegenerateBounds,
    /// Every branch of the pruned search tree failed.
    SearchExhausted,
}

impl fmt::Display for Infeasibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Infeasibility::MissingCategory(c) => write!(f, "no {} dishes available", c),
            Infeasibility::DegenerateBounds => f.write_str("a nutrient bound has min > max"),
            Infeasibility::SearchExhausted => {
                f.write_str("no dish combination satisfies the nutrient bounds")
            }
        }
    }
}

/// Order in which candidate dishes are tried for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueOrdering {
    /// Fresh shuffle per search node; reruns may give different menus.
    #[default]
    Shuffled,
    /// Catalog order; the search is fully deterministic.
    CatalogOrder,
}

/// Counters collected during one backtracking search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: usize,
    pub backtracks: usize,
    pub pruned: usize,
}

/// Candidate indices into the catalog for each unassigned category.
///
/// An assigned category has no entry, so the map doubles as the set of
/// variables still open.
#[derive(Debug, Clone)]
struct Domains {
    candidates: BTreeMap<Category, Vec<usize>>,
}

impl Domains {
    fn full(catalog: &Catalog) -> Self {
        let candidates = Category::ALL
            .into_iter()
            .map(|c| (c, (0..catalog.dishes(c).len()).collect()))
            .collect();
        Self { candidates }
    }

    /// Unassigned category with the fewest candidates (first on ties).
    fn most_constrained(&self) -> Option<Category> {
        self.candidates
            .iter()
            .min_by_key(|(_, values)| values.len())
            .map(|(category, _)| *category)
    }

    /// Close a category, handing back its remaining candidates.
    fn take(&mut self, category: Category) -> Vec<usize> {
        self.candidates.remove(&category).unwrap_or_default()
    }

    /// Drop every candidate whose addition would push a nutrient over its max.
    fn prune(
        &mut self,
        catalog: &Catalog,
        bounds: &NutrientBounds,
        totals: &NutrientTotals,
    ) -> usize {
        let mut removed = 0;
        for (category, values) in self.candidates.iter_mut() {
            let dishes = catalog.dishes(*category);
            let before = values.len();
            values.retain(|&i| !bounds.exceeds_max(&totals.with(&dishes[i])));
            removed += before - values.len();
        }
        removed
    }
}

/// Depth-first backtracking over the three meal slots.
struct Search<'a, R: Rng + ?Sized> {
    catalog: &'a Catalog,
    bounds: &'a NutrientBounds,
    ordering: ValueOrdering,
    rng: &'a mut R,
    stats: SearchStats,
}

impl<R: Rng + ?Sized> Search<'_, R> {
    fn backtrack(&mut self, menu: &mut DayMenu, domains: &mut Domains) -> bool {
        self.stats.nodes += 1;

        if menu.is_complete() {
            return menu.is_solution(self.bounds);
        }

        let Some(category) = domains.most_constrained() else {
            return false;
        };

        let mut values = domains.take(category);
        if self.ordering == ValueOrdering::Shuffled {
            values.shuffle(&mut *self.rng);
        }

        let dishes = self.catalog.dishes(category);
        for index in values {
            let snapshot = (menu.clone(), domains.clone());

            menu.assign(dishes[index].clone());
            self.stats.pruned += domains.prune(self.catalog, self.bounds, menu.totals());

            if self.backtrack(menu, domains) {
                return true;
            }

            self.stats.backtracks += 1;
            (*menu, *domains) = snapshot;
        }

        false
    }
}

/// Find one menu satisfying the bounds, with search counters.
pub fn solve_day_with_stats<R: Rng + ?Sized>(
    bounds: &NutrientBounds,
    catalog: &Catalog,
    ordering: ValueOrdering,
    rng: &mut R,
) -> (Result<DayMenu, Infeasibility>, SearchStats) {
    if let Some(category) = catalog.missing_category() {
        return (
            Err(Infeasibility::MissingCategory(category)),
            SearchStats::default(),
        );
    }
    if bounds.is_degenerate() {
        return (Err(Infeasibility::DegenerateBounds), SearchStats::default());
    }

    let mut menu = DayMenu::new();
    let mut domains = Domains::full(catalog);
    let initially_pruned = domains.prune(catalog, bounds, menu.totals());

    let mut search = Search {
        catalog,
        bounds,
        ordering,
        rng,
        stats: SearchStats {
            pruned: initially_pruned,
            ..SearchStats::default()
        },
    };

    let found = search.backtrack(&mut menu, &mut domains);
    let stats = search.stats;

    debug!(
        "day search: found={} nodes={} backtracks={} pruned={}",
        found, stats.nodes, stats.backtracks, stats.pruned
    );

    if found {
        (Ok(menu), stats)
    } else {
        (Err(Infeasibility::SearchExhausted), stats)
    }
}

/// Find one menu with a breakfast, lunch and dinner satisfying the bounds.
///
/// The catalog is read-only here; every call starts from its full candidate
/// lists, so no pruning leaks between calls.
pub fn solve_day<R: Rng + ?Sized>(
    bounds: &NutrientBounds,
    catalog: &Catalog,
    ordering: ValueOrdering,
    rng: &mut R,
) -> Result<DayMenu, Infeasibility> {
    solve_day_with_stats(bounds, catalog, ordering, rng).0
}
