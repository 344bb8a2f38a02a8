use crate::db::core::Layout;
use crate::db::indices::ModuleId;
use crate::geom::rtree::SpatialIndex;
use rayon::prelude::*;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct PlacementReport {
    /// Overlapping pairs, lower index first, sorted.
    pub overlaps: Vec<(ModuleId, ModuleId)>,
    pub negative: Vec<ModuleId>,
}

impl PlacementReport {
    pub fn is_legal(&self) -> bool {
        self.overlaps.is_empty() && self.negative.is_empty()
    }
}

/// Reports overlapping modules and negative coordinates.
///
/// Overlap is not forbidden by the cost model, so findings are logged as
/// warnings rather than returned as errors.
pub fn run_placement_check(layout: &Layout) -> PlacementReport {
    log::info!("Starting Placement Verification...");
    let modules = layout.modules();

    let negative: Vec<ModuleId> = modules
        .iter()
        .enumerate()
        .filter(|(_, m)| m.x() < 0 || m.y() < 0)
        .map(|(i, _)| ModuleId::new(i))
        .collect();
    for &id in &negative {
        log::error!("FAIL: Module {} has a negative coordinate.", id.index() + 1);
    }

    let index = SpatialIndex::bulk_load(modules.iter().enumerate().map(|(i, m)| (m.rect(), i)));

    let mut overlaps: Vec<(ModuleId, ModuleId)> = modules
        .par_iter()
        .enumerate()
        .flat_map_iter(|(i, module)| {
            let rect = module.rect();
            index
                .query(rect)
                .into_iter()
                .filter(move |&j| j > i && rect.overlaps(&modules[j].rect()))
                .map(move |j| (ModuleId::new(i), ModuleId::new(j)))
        })
        .collect();
    overlaps.sort();

    if overlaps.is_empty() {
        log::info!("\x1b[32mPASS\x1b[0m: No overlapping modules.");
    } else {
        log::warn!("{} overlapping module pairs", overlaps.len());
        for (a, b) in overlaps.iter().take(10) {
            log::debug!("Overlap: module {} and module {}", a.index() + 1, b.index() + 1);
        }
    }

    PlacementReport { overlaps, negative }
}
