use floorplan_common::db::core::{Layout, Module};
use floorplan_common::db::error::LayoutError;
use floorplan_common::db::indices::ModuleId;
use std::cmp::Reverse;

/// Greedy row ("shelf") packing used as the starting point for annealing.
///
/// Modules are visited largest area first and laid left to right. Once the
/// cursor passes `row_width` the next module opens a new row on top of the
/// tallest module of the current one. The module that crosses the threshold
/// stays in its row, so rows may extend past `row_width`.
pub struct ShelfPacker {
    row_width: i64,
}

impl Default for ShelfPacker {
    fn default() -> Self {
        Self::new(100)
    }
}

impl ShelfPacker {
    pub fn new(row_width: i64) -> Self {
        Self { row_width }
    }

    /// Descending area; equal areas keep their input order.
    pub fn placement_order(modules: &[Module]) -> Vec<ModuleId> {
        let mut order: Vec<usize> = (0..modules.len()).collect();
        order.sort_by_key(|&i| Reverse(modules[i].area()));
        order.into_iter().map(ModuleId::new).collect()
    }

    /// Assigns a position to every module and returns the order they were
    /// placed in. Module indices, and therefore net references, are unchanged.
    pub fn pack(&self, layout: &mut Layout) -> Result<Vec<ModuleId>, LayoutError> {
        let mut modules = layout.modules().to_vec();
        let order = Self::placement_order(&modules);

        let mut cur_x = 0;
        let mut cur_y = 0;
        let mut row_max_height = 0;
        let mut rows = usize::from(!modules.is_empty());

        for &id in &order {
            let module = &mut modules[id.index()];
            if module.width() > self.row_width {
                log::warn!(
                    "Module {} ({}x{}) is wider than the packing row ({})",
                    id.index() + 1,
                    module.width(),
                    module.height(),
                    self.row_width
                );
            }

            module.set_position(cur_x, cur_y);
            cur_x += module.width();
            row_max_height = row_max_height.max(module.height());

            if cur_x > self.row_width {
                cur_x = 0;
                cur_y += row_max_height;
                row_max_height = 0;
                rows += 1;
            }
        }

        layout.set_modules(modules)?;
        log::info!(
            "Initial packing: {} modules, up to {} rows, area {}, wire length {}",
            layout.num_modules(),
            rows,
            layout.area(),
            layout.wire_length()
        );
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floorplan_common::db::core::Net;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn layout_of(dims: &[(i64, i64)]) -> Layout {
        let modules = dims.iter().map(|&(w, h)| Module::new(w, h)).collect();
        Layout::new(modules, Vec::new()).unwrap()
    }

    fn position(layout: &Layout, idx: usize) -> (i64, i64) {
        let m = layout.modules()[idx];
        (m.x(), m.y())
    }

    #[test]
    fn packs_pair_in_one_row() {
        let mut layout = Layout::new(
            vec![Module::new(10, 10), Module::new(20, 20)],
            vec![Net::from_one_based(0, &[1, 2], 2).unwrap()],
        )
        .unwrap();

        let order = ShelfPacker::default().pack(&mut layout).unwrap();

        assert_eq!(order, vec![ModuleId::new(1), ModuleId::new(0)]);
        assert_eq!(position(&layout, 1), (0, 0));
        assert_eq!(position(&layout, 0), (20, 0));
        assert_eq!(layout.area(), 600);
        assert_eq!(layout.wire_length(), 20);
    }

    #[test]
    fn wraps_after_crossing_row_width() {
        let mut layout = layout_of(&[(30, 10), (60, 10), (40, 10), (50, 10)]);
        ShelfPacker::default().pack(&mut layout).unwrap();

        // order: 60, 50, 40, 30 wide
        assert_eq!(position(&layout, 1), (0, 0));
        assert_eq!(position(&layout, 3), (60, 0));
        assert_eq!(position(&layout, 2), (0, 10));
        assert_eq!(position(&layout, 0), (40, 10));
    }

    #[test]
    fn next_row_starts_above_tallest_module() {
        let mut layout = layout_of(&[(90, 5), (20, 12), (10, 3)]);
        ShelfPacker::new(100).pack(&mut layout).unwrap();

        // 90x5 (area 450) then 20x12 (240) overflow the row, 10x3 starts row 2
        assert_eq!(position(&layout, 0), (0, 0));
        assert_eq!(position(&layout, 1), (90, 0));
        assert_eq!(position(&layout, 2), (0, 12));
    }

    #[test]
    fn equal_areas_keep_input_order() {
        let modules = [Module::new(2, 8), Module::new(4, 4), Module::new(8, 2), Module::new(5, 5)];
        let order = ShelfPacker::placement_order(&modules);
        assert_eq!(
            order,
            vec![
                ModuleId::new(3),
                ModuleId::new(0),
                ModuleId::new(1),
                ModuleId::new(2)
            ]
        );
    }

    #[test]
    fn rows_increase_monotonically() {
        let mut rng = StdRng::seed_from_u64(17);
        let dims: Vec<(i64, i64)> = (0..60)
            .map(|_| (rng.gen_range(1..=45), rng.gen_range(1..=45)))
            .collect();
        let mut layout = layout_of(&dims);
        let order = ShelfPacker::default().pack(&mut layout).unwrap();

        assert!(layout.modules().iter().all(|m| m.x() >= 0 && m.y() >= 0));
        for pair in order.windows(2) {
            let prev = layout.module(pair[0]);
            let next = layout.module(pair[1]);
            if next.y() == prev.y() {
                assert_eq!(next.x(), prev.x() + prev.width());
            } else {
                assert!(next.y() > prev.y());
                assert_eq!(next.x(), 0);
                assert!(prev.x() + prev.width() > 100);
            }
        }
    }

    #[test]
    fn dimensions_are_untouched() {
        let dims = [(3, 9), (12, 1), (7, 7)];
        let mut layout = layout_of(&dims);
        ShelfPacker::default().pack(&mut layout).unwrap();
        for (m, &(w, h)) in layout.modules().iter().zip(dims.iter()) {
            assert_eq!((m.width(), m.height()), (w, h));
        }
    }

    #[test]
    fn empty_layout() {
        let mut layout = Layout::default();
        assert!(ShelfPacker::default().pack(&mut layout).unwrap().is_empty());
        assert_eq!(layout.area(), 0);
    }
}
