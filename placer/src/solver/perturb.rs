use floorplan_common::db::core::Module;
use rand::Rng;

/// A single neighbourhood move on a module buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Exchange the complete state (size and position) of two slots.
    Swap { a: usize, b: usize },
    /// Shift two modules by the given `(dx, dy)` offsets, clamped at zero.
    Jitter {
        a: usize,
        b: usize,
        offsets: [(i64, i64); 2],
    },
}

impl Move {
    /// Draws a move: both indices first, then the kind, then the offsets.
    /// Indices may coincide. Returns `None` for an empty buffer.
    pub fn propose<R: Rng + ?Sized>(
        rng: &mut R,
        num_modules: usize,
        jitter_range: i64,
    ) -> Option<Self> {
        if num_modules == 0 {
            return None;
        }

        let a = rng.gen_range(0..num_modules);
        let b = rng.gen_range(0..num_modules);

        if rng.gen_bool(0.5) {
            return Some(Move::Swap { a, b });
        }

        let r = jitter_range.max(0);
        let mut offset = || rng.gen_range(-r..=r);
        let offsets = [(offset(), offset()), (offset(), offset())];
        Some(Move::Jitter { a, b, offsets })
    }

    pub fn apply(&self, modules: &mut [Module]) {
        match *self {
            Move::Swap { a, b } => modules.swap(a, b),
            Move::Jitter { a, b, offsets } => {
                for (idx, (dx, dy)) in [(a, offsets[0]), (b, offsets[1])] {
                    let m = &mut modules[idx];
                    m.set_position(m.x() + dx, m.y() + dy);
                }
                for idx in [a, b] {
                    let m = &mut modules[idx];
                    m.set_position(m.x().max(0), m.y().max(0));
                }
            }
        }
    }
}
