use crate::db::error::LayoutError;
use crate::db::indices::*;
use crate::geom::point::Point;
use crate::geom::rect::Rect;

/// Largest accepted width or height. Keeps `width * height` and coordinate
/// sums well inside `i64`.
pub const MAX_DIMENSION: i64 = i32::MAX as i64;

/// A fixed-size rectangle with a mutable lower-left position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Module {
    width: i64,
    height: i64,
    x: i64,
    y: i64,
}

impl Module {
    /// Creates an unplaced module sitting at the origin.
    pub fn new(width: i64, height: i64) -> Self {
        Self {
            width,
            height,
            x: 0,
            y: 0,
        }
    }

    pub fn placed(width: i64, height: i64, x: i64, y: i64) -> Self {
        Self {
            width,
            height,
            x,
            y,
        }
    }

    pub fn width(&self) -> i64 {
        self.width
    }
    pub fn height(&self) -> i64 {
        self.height
    }
    pub fn x(&self) -> i64 {
        self.x
    }
    pub fn y(&self) -> i64 {
        self.y
    }

    pub fn set_position(&mut self, x: i64, y: i64) {
        self.x = x;
        self.y = y;
    }

    pub fn area(&self) -> i64 {
        self.width * self.height
    }

    /// Pin location used for wire length, rounded down to the grid.
    #[inline]
    pub fn center(&self) -> Point<i64> {
        Point::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(
            Point::new(self.x, self.y),
            Point::new(self.x + self.width, self.y + self.height),
        )
    }
}

/// A hyperedge: the first pin drives, the rest are sinks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Net {
    pins: Vec<ModuleId>,
}

impl Net {
    pub fn new(pins: Vec<ModuleId>) -> Self {
        Self { pins }
    }

    /// Translates 1-based module indices as they appear in a connection file.
    /// `net` is the 0-based position of this net, used for error reporting.
    pub fn from_one_based(
        net: usize,
        indices: &[usize],
        module_count: usize,
    ) -> Result<Self, LayoutError> {
        let pins = indices
            .iter()
            .map(|&idx| {
                if idx == 0 || idx > module_count {
                    Err(LayoutError::UnknownModule {
                        net: net + 1,
                        module: idx,
                        count: module_count,
                    })
                } else {
                    Ok(ModuleId::new(idx - 1))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { pins })
    }

    pub fn pins(&self) -> &[ModuleId] {
        &self.pins
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    pub fn driver(&self) -> Option<ModuleId> {
        self.pins.first().copied()
    }

    pub fn sinks(&self) -> &[ModuleId] {
        self.pins.get(1..).unwrap_or(&[])
    }
}

/// Bounding-box area of a module set anchored at the origin. Saturates at
/// `i64::MAX` for extremely spread out placements.
pub fn bounding_area(modules: &[Module]) -> i64 {
    let mut max_x: i64 = 0;
    let mut max_y: i64 = 0;
    for module in modules {
        max_x = max_x.max(module.x + module.width);
        max_y = max_y.max(module.y + module.height);
    }
    max_x.saturating_mul(max_y)
}

/// Driver-to-sink Manhattan distance summed over every net.
///
/// `nets` must only reference indices inside `modules`; [`Layout`] guarantees
/// this for its own nets and any module buffer of the same length.
pub fn total_wire_length(modules: &[Module], nets: &[Net]) -> i64 {
    let mut total = 0;
    for net in nets {
        let Some(driver) = net.driver() else {
            continue;
        };
        let source = modules[driver.index()].center();
        for sink in net.sinks() {
            total = source
                .manhattan(&modules[sink.index()].center())
                .saturating_add(total);
        }
    }
    total
}

/// The module set together with the connection hypergraph.
#[derive(Clone, Debug, Default)]
pub struct Layout {
    modules: Vec<Module>,
    nets: Vec<Net>,
}

impl Layout {
    pub fn new(modules: Vec<Module>, nets: Vec<Net>) -> Result<Self, LayoutError> {
        let valid = 1..=MAX_DIMENSION;
        for (i, module) in modules.iter().enumerate() {
            if !valid.contains(&module.width) || !valid.contains(&module.height) {
                return Err(LayoutError::InvalidDimensions {
                    module: i + 1,
                    width: module.width,
                    height: module.height,
                });
            }
        }

        let count = modules.len();
        for (n, net) in nets.iter().enumerate() {
            if let Some(bad) = net.pins.iter().find(|pin| pin.index() >= count) {
                return Err(LayoutError::UnknownModule {
                    net: n + 1,
                    module: bad.index() + 1,
                    count,
                });
            }
        }

        Ok(Self { modules, nets })
    }

    pub fn num_modules(&self) -> usize {
        self.modules.len()
    }
    pub fn num_nets(&self) -> usize {
        self.nets.len()
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn nets(&self) -> &[Net] {
        &self.nets
    }

    pub fn module(&self, id: ModuleId) -> &Module {
        &self.modules[id.index()]
    }

    /// Replaces every module at once. The count is fixed for the lifetime of
    /// the layout.
    pub fn set_modules(&mut self, modules: Vec<Module>) -> Result<(), LayoutError> {
        if modules.len() != self.modules.len() {
            return Err(LayoutError::CardinalityMismatch {
                expected: self.modules.len(),
                found: modules.len(),
            });
        }
        self.modules = modules;
        Ok(())
    }

    pub fn area(&self) -> i64 {
        bounding_area(&self.modules)
    }

    pub fn wire_length(&self) -> i64 {
        total_wire_length(&self.modules, &self.nets)
    }
}
