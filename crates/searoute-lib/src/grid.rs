//! Navigation grid: the static navigable surface.
//!
//! The grid owns a water mask and a hazard classification, both immutable
//! once constructed. Cells are addressed by column/row into flat arrays and
//! never individually allocated.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default edge length of one grid cell in kilometres.
pub const DEFAULT_CELL_SIZE_KM: f64 = 10.0;

/// The eight king-move neighbour offsets: orthogonals first, then diagonals.
const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (0, 1),
    (1, 0),
    (0, -1),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// A single cell of the navigation grid, addressed by column and row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another cell in cell units.
    pub fn distance_cells(&self, other: &Cell) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        (dx * dx + dy * dy).sqrt()
    }

    /// Heading towards another cell in degrees within `[0, 360)`, measured
    /// counter-clockwise from the positive x axis.
    pub fn heading_deg_to(&self, other: &Cell) -> f64 {
        let dx = f64::from(other.x - self.x);
        let dy = f64::from(other.y - self.y);
        dy.atan2(dx).to_degrees().rem_euclid(360.0)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Classification for charted hazard areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardKind {
    /// Piracy activity: traversable at a risk premium.
    Pirate,
    /// Military exclusion: absolute no-go.
    Military,
    /// Shallow water: traversable at a risk premium.
    Shallow,
}

/// Rectangular land region, inclusive of both corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandRegion {
    pub x_start: i32,
    pub y_start: i32,
    pub x_end: i32,
    pub y_end: i32,
}

/// Circular island centred on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Island {
    pub center: Cell,
    pub radius: i32,
}

/// Obstacle layout applied at grid construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstacleSpec {
    pub islands: Vec<Island>,
    pub land_regions: Vec<LandRegion>,
}

/// Circular hazard zone applied at grid construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSpec {
    pub center: Cell,
    pub radius: i32,
    pub kind: HazardKind,
}

/// Immutable navigable surface: dimensions, water mask and hazard zones.
#[derive(Debug, Clone)]
pub struct Grid {
    width: i32,
    height: i32,
    cell_size_km: f64,
    water: Vec<bool>,
    zones: Vec<Option<HazardKind>>,
}

impl Grid {
    /// Build a grid from its dimensions, obstacle layout and hazard zones.
    ///
    /// Fails with [`Error::InvalidConfiguration`] when a dimension is not
    /// positive or a spec references an out-of-bounds centre or corner.
    /// Radii may spill past the border and are clipped.
    pub fn new(
        width: i32,
        height: i32,
        obstacles: &ObstacleSpec,
        zones: &[ZoneSpec],
    ) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(Error::InvalidConfiguration {
                message: format!("grid dimensions must be positive, got {width}x{height}"),
            });
        }

        let cells = (width as usize) * (height as usize);
        let mut grid = Self {
            width,
            height,
            cell_size_km: DEFAULT_CELL_SIZE_KM,
            water: vec![true; cells],
            zones: vec![None; cells],
        };

        for region in &obstacles.land_regions {
            grid.require_region(region)?;
            for y in region.y_start..=region.y_end {
                for x in region.x_start..=region.x_end {
                    let index = grid.index(Cell::new(x, y));
                    grid.water[index] = false;
                }
            }
        }

        for island in &obstacles.islands {
            grid.require_circle(island.center, island.radius)?;
            grid.paint_circle(island.center, island.radius, |grid, index| {
                grid.water[index] = false;
            });
        }

        for zone in zones {
            grid.require_circle(zone.center, zone.radius)?;
            let kind = zone.kind;
            grid.paint_circle(zone.center, zone.radius, |grid, index| {
                grid.zones[index] = Some(kind);
            });
        }

        Ok(grid)
    }

    /// Override the default cell size.
    pub fn with_cell_size(mut self, cell_size_km: f64) -> Result<Self> {
        if !cell_size_km.is_finite() || cell_size_km <= 0.0 {
            return Err(Error::InvalidConfiguration {
                message: format!("cell size must be finite and positive, got {cell_size_km}"),
            });
        }
        self.cell_size_km = cell_size_km;
        Ok(self)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn cell_size_km(&self) -> f64 {
        self.cell_size_km
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.width && cell.y >= 0 && cell.y < self.height
    }

    /// Whether the cell is open water (in-bounds and free of land).
    pub fn is_water(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && self.water[self.index(cell)]
    }

    /// Hazard classification of a cell; `None` for unclassified water or land.
    pub fn zone_of(&self, cell: Cell) -> Option<HazardKind> {
        if self.in_bounds(cell) {
            self.zones[self.index(cell)]
        } else {
            None
        }
    }

    /// A cell is navigable when it lies in-bounds, is water, and is not a
    /// military exclusion zone. Military cells are rejected here, once, and
    /// never re-checked by individual strategies.
    pub fn is_navigable(&self, cell: Cell) -> bool {
        self.is_water(cell) && self.zone_of(cell) != Some(HazardKind::Military)
    }

    /// The navigable cells among the eight grid-adjacent neighbours.
    pub fn neighbors(&self, cell: Cell) -> Vec<Cell> {
        NEIGHBOR_OFFSETS
            .iter()
            .map(|&(dx, dy)| Cell::new(cell.x + dx, cell.y + dy))
            .filter(|&next| self.is_navigable(next))
            .collect()
    }

    /// Euclidean distance between two cells in kilometres. Orthogonal moves
    /// cost one cell size, diagonal moves √2 of it.
    pub fn distance_km(&self, a: Cell, b: Cell) -> f64 {
        a.distance_cells(&b) * self.cell_size_km
    }

    fn index(&self, cell: Cell) -> usize {
        (cell.y * self.width + cell.x) as usize
    }

    fn require_region(&self, region: &LandRegion) -> Result<()> {
        let corners = [
            Cell::new(region.x_start, region.y_start),
            Cell::new(region.x_end, region.y_end),
        ];
        for corner in corners {
            if !self.in_bounds(corner) {
                return Err(Error::InvalidConfiguration {
                    message: format!("land region references out-of-bounds cell {corner}"),
                });
            }
        }
        if region.x_start > region.x_end || region.y_start > region.y_end {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "land region corners are inverted: ({}, {}) to ({}, {})",
                    region.x_start, region.y_start, region.x_end, region.y_end
                ),
            });
        }
        Ok(())
    }

    fn require_circle(&self, center: Cell, radius: i32) -> Result<()> {
        if !self.in_bounds(center) {
            return Err(Error::InvalidConfiguration {
                message: format!("circular spec references out-of-bounds centre {center}"),
            });
        }
        if radius < 0 {
            return Err(Error::InvalidConfiguration {
                message: format!("circular spec has negative radius {radius}"),
            });
        }
        Ok(())
    }

    fn paint_circle<F>(&mut self, center: Cell, radius: i32, mut apply: F)
    where
        F: FnMut(&mut Self, usize),
    {
        let radius_sq = radius * radius;
        for y in (center.y - radius).max(0)..=(center.y + radius).min(self.height - 1) {
            for x in (center.x - radius).max(0)..=(center.x + radius).min(self.width - 1) {
                let dx = x - center.x;
                let dy = y - center.y;
                if dx * dx + dy * dy <= radius_sq {
                    let index = self.index(Cell::new(x, y));
                    apply(self, index);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_dimensions() {
        let result = Grid::new(0, 10, &ObstacleSpec::default(), &[]);
        assert!(matches!(
            result,
            Err(Error::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn rejects_out_of_bounds_island() {
        let obstacles = ObstacleSpec {
            islands: vec![Island {
                center: Cell::new(20, 5),
                radius: 2,
            }],
            land_regions: Vec::new(),
        };
        let result = Grid::new(10, 10, &obstacles, &[]);
        assert!(matches!(
            result,
            Err(Error::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn island_marks_cells_within_radius() {
        let obstacles = ObstacleSpec {
            islands: vec![Island {
                center: Cell::new(10, 10),
                radius: 3,
            }],
            land_regions: Vec::new(),
        };
        let grid = Grid::new(20, 20, &obstacles, &[]).unwrap();

        assert!(!grid.is_water(Cell::new(10, 10)));
        assert!(!grid.is_water(Cell::new(10, 13)));
        assert!(grid.is_water(Cell::new(10, 15)));
    }

    #[test]
    fn land_region_is_inclusive() {
        let obstacles = ObstacleSpec {
            islands: Vec::new(),
            land_regions: vec![LandRegion {
                x_start: 2,
                y_start: 2,
                x_end: 4,
                y_end: 4,
            }],
        };
        let grid = Grid::new(10, 10, &obstacles, &[]).unwrap();

        assert!(!grid.is_water(Cell::new(2, 2)));
        assert!(!grid.is_water(Cell::new(4, 4)));
        assert!(grid.is_water(Cell::new(5, 4)));
    }

    #[test]
    fn military_zone_is_not_navigable() {
        let zones = [ZoneSpec {
            center: Cell::new(5, 5),
            radius: 1,
            kind: HazardKind::Military,
        }];
        let grid = Grid::new(10, 10, &ObstacleSpec::default(), &zones).unwrap();

        assert!(grid.is_water(Cell::new(5, 5)));
        assert!(!grid.is_navigable(Cell::new(5, 5)));
        assert_eq!(grid.zone_of(Cell::new(5, 5)), Some(HazardKind::Military));
    }

    #[test]
    fn pirate_and_shallow_zones_stay_navigable() {
        let zones = [
            ZoneSpec {
                center: Cell::new(2, 2),
                radius: 0,
                kind: HazardKind::Pirate,
            },
            ZoneSpec {
                center: Cell::new(7, 7),
                radius: 0,
                kind: HazardKind::Shallow,
            },
        ];
        let grid = Grid::new(10, 10, &ObstacleSpec::default(), &zones).unwrap();

        assert!(grid.is_navigable(Cell::new(2, 2)));
        assert!(grid.is_navigable(Cell::new(7, 7)));
        assert_eq!(grid.zone_of(Cell::new(2, 2)), Some(HazardKind::Pirate));
        assert_eq!(grid.zone_of(Cell::new(7, 7)), Some(HazardKind::Shallow));
    }

    #[test]
    fn neighbor_counts_respect_bounds() {
        let grid = Grid::new(10, 10, &ObstacleSpec::default(), &[]).unwrap();

        assert_eq!(grid.neighbors(Cell::new(5, 5)).len(), 8);
        assert_eq!(grid.neighbors(Cell::new(0, 0)).len(), 3);
        assert_eq!(grid.neighbors(Cell::new(0, 5)).len(), 5);
    }

    #[test]
    fn distance_scales_with_cell_size() {
        let grid = Grid::new(10, 10, &ObstacleSpec::default(), &[]).unwrap();

        let distance = grid.distance_km(Cell::new(0, 0), Cell::new(3, 4));
        assert!((distance - 50.0).abs() < 1e-9);

        let diagonal = grid.distance_km(Cell::new(0, 0), Cell::new(1, 1));
        assert!((diagonal - DEFAULT_CELL_SIZE_KM * std::f64::consts::SQRT_2).abs() < 1e-9);
    }

    #[test]
    fn heading_covers_all_quadrants() {
        let origin = Cell::new(5, 5);
        assert!((origin.heading_deg_to(&Cell::new(6, 5)) - 0.0).abs() < 1e-9);
        assert!((origin.heading_deg_to(&Cell::new(5, 6)) - 90.0).abs() < 1e-9);
        assert!((origin.heading_deg_to(&Cell::new(4, 5)) - 180.0).abs() < 1e-9);
        assert!((origin.heading_deg_to(&Cell::new(5, 4)) - 270.0).abs() < 1e-9);
    }
}
