// Uniform bucket grid for broad-phase culling.

use std::collections::HashSet;

use crate::collision::AABB;
use crate::error::{PhysicsError, Result};
use crate::math::Vec2;
use crate::objects::EntityId;

/// Largest accepted `cell_size_log2`.
pub const MAX_CELL_SIZE_LOG2: u32 = 30;

/// Represents a cell in the spatial grid.
#[derive(Debug, Default, Clone)]
struct GridCell {
    entities: Vec<EntityId>,
}

/// A fixed grid of power-of-two sized buckets centred on the world origin.
///
/// Entities are bucketed by the box around their bounding circle. Anything
/// reaching past the border is filed into the border buckets.
#[derive(Debug)]
pub struct SpatialGrid {
    bounds: AABB,
    cell_size_log2: u32,
    inv_cell_size: f64,
    num_cols: usize,
    num_rows: usize,
    cells: Vec<GridCell>, // row-major
    occupied: usize,
}

impl SpatialGrid {
    /// Creates a grid of `columns × rows` cells, each `2^cell_size_log2` wide.
    pub fn new(columns: usize, rows: usize, cell_size_log2: u32) -> Result<Self> {
        if columns == 0 || rows == 0 {
            return Err(PhysicsError::InvalidArgument(format!(
                "grid needs at least one cell, got {}x{}",
                columns, rows
            )));
        }
        if cell_size_log2 > MAX_CELL_SIZE_LOG2 {
            return Err(PhysicsError::InvalidArgument(format!(
                "cell_size_log2 must be at most {}, got {}",
                MAX_CELL_SIZE_LOG2, cell_size_log2
            )));
        }
        let total_cells = columns.checked_mul(rows).ok_or_else(|| {
            PhysicsError::InvalidArgument(format!("grid of {}x{} cells is too large", columns, rows))
        })?;

        let cell_size = (1u64 << cell_size_log2) as f64;
        let half = Vec2::new(columns as f64 * cell_size / 2.0, rows as f64 * cell_size / 2.0);
        let bounds = AABB::new(-half, half);
        log::debug!(
            "creating spatial grid: bounds={:?}, cell_size={}, dims={}x{}, total_cells={}",
            bounds,
            cell_size,
            columns,
            rows,
            total_cells
        );

        Ok(SpatialGrid {
            bounds,
            cell_size_log2,
            inv_cell_size: 1.0 / cell_size,
            num_cols: columns,
            num_rows: rows,
            cells: vec![GridCell::default(); total_cells],
            occupied: 0,
        })
    }

    pub fn bounds(&self) -> AABB {
        self.bounds
    }

    pub fn cell_size(&self) -> f64 {
        (1u64 << self.cell_size_log2) as f64
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.num_cols, self.num_rows)
    }

    /// Number of (cell, entity) entries currently stored.
    pub fn occupied_slots(&self) -> usize {
        self.occupied
    }

    /// Converts world coordinates to grid cell indices (col, row).
    #[inline]
    fn get_cell_indices(&self, point: Vec2) -> (isize, isize) {
        let local_x = point.x - self.bounds.min.x;
        let local_y = point.y - self.bounds.min.y;
        let col = (local_x * self.inv_cell_size).floor() as isize;
        let row = (local_y * self.inv_cell_size).floor() as isize;
        (col, row)
    }

    /// Flat index of a cell, or `None` outside the grid.
    #[inline]
    fn get_cell_index_1d(&self, col: isize, row: isize) -> Option<usize> {
        if col >= 0 && col < self.num_cols as isize && row >= 0 && row < self.num_rows as isize {
            Some(col as usize + row as usize * self.num_cols)
        } else {
            None
        }
    }

    /// Inclusive range of cells overlapped by a box, clamped to the grid.
    fn get_cell_range(&self, aabb: &AABB) -> (isize, isize, isize, isize) {
        let (min_col, min_row) = self.get_cell_indices(aabb.min);
        let (max_col, max_row) = self.get_cell_indices(aabb.max);
        let last_col = self.num_cols as isize - 1;
        let last_row = self.num_rows as isize - 1;
        (
            min_col.clamp(0, last_col),
            min_row.clamp(0, last_row),
            max_col.clamp(0, last_col),
            max_row.clamp(0, last_row),
        )
    }

    /// Empties every bucket.
    pub fn clear(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.entities.clear();
        }
        self.occupied = 0;
    }

    /// Files an entity into every bucket its box overlaps.
    pub fn insert(&mut self, entity: EntityId, aabb: &AABB) {
        let clamped = aabb.clamped_to(&self.bounds);
        let (min_col, min_row, max_col, max_row) = self.get_cell_range(&clamped);

        for row in min_row..=max_row {
            for col in min_col..=max_col {
                if let Some(index) = self.get_cell_index_1d(col, row) {
                    self.cells[index].entities.push(entity);
                    self.occupied += 1;
                }
            }
        }
    }

    /// Files an entity by its bounding circle.
    pub fn insert_circle(&mut self, entity: EntityId, center: Vec2, radius: f64) {
        self.insert(entity, &AABB::around(center, radius));
    }

    /// Entities sharing a bucket with anything, as unordered pairs `(low, high)`.
    ///
    /// A pair spanning several buckets is reported once, in the order its
    /// first shared bucket is reached.
    pub fn query_potential_pairs(&self) -> Vec<(EntityId, EntityId)> {
        let mut seen: HashSet<(EntityId, EntityId)> = HashSet::new();
        let mut pairs = Vec::new();

        for cell in &self.cells {
            let ids = &cell.entities;
            if ids.len() < 2 {
                continue;
            }
            for i in 0..ids.len() {
                for j in (i + 1)..ids.len() {
                    let (a, b) = (ids[i], ids[j]);
                    if a == b {
                        continue;
                    }
                    let pair = if a < b { (a, b) } else { (b, a) };
                    if seen.insert(pair) {
                        pairs.push(pair);
                    }
                }
            }
        }
        pairs
    }
}
