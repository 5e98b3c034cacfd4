use std::rc::Rc;

use rand::Rng;

use super::error::GridError;
use super::item::DataItem;
use super::types::CellPosition;

/// Rows of shared items, outer index is the row.
pub type ItemGrid = Vec<Vec<Rc<DataItem>>>;

/// Rectangular storage of the grid's items.
#[derive(Debug, Default)]
pub struct GridModel {
    rows: ItemGrid,
}

impl GridModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// A `rows` x `columns` grid of fresh items all holding `initial`.
    pub fn filled(rows: usize, columns: usize, initial: &str) -> Self {
        let rows = (0..rows)
            .map(|_| (0..columns).map(|_| DataItem::shared(initial)).collect())
            .collect();
        Self { rows }
    }

    /// Swaps in `grid` as a whole. A non-rectangular grid is rejected and the
    /// current contents are kept.
    pub fn replace_all(&mut self, grid: ItemGrid) -> Result<(), GridError> {
        if let Some(first) = grid.first() {
            let expected = first.len();
            if let Some((row, actual)) = grid
                .iter()
                .map(Vec::len)
                .enumerate()
                .find(|(_, len)| *len != expected)
            {
                return Err(GridError::InvalidShape {
                    row,
                    expected,
                    actual,
                });
            }
        }
        self.rows = grid;
        Ok(())
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> Result<usize, GridError> {
        self.rows
            .first()
            .map(Vec::len)
            .ok_or(GridError::EmptyGrid)
    }

    /// True when there is no cell at all (zero rows or zero columns).
    pub fn is_empty(&self) -> bool {
        self.rows.first().is_none_or(Vec::is_empty)
    }

    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn at(&self, row: usize, col: usize) -> Result<&Rc<DataItem>, GridError> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .ok_or_else(|| GridError::IndexOutOfRange {
                row,
                col,
                rows: self.row_count(),
                columns: self.column_count().unwrap_or(0),
            })
    }

    pub fn at_position(&self, position: CellPosition) -> Result<&Rc<DataItem>, GridError> {
        self.at(position.row, position.col)
    }

    /// Picks a row uniformly, then a column uniformly within it.
    pub fn random_item<R>(&self, rng: &mut R) -> Result<(CellPosition, &Rc<DataItem>), GridError>
    where
        R: Rng + ?Sized,
    {
        if self.is_empty() {
            return Err(GridError::EmptyGrid);
        }
        let row = rng.random_range(0..self.rows.len());
        let cells = &self.rows[row];
        let col = rng.random_range(0..cells.len());
        Ok((CellPosition::new(row, col), &cells[col]))
    }

    pub fn items(&self) -> impl Iterator<Item = (CellPosition, &Rc<DataItem>)> {
        self.rows.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(col, item)| (CellPosition::new(row, col), item))
        })
    }

    /// Sum of observer registrations across every item.
    pub fn observer_count(&self) -> usize {
        self.items().map(|(_, item)| item.observer_count()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn row(values: &[&str]) -> Vec<Rc<DataItem>> {
        values.iter().map(|value| DataItem::shared(*value)).collect()
    }

    #[test]
    fn test_new_grid_is_empty() {
        let grid = GridModel::new();
        assert_eq!(grid.row_count(), 0);
        assert_eq!(grid.column_count(), Err(GridError::EmptyGrid));
        assert!(grid.is_empty());
    }

    #[test]
    fn test_filled_grid_dimensions() {
        let grid = GridModel::filled(4, 100, "0");
        assert_eq!(grid.row_count(), 4);
        assert_eq!(grid.column_count(), Ok(100));
        assert_eq!(grid.cell_count(), 400);
        assert!(grid.items().all(|(_, item)| item.value() == "0"));
    }

    #[test]
    fn test_filled_items_are_distinct() {
        let grid = GridModel::filled(2, 2, "0");
        grid.at(0, 0).unwrap().set_value("x");
        assert_eq!(grid.at(0, 1).unwrap().value(), "0");
        assert_eq!(grid.at(1, 0).unwrap().value(), "0");
    }

    #[test]
    fn test_replace_all_swaps_contents() {
        let mut grid = GridModel::filled(1, 1, "old");
        grid.replace_all(vec![row(&["a", "b"]), row(&["c", "d"])])
            .unwrap();

        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.column_count(), Ok(2));
        assert_eq!(grid.at(1, 0).unwrap().value(), "c");
    }

    #[test]
    fn test_replace_all_rejects_ragged_rows_and_keeps_state() {
        let mut grid = GridModel::filled(2, 3, "keep");

        let err = grid
            .replace_all(vec![row(&["a", "b"]), row(&["c"]), row(&["d", "e"])])
            .unwrap_err();

        assert_eq!(
            err,
            GridError::InvalidShape {
                row: 1,
                expected: 2,
                actual: 1
            }
        );
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.column_count(), Ok(3));
        assert_eq!(grid.at(1, 2).unwrap().value(), "keep");
    }

    #[test]
    fn test_replace_all_accepts_empty_grid() {
        let mut grid = GridModel::filled(2, 2, "0");
        grid.replace_all(Vec::new()).unwrap();
        assert!(grid.is_empty());
    }

    #[test]
    fn test_at_out_of_range() {
        let grid = GridModel::filled(4, 100, "0");
        assert_eq!(
            grid.at(4, 0).unwrap_err(),
            GridError::IndexOutOfRange {
                row: 4,
                col: 0,
                rows: 4,
                columns: 100
            }
        );
        assert!(grid.at(0, 100).is_err());
        assert!(GridModel::new().at(0, 0).is_err());
    }

    #[test]
    fn test_random_item_on_empty_grid() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            GridModel::new().random_item(&mut rng).unwrap_err(),
            GridError::EmptyGrid
        );

        let mut zero_columns = GridModel::new();
        zero_columns.replace_all(vec![Vec::new(), Vec::new()]).unwrap();
        assert_eq!(
            zero_columns.random_item(&mut rng).unwrap_err(),
            GridError::EmptyGrid
        );
    }

    #[test]
    fn test_random_item_returns_item_at_reported_position() {
        let grid = GridModel::filled(3, 4, "0");
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let (position, item) = grid.random_item(&mut rng).unwrap();
            assert!(Rc::ptr_eq(item, grid.at_position(position).unwrap()));
        }
    }

    #[test]
    fn test_random_item_reaches_every_cell() {
        let grid = GridModel::filled(3, 3, "0");
        let mut rng = StdRng::seed_from_u64(42);
        let seen: HashSet<CellPosition> = (0..500)
            .map(|_| grid.random_item(&mut rng).unwrap().0)
            .collect();
        assert_eq!(seen.len(), 9);
    }

    #[test]
    fn test_observer_count_sums_items() {
        let grid = GridModel::filled(2, 2, "0");
        grid.at(0, 0).unwrap().subscribe(|_, _| {});
        grid.at(1, 1).unwrap().subscribe(|_, _| {});
        grid.at(1, 1).unwrap().subscribe(|_, _| {});
        assert_eq!(grid.observer_count(), 3);
    }
}
