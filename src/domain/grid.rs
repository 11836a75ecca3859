// Subplot grid - Places heterogeneous cells into paper coordinates
use super::error::GridError;

/// What a cell can hold: domain-positioned traces (gauges) or a Cartesian axis pair (bars)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Domain,
    Xy,
}

impl CellKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CellKind::Domain => "domain",
            CellKind::Xy => "xy",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSpec {
    pub kind: CellKind,
    pub colspan: usize,
}

impl CellSpec {
    pub fn domain() -> Self {
        Self {
            kind: CellKind::Domain,
            colspan: 1,
        }
    }

    pub fn xy() -> Self {
        Self {
            kind: CellKind::Xy,
            colspan: 1,
        }
    }

    pub fn with_colspan(self, colspan: usize) -> Self {
        Self {
            colspan: colspan.max(1),
            ..self
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridOptions {
    /// Relative heights, top row first. Equal heights when `None`.
    pub row_heights: Option<Vec<f64>>,
    pub vertical_spacing: f64,
    /// Defaults to `0.2 / cols`.
    pub horizontal_spacing: Option<f64>,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            row_heights: None,
            vertical_spacing: 0.3,
            horizontal_spacing: None,
        }
    }
}

/// A cell with its resolved position. `row`/`col` are 1-based.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedCell {
    pub kind: CellKind,
    pub row: usize,
    pub col: usize,
    pub colspan: usize,
    pub x: [f64; 2],
    pub y: [f64; 2],
    /// Axis pair number for `Xy` cells, counted row-major from 1
    pub axis: Option<usize>,
}

impl PlacedCell {
    pub fn x_axis_ref(&self) -> Option<String> {
        self.axis.map(|n| axis_ref("x", n))
    }

    pub fn y_axis_ref(&self) -> Option<String> {
        self.axis.map(|n| axis_ref("y", n))
    }
}

fn axis_ref(letter: &str, n: usize) -> String {
    if n == 1 {
        letter.to_string()
    } else {
        format!("{}{}", letter, n)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Slot {
    Empty,
    Cell(PlacedCell),
    Covered { row: usize, col: usize },
}

/// Rows × columns of cells, row 1 at the top of the figure
#[derive(Debug, Clone, PartialEq)]
pub struct FigureLayout {
    rows: usize,
    cols: usize,
    slots: Vec<Vec<Slot>>,
}

impl FigureLayout {
    pub fn new(specs: Vec<Vec<Option<CellSpec>>>, options: &GridOptions) -> Result<Self, GridError> {
        let rows = specs.len();
        let cols = specs.first().map(|r| r.len()).unwrap_or(0);
        if rows == 0 || cols == 0 {
            return Err(GridError::EmptyGrid);
        }

        for (r, row) in specs.iter().enumerate() {
            if row.len() != cols {
                return Err(GridError::RaggedRow {
                    row: r + 1,
                    found: row.len(),
                    expected: cols,
                });
            }
        }

        let row_heights = match &options.row_heights {
            Some(heights) if heights.len() != rows => {
                return Err(GridError::RowHeights {
                    expected: rows,
                    found: heights.len(),
                });
            }
            Some(heights) => heights.clone(),
            None => vec![1.0; rows],
        };

        let hs = options.horizontal_spacing.unwrap_or(0.2 / cols as f64);
        let vs = options.vertical_spacing;
        let width = (1.0 - hs * (cols - 1) as f64) / cols as f64;

        let usable = 1.0 - vs * (rows - 1) as f64;
        let total: f64 = row_heights.iter().sum();
        let heights: Vec<f64> = row_heights.iter().map(|h| h / total * usable).collect();

        // Stack from the bottom up so row 1 ends at the top edge.
        let mut y_domains = vec![[0.0, 0.0]; rows];
        let mut bottom = 0.0;
        for r in (0..rows).rev() {
            y_domains[r] = [bottom, bottom + heights[r]];
            bottom += heights[r] + vs;
        }

        let mut slots = vec![vec![Slot::Empty; cols]; rows];
        let mut next_axis = 1;
        for (r, row) in specs.into_iter().enumerate() {
            for (c, spec) in row.into_iter().enumerate() {
                let Some(spec) = spec else { continue };

                if matches!(slots[r][c], Slot::Covered { .. }) {
                    return Err(GridError::CoveredCell {
                        row: r + 1,
                        col: c + 1,
                    });
                }
                if c + spec.colspan > cols {
                    return Err(GridError::SpanOverflow {
                        row: r + 1,
                        col: c + 1,
                    });
                }

                let axis = match spec.kind {
                    CellKind::Xy => {
                        next_axis += 1;
                        Some(next_axis - 1)
                    }
                    CellKind::Domain => None,
                };

                let x_start = c as f64 * (width + hs);
                let x_end = (c + spec.colspan - 1) as f64 * (width + hs) + width;

                slots[r][c] = Slot::Cell(PlacedCell {
                    kind: spec.kind,
                    row: r + 1,
                    col: c + 1,
                    colspan: spec.colspan,
                    x: [x_start, x_end],
                    y: y_domains[r],
                    axis,
                });
                for covered in slots[r].iter_mut().skip(c + 1).take(spec.colspan - 1) {
                    *covered = Slot::Covered {
                        row: r + 1,
                        col: c + 1,
                    };
                }
            }
        }

        Ok(Self { rows, cols, slots })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell(&self, row: usize, col: usize) -> Result<&PlacedCell, GridError> {
        let slot = row
            .checked_sub(1)
            .zip(col.checked_sub(1))
            .and_then(|(r, c)| self.slots.get(r).and_then(|cells| cells.get(c)));

        match slot {
            Some(Slot::Cell(cell)) => Ok(cell),
            Some(Slot::Covered { .. }) => Err(GridError::CoveredCell { row, col }),
            Some(Slot::Empty) | None => Err(GridError::NoSuchCell { row, col }),
        }
    }

    /// Occupied cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = &PlacedCell> {
        self.slots.iter().flatten().filter_map(|slot| match slot {
            Slot::Cell(cell) => Some(cell),
            _ => None,
        })
    }
}
