use std::fmt;

// Cost of inserting or deleting one heading; the largest possible angular distance
pub const INDEL_COST: f32 = 180f32;

// Width of one printed cell in the matrix dump
const CELL_WIDTH: usize = 12;

/// Smallest rotation, in degrees, between two headings.
///
/// The difference between 340 and 10 is 30, not 330. Any real inputs are
/// accepted; the result is in `0..=180` and does not depend on argument order.
pub fn angular_distance(a: f32, b: f32) -> f32 {
    let diff = (b - a).abs() % 360f32;
    180f32 - (diff - 180f32).abs()
}

/// Edit-distance table between an input and a template direction sequence.
///
/// Rows follow the template, columns follow the input, so a template of
/// length `n` against an input of length `m` gives `n + 1` rows of `m + 1`
/// cells. When either sequence is empty the table collapses to a single cell
/// holding the cost of inserting or deleting everything.
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    rows: Vec<Vec<f32>>,
}

impl CostMatrix {
    pub fn rows(&self) -> &[Vec<f32>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, |row| row.len())
    }

    pub fn get(&self, row: usize, column: usize) -> Option<f32> {
        self.rows.get(row).and_then(|r| r.get(column)).copied()
    }

    /// Total cost of turning the input into the template: the bottom-right cell.
    pub fn final_cost(&self) -> f32 {
        self.rows
            .last()
            .and_then(|row| row.last())
            .copied()
            .unwrap_or(0f32)
    }
}

impl fmt::Display for CostMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (x, row) in self.rows.iter().enumerate() {
            for (y, cost) in row.iter().enumerate() {
                let cell = format!("({},{}){}", x, y, cost);
                write!(f, "{:<width$}, ", cell, width = CELL_WIDTH)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Levenshtein table over headings, with angle-weighted instead of unit costs.
///
/// Insertions and deletions along the borders cost a flat [`INDEL_COST`] each.
/// Inside the table every step (substitution, insertion or deletion) is charged
/// the angular distance between the template heading of its row and the input
/// heading of its column, on top of the cheapest neighbouring cell. A row and
/// column whose headings line up carry the diagonal cost forward unchanged.
pub fn compute_edit_distance_matrix(input: &[f32], template: &[f32]) -> CostMatrix {
    let m = input.len();
    let n = template.len();

    if m == 0 || n == 0 {
        return CostMatrix {
            rows: vec![vec![((m + n) as f32) * INDEL_COST]],
        };
    }

    let mut rows: Vec<Vec<f32>> = Vec::with_capacity(n + 1);
    for x in 0..=n {
        let mut row = vec![0f32; m + 1];
        row[0] = (x as f32) * INDEL_COST;
        rows.push(row);
    }
    for y in 1..=m {
        rows[0][y] = (y as f32) * INDEL_COST;
    }

    for x in 0..n {
        for y in 0..m {
            // Carry-over pairs the input at the row index with the template at the
            // column index; the reference tables for unequal lengths rely on it
            let carries = match (input.get(x), template.get(y)) {
                (Some(i), Some(t)) => i == t,
                _ => false,
            };
            rows[x + 1][y + 1] = if carries {
                rows[x][y]
            } else {
                let above_left = rows[x][y];
                let above = rows[x][y + 1];
                let left = rows[x + 1][y];
                above_left.min(above).min(left) + angular_distance(template[x], input[y])
            };
        }
    }

    let matrix = CostMatrix { rows: rows };
    tracing::trace!(input_len = m, template_len = n, "cost matrix\n{}", matrix);
    matrix
}
