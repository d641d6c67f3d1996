//! Console rendering of rows as a bordered grid.
//!
//! ```text
//! +----+-------+
//! |uuid|message|
//! +----+-------+
//! |   4|   null|
//! +----+-------+
//! ```

use crate::query::executor::error::ExecutionError;
use crate::query::executor::result_set::ResultSet;
use crate::types::column_value::ColumnValue;

const MINIMUM_COLUMN_WIDTH: usize = 3;
const TRUNCATE_AT: usize = 20;
const ELLIPSIS: &str = "...";

/// How many rows to render and whether long cells are cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowOptions {
    pub num_rows: usize,
    /// Cut cells longer than 20 characters and right-align every cell.
    pub truncate: bool,
}

impl Default for ShowOptions {
    fn default() -> Self {
        Self {
            num_rows: 20,
            truncate: true,
        }
    }
}

impl ShowOptions {
    pub fn untruncated(num_rows: usize) -> Self {
        Self {
            num_rows,
            truncate: false,
        }
    }
}

pub(crate) struct TableFormatter {
    headers: Vec<String>,
    options: ShowOptions,
}

impl TableFormatter {
    pub(crate) fn new(column_names: Vec<&str>, options: ShowOptions) -> Self {
        Self {
            headers: column_names.into_iter().map(str::to_string).collect(),
            options,
        }
    }

    /// Renders at most `num_rows` rows, followed by a trailer when more rows were available.
    pub(crate) fn render<I>(&self, rows: I) -> String
    where
        I: IntoIterator<Item = Vec<ColumnValue>>,
    {
        let mut rows = rows.into_iter();
        let cells: Vec<Vec<String>> = rows
            .by_ref()
            .take(self.options.num_rows)
            .map(|row| row.iter().map(|value| self.cell(value)).collect())
            .collect();
        let has_more_rows = rows.next().is_some();

        let widths = self.column_widths(&cells);
        let separator = Self::separator(&widths);

        let mut rendered = String::new();
        rendered.push_str(&separator);
        rendered.push_str(&self.line(&self.headers, &widths));
        rendered.push_str(&separator);
        for row in &cells {
            rendered.push_str(&self.line(row, &widths));
        }
        rendered.push_str(&separator);

        if has_more_rows {
            let noun = if self.options.num_rows == 1 { "row" } else { "rows" };
            rendered.push_str(&format!(
                "only showing top {} {}\n",
                self.options.num_rows, noun
            ));
        }
        rendered
    }

    fn cell(&self, value: &ColumnValue) -> String {
        let text = value.to_string();
        if self.options.truncate && text.chars().count() > TRUNCATE_AT {
            let kept: String = text.chars().take(TRUNCATE_AT - ELLIPSIS.len()).collect();
            return format!("{}{}", kept, ELLIPSIS);
        }
        text
    }

    fn column_widths(&self, cells: &[Vec<String>]) -> Vec<usize> {
        let mut widths: Vec<usize> = self
            .headers
            .iter()
            .map(|header| header.chars().count().max(MINIMUM_COLUMN_WIDTH))
            .collect();

        for row in cells {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }
        widths
    }

    fn separator(widths: &[usize]) -> String {
        let mut line = String::from("+");
        for width in widths {
            line.push_str(&"-".repeat(*width));
            line.push('+');
        }
        line.push('\n');
        line
    }

    fn line(&self, cells: &[String], widths: &[usize]) -> String {
        let mut line = String::from("|");
        for (cell, width) in cells.iter().zip(widths) {
            if self.options.truncate {
                line.push_str(&format!("{:>width$}", cell, width = width));
            } else {
                line.push_str(&format!("{:<width$}", cell, width = width));
            }
            line.push('|');
        }
        line.push('\n');
        line
    }
}

/// Renders the visible columns of every row of `result_set`.
pub fn render_result_set(
    result_set: &dyn ResultSet,
    options: ShowOptions,
) -> Result<String, ExecutionError> {
    let rows = result_set
        .iterator()?
        .map(|row_view| {
            row_view.map(|row_view| row_view.visible_values().into_iter().cloned().collect())
        })
        .collect::<Result<Vec<Vec<ColumnValue>>, _>>()?;

    Ok(TableFormatter::new(result_set.visible_column_names(), options).render(rows))
}
