use std::cmp::max;
use std::fmt;

use itertools::Itertools;
use unicode_width::UnicodeWidthStr;

use wh_select::Column;

/// A table of wheels, stored column by column.
#[derive(Debug)]
pub(crate) struct Table {
    columns: Vec<TableColumn>,
}

impl Table {
    /// Build a table from the given rows, each with one value per column.
    pub(crate) fn new(columns: &[Column], rows: &[Vec<String>]) -> Self {
        let columns = columns
            .iter()
            .enumerate()
            .map(|(index, column)| TableColumn {
                header: column.header().to_string(),
                rows: rows
                    .iter()
                    .map(|row| row.get(index).cloned().unwrap_or_default())
                    .collect(),
            })
            .collect();
        Self { columns }
    }

    /// Write the table with aligned columns, with a rule below the headers.
    pub(crate) fn write_plain(&self, mut stream: impl fmt::Write) -> fmt::Result {
        for elems in MultiZip(self.columns.iter().map(TableColumn::fmt).collect_vec()) {
            writeln!(stream, "{}", elems.join("  ").trim_end())?;
        }
        Ok(())
    }

    /// Write the table as MediaWiki markup.
    pub(crate) fn write_mediawiki(&self, mut stream: impl fmt::Write) -> fmt::Result {
        writeln!(stream, "{{| class=\"wikitable\"")?;
        writeln!(stream, "|-")?;
        writeln!(
            stream,
            "! {}",
            self.columns.iter().map(|column| &column.header).join(" !! ")
        )?;

        let height = self.columns.first().map_or(0, |column| column.rows.len());
        for index in 0..height {
            writeln!(stream, "|-")?;
            let cells = self
                .columns
                .iter()
                .map(|column| column.rows[index].as_str())
                .join(" || ");
            writeln!(stream, "{}", format!("| {cells}").trim_end())?;
        }
        writeln!(stream, "|}}")
    }
}

/// A column in a table.
#[derive(Debug)]
struct TableColumn {
    header: String,
    rows: Vec<String>,
}

impl<'a> TableColumn {
    /// Return the width of the column.
    fn max_width(&self) -> usize {
        max(
            self.header.width(),
            self.rows.iter().map(|f| f.width()).max().unwrap_or(0),
        )
    }

    /// Return an iterator of the column, with the header and rows formatted to the maximum width.
    fn fmt(&'a self) -> impl Iterator<Item = String> + 'a {
        let max_width = self.max_width();
        let header = vec![
            format!("{0:width$}", self.header, width = max_width),
            format!("{:-^width$}", "", width = max_width),
        ];

        header
            .into_iter()
            .chain(self.rows.iter().map(move |f| format!("{f:max_width$}")))
    }
}

/// Zip an unknown number of iterators.
#[derive(Debug)]
struct MultiZip<T>(Vec<T>);

impl<T> Iterator for MultiZip<T>
where
    T: Iterator,
{
    type Item = Vec<T::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.iter_mut().map(Iterator::next).collect()
    }
}
