//! Builds parameterized SELECT, INSERT, UPDATE, DELETE for a record's table.

use crate::model::{Keyed, Record};

/// Quote identifier for PostgreSQL (safe: identifiers come from record definitions only).
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

fn column_list(columns: &[&str]) -> String {
    columns.iter().map(|c| quoted(c)).collect::<Vec<_>>().join(", ")
}

pub fn select_all<R: Record>(columns: &[&str]) -> String {
    format!("SELECT {} FROM {}", column_list(columns), quoted(R::TABLE))
}

pub fn select_by_id<R: Keyed>(columns: &[&str]) -> String {
    format!(
        "SELECT {} FROM {} WHERE {} = $1",
        column_list(columns),
        quoted(R::TABLE),
        quoted(R::PRIMARY_KEY)
    )
}

/// `INSERT ... VALUES ($1..$n) RETURNING ...`; values are bound in `insert` order.
pub fn insert<R: Record>(insert: &[&str], returning: &[&str]) -> String {
    let placeholders: Vec<String> = (1..=insert.len()).map(|n| format!("${}", n)).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        quoted(R::TABLE),
        column_list(insert),
        placeholders.join(", "),
        column_list(returning)
    )
}

/// `UPDATE ... SET` for the given columns; they bind as `$1..$n` and the id binds last.
/// Returns `None` when there is nothing to set.
pub fn update<R: Keyed>(set: &[&str], returning: &[&str]) -> Option<String> {
    if set.is_empty() {
        return None;
    }
    let sets: Vec<String> = set
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{} = ${}", quoted(c), i + 1))
        .collect();
    Some(format!(
        "UPDATE {} SET {} WHERE {} = ${} RETURNING {}",
        quoted(R::TABLE),
        sets.join(", "),
        quoted(R::PRIMARY_KEY),
        set.len() + 1,
        column_list(returning)
    ))
}

pub fn delete<R: Keyed>() -> String {
    format!(
        "DELETE FROM {} WHERE {} = $1",
        quoted(R::TABLE),
        quoted(R::PRIMARY_KEY)
    )
}
