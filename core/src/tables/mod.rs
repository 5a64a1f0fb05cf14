/// Built-in substitution tables
pub mod order_history;

use crate::replacer::SubstitutionTable;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct TableProfile {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub table: SubstitutionTable,
}

/// Get all built-in tables
pub fn list_tables() -> Vec<TableProfile> {
    vec![order_history::OrderHistoryTable::profile()]
}

pub fn find_table(id: &str) -> Option<TableProfile> {
    list_tables().into_iter().find(|profile| profile.id == id)
}
