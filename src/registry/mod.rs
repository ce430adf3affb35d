use std::collections::{BTreeMap, HashMap};

use log::info;
use tokio::sync::Mutex;

use crate::conf::TableEntry;
use crate::core::PeekError;
use crate::table::Table;

/// Owns the label → Table map behind a single mutex.
///
/// The lock is scoped to lookup only: `lookup` clones the Table out, so no
/// request ever holds the lock while streaming a file.
#[derive(Debug)]
pub struct Registry {
    tables: Mutex<HashMap<String, Table>>,
}

impl Registry {
    /// Build the registry, opening every table eagerly. A missing or
    /// empty file fails startup with the offending label in the message.
    pub fn from_entries(entries: &[TableEntry]) -> Result<Registry, PeekError> {
        let mut tables = HashMap::new();
        for entry in entries {
            let table = Table::new(entry).map_err(|e| match e {
                PeekError::NotFound(msg) => {
                    PeekError::NotFound(format!("table '{}': {}", entry.label, msg))
                }
                PeekError::EmptyFile(msg) => {
                    PeekError::EmptyFile(format!("table '{}': {}", entry.label, msg))
                }
                other => other,
            })?;
            info!(
                "registered table '{}' ({}, {} rows)",
                entry.label,
                entry.path,
                table.row_count()
            );
            tables.insert(entry.label.clone(), table);
        }
        Ok(Registry {
            tables: Mutex::new(tables),
        })
    }

    /// Hand out an independent copy of the Table state for one request.
    pub async fn lookup(&self, label: &str) -> Option<Table> {
        let tables = self.tables.lock().await;
        tables.get(label).cloned()
    }

    pub async fn labels(&self) -> Vec<String> {
        let tables = self.tables.lock().await;
        let mut labels: Vec<String> = tables.keys().cloned().collect();
        labels.sort();
        labels
    }

    /// Label → columns view for the listing endpoint.
    pub async fn describe(&self) -> BTreeMap<String, Vec<String>> {
        let tables = self.tables.lock().await;
        tables
            .iter()
            .map(|(label, table)| (label.clone(), table.columns().to_vec()))
            .collect()
    }
}
