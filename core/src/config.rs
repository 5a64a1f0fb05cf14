/// Run options and table file loading
use crate::replacer::{Substitution, SubstitutionTable};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationOptions {
    /// Transform and report, but leave the file untouched
    #[serde(default)]
    pub dry_run: bool,

    /// Copy the original aside before overwriting
    #[serde(default)]
    pub backup: bool,
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to read table file {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid table file {path}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rule #{index} has an empty search string")]
    EmptySearch { index: usize },

    #[error("unknown built-in table: {0}")]
    UnknownTable(String),
}

/// Load a table from a JSON array of `{"search": .., "replace": ..}` objects.
pub fn load_table_file<P: AsRef<Path>>(path: P) -> Result<SubstitutionTable, TableError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| TableError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_table(&content).map_err(|err| match err {
        TableError::Parse { source, .. } => TableError::Parse {
            path: path.display().to_string(),
            source,
        },
        other => other,
    })
}

pub fn parse_table(content: &str) -> Result<SubstitutionTable, TableError> {
    let rules: Vec<Substitution> =
        serde_json::from_str(content).map_err(|source| TableError::Parse {
            path: "<inline>".into(),
            source,
        })?;

    if let Some(index) = rules.iter().position(|rule| rule.search.is_empty()) {
        return Err(TableError::EmptySearch { index });
    }

    Ok(SubstitutionTable::new(rules))
}

/// Resolve a built-in table by id.
pub fn builtin_table(id: &str) -> Result<SubstitutionTable, TableError> {
    crate::tables::find_table(id)
        .map(|profile| profile.table)
        .ok_or_else(|| TableError::UnknownTable(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn parses_rules_in_order() {
        let table = parse_table(
            r#"[
                {"search": ">T2<", "replace": ">Mon<"},
                {"search": ">T3<", "replace": ">Tue<"}
            ]"#,
        )
        .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rules()[1], Substitution::new(">T3<", ">Tue<"));
    }

    #[test]
    fn rejects_empty_search() {
        let err = parse_table(
            r#"[{"search": "a", "replace": "b"}, {"search": "", "replace": "x"}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, TableError::EmptySearch { index: 1 }));
    }

    #[test]
    fn reports_path_on_bad_json() {
        let temp = NamedTempFile::new().unwrap();
        fs::write(temp.path(), "{not json").unwrap();
        let err = load_table_file(temp.path()).unwrap_err();
        let expected_path = temp.path().display().to_string();
        assert_eq!(err.to_string(), format!("invalid table file {expected_path}"));
        assert!(std::error::Error::source(&err).is_some());
        match err {
            TableError::Parse { path, .. } => assert_eq!(path, expected_path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_builtin() {
        assert!(builtin_table("order-history").is_ok());
        assert!(matches!(builtin_table("nope"), Err(TableError::UnknownTable(_))));
    }

    #[test]
    fn options_default_to_plain_overwrite() {
        let options: MigrationOptions = serde_json::from_str("{}").unwrap();
        assert!(!options.dry_run);
        assert!(!options.backup);
    }
}
