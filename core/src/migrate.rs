/// Read -> transform -> write pipeline for a single file
use crate::backup::{write_in_place, WriteError};
use crate::config::MigrationOptions;
use crate::encoding::{EncodingError, TextFile};
use crate::replacer::{apply_table, RuleHit, SubstitutionTable};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MigrateError {
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error("failed to write {path}")]
    Write {
        path: String,
        #[source]
        source: WriteError,
    },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationReport {
    pub path: PathBuf,
    pub rules_applied: usize,
    pub total_replacements: usize,
    pub unmatched_rules: usize,
    pub hits: Vec<RuleHit>,
    pub changed: bool,
    pub written: bool,
    pub backup_path: Option<PathBuf>,
    pub sha256_before: String,
    pub sha256_after: String,
}

/// Apply `table` to the file at `path` and write the result back in place.
///
/// The file is read and decoded fully before anything is written, so a
/// decoding failure leaves it untouched. Nothing is written when the table
/// changed nothing or `options.dry_run` is set.
pub fn migrate_file(
    path: &Path,
    table: &SubstitutionTable,
    options: &MigrationOptions,
) -> Result<MigrationReport, MigrateError> {
    let resolved = dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let source = TextFile::read(path)?;
    log::info!(
        "applying {} rule(s) to {} ({} bytes)",
        table.len(),
        resolved.display(),
        source.raw().len()
    );

    let replacement = apply_table(&source.text, table);
    let output = source.encode(&replacement.text);
    let changed = output != source.raw();

    for hit in replacement.unmatched() {
        log::debug!("rule #{} {:?} matched nothing", hit.index, hit.search);
    }

    let mut backup_path = None;
    let written = changed && !options.dry_run;
    if written {
        let outcome = write_in_place(&resolved, &output, options.backup).map_err(|source| {
            MigrateError::Write {
                path: resolved.display().to_string(),
                source,
            }
        })?;
        backup_path = outcome.backup_path;
    } else if !changed {
        log::info!("{} already up to date", resolved.display());
    }

    Ok(MigrationReport {
        path: resolved,
        rules_applied: table.len(),
        total_replacements: replacement.total(),
        unmatched_rules: replacement.unmatched().count(),
        sha256_before: sha256_hex(source.raw()),
        sha256_after: sha256_hex(&output),
        hits: replacement.hits,
        changed,
        written,
        backup_path,
    })
}

fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}
