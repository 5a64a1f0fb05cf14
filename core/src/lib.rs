pub mod backup;
pub mod config;
pub mod encoding;
pub mod migrate;
pub mod replacer;
pub mod tables;

pub use backup::{write_in_place, WriteError, WriteOutcome};
pub use config::{builtin_table, load_table_file, parse_table, MigrationOptions, TableError};
pub use encoding::{Encoding, EncodingError, TextFile};
pub use migrate::{migrate_file, MigrateError, MigrationReport};
pub use replacer::{apply_table, replace_all, Replacement, RuleHit, Substitution, SubstitutionTable};
pub use tables::{find_table, list_tables, TableProfile};
