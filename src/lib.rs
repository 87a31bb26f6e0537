//! Reconstructs parent/child hierarchies from delimiter-separated text.
//!
//! The pipeline splits an input stream into a header and data rows on a
//! literal delimiter, resolves one type per column (explicit
//! configuration wins, sampling infers the rest), parses every cell
//! into a typed value, and links the rows into a forest using either
//! parent-pointer or child-list references. The assembled
//! [`TreeTable`] is a frozen read-only view; anomalies in the data
//! (short rows, unparseable numbers, dangling references, duplicate
//! ids) are absorbed, only broken configuration, unreadable sources
//! and reference cycles fail a run.

pub mod arena;
pub mod builder;
pub mod config;
pub mod errors;
pub mod reader;
pub mod record;
pub mod render;
pub mod schema;
pub mod table;
pub mod util;

pub use arena::{Forest, Node, NodeId};
pub use builder::TreeBuilder;
pub use config::{LinkMode, TableOptions, TypeSpec};
pub use errors::{ConfigError, TableError, TableResult};
pub use reader::{read_table, RawTable, Source};
pub use record::Record;
pub use schema::{Column, ColumnType, Schema, TypeInferencer, Value};
pub use table::TreeTable;

use std::io::BufRead;

use tracing::instrument;

/// Run the full pipeline over a path spec. `-` reads standard input,
/// anything else is a file path with `~` and `$VAR` expanded.
#[instrument(level = "debug", skip(options))]
pub fn build_from_path(spec: &str, options: &TableOptions) -> TableResult<TreeTable> {
    build_from_source(&Source::from_spec(spec), options)
}

/// Run the full pipeline over an already-resolved source.
#[instrument(level = "debug", skip(options))]
pub fn build_from_source(source: &Source, options: &TableOptions) -> TableResult<TreeTable> {
    options.precheck()?;
    let input = source.open()?;
    assemble(reader::read_table(input, &options.delimiter)?, options)
}

/// Run the full pipeline over any buffered reader.
#[instrument(level = "debug", skip(input, options))]
pub fn build_from_reader<R: BufRead>(input: R, options: &TableOptions) -> TableResult<TreeTable> {
    options.precheck()?;
    assemble(reader::read_table(input, &options.delimiter)?, options)
}

fn assemble(raw: RawTable, options: &TableOptions) -> TableResult<TreeTable> {
    // No header line means nothing to resolve and nothing to build.
    if raw.is_empty() {
        return Ok(TreeTable::new(Schema::default(), Forest::new()));
    }

    let resolved = options.resolve(&raw.headers)?;
    let schema = TypeInferencer::new().infer_schema(&raw.headers, &raw.rows, &resolved.hints);

    let records: Vec<Record> = raw
        .rows
        .iter()
        .map(|fields| Record::from_fields(&schema, fields))
        .collect();

    let builder = TreeBuilder::new(options.mode, resolved.id_col, resolved.link_col);
    let forest = builder.build(records)?;
    Ok(TreeTable::new(schema, forest))
}
