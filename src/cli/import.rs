use std::path::PathBuf;

use crate::db::get_connection;
use crate::error::Result;
use crate::importer::import_file;
use crate::models::Source;
use crate::settings::get_data_dir;

pub fn run(file: &str, source: &str, format: Option<&str>) -> Result<()> {
    let file_path = PathBuf::from(file);
    let source = Source::from_code(source)?;
    let conn = get_connection(&get_data_dir().join("roastdesk.db"))?;

    let result = import_file(&conn, &file_path, source, format)?;

    if result.duplicate_file {
        println!("This file has already been imported (duplicate checksum).");
        return Ok(());
    }

    println!(
        "{} imported, {} skipped (already-known orders)",
        result.imported, result.skipped
    );
    if result.imported > 0 {
        println!("New products were seeded into the catalog; set wholesale prices with `roastdesk products set`.");
    }
    Ok(())
}
