//! Catalog command implementation.
//!
//! Prints the fixed catalog every run is seeded with, so mix parameters can
//! be picked against the actual starting stock levels.

use crate::error::Result;
use crate::store::seed::seed_catalog;

/// Execute the catalog command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(json: bool) -> Result<()> {
    let catalog = seed_catalog();

    if json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    for record in &catalog {
        let marker = if record.editor_pick { "  [pick]" } else { "" };
        println!("{record}{marker}");
    }
    let picks = catalog.iter().filter(|r| r.editor_pick).count();
    println!("\n{} records, {} editor picks", catalog.len(), picks);

    Ok(())
}
