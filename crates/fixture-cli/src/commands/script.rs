//! Script command implementation

use fixture_core::HistoryScript;
use fixture_fs::{ConfigStore, Format};

use crate::error::{CliError, Result};

/// Print the built-in script in `format`.
///
/// The output can be edited and passed back through `build --script`.
pub fn run_script(format: Format) -> Result<()> {
    let rendered = ConfigStore::new()
        .render(&HistoryScript::builtin(), format)
        .map_err(|message| {
            CliError::user(format!("Failed to render {} script: {message}", format.name()))
        })?;
    print!("{rendered}");
    if !rendered.ends_with('\n') {
        println!();
    }
    Ok(())
}
