//! Schema export command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    print!("{}", gc_web::graphql::export_sdl());
    Ok(())
}
