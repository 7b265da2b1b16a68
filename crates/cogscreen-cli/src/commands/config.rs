//! The `cogscreen config` command.

use anyhow::Result;

use cogscreen_core::config::SessionConfig;

pub fn execute() -> Result<()> {
    println!("# cogscreen session configuration");
    println!("# Save as session.toml and pass with `cogscreen run --config session.toml`.");
    println!();
    print!("{}", SessionConfig::default().to_toml_string()?);
    Ok(())
}
