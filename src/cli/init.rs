//! Init command - Write the default config and create the data directory.

use anyhow::Result;
use crate::config;

pub async fn cmd_init() -> Result<()> {
    let cfg_path = config::config_path();
    if cfg_path.exists() {
        println!("Config already exists at {}", cfg_path.display());
        println!("Delete it first if you want to re-initialize.");
        return Ok(());
    }

    let cfg = config::Config::default();
    config::save_config(&cfg, None)?;
    println!("✓ Created config at {}", cfg_path.display());

    let data_dir = config::data_dir_path(&cfg);
    std::fs::create_dir_all(&data_dir)?;
    println!("✓ Created data directory at {}", data_dir.display());

    println!("\n🐠 aquarist is ready!");
    println!("\nNext steps:");
    println!("  1. Add a schedule: aquarist schedule add --type feeding --time 08:00");
    println!("  2. Run reminders:  aquarist start");
    Ok(())
}
