//! `skald auth` command
//!
//! Prompts for the project API key and persists it to the config store.
//!
//! # Usage
//! ```bash
//! skald auth
//! ```

use anyhow::Result;
use dialoguer::Password;

use crate::config::{ConfigStore, Credential};

pub fn run(store: &ConfigStore) -> Result<()> {
    let api_key = match Password::new()
        .with_prompt("Enter your project API key")
        .allow_empty_password(true)
        .interact()
    {
        Ok(key) => key,
        // Interrupted prompt (Ctrl-C / closed stdin) cancels without error.
        Err(_) => {
            println!("❌ Authentication cancelled.");
            return Ok(());
        }
    };

    if api_key.is_empty() {
        println!("❌ Authentication cancelled.");
        return Ok(());
    }

    store.save(&Credential::new(api_key))?;

    println!("✅ API key saved successfully!");
    println!("📁 Config location: {}", store.config_path().display());

    Ok(())
}
