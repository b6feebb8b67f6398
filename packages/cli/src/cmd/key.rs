//! `crosspost key`: manage the stored Gemini key

use anyhow::Result;
use colored::Colorize;
use crosspost_core::common::{mask, validate_format};
use dialoguer::Password;

use crate::context::CliContext;
use crate::credential_store::CredentialStore;

pub fn set(ctx: &CliContext, store: &mut CredentialStore, key: Option<String>) -> Result<()> {
    let key = match key {
        Some(key) => key,
        None => Password::with_theme(&ctx.theme())
            .with_prompt("Gemini API key")
            .interact()?,
    };

    if key.trim().is_empty() {
        store.clear()?;
        ctx.print_info("Empty key; stored key removed");
        return Ok(());
    }

    if let Err(e) = validate_format(&key) {
        ctx.print_warning(&format!("That doesn't look like a Gemini key: {}", e));
        if !ctx.confirm("Save it anyway?", false)? {
            return Ok(());
        }
    }

    store.set_api_key(&key)?;
    ctx.print_success(&format!(
        "Saved {} to {}",
        mask(key.trim()),
        store.path().display()
    ));
    Ok(())
}

pub fn show(store: &CredentialStore) {
    match store.api_key() {
        Some(key) => {
            let status = match validate_format(key) {
                Ok(()) => "valid format".green(),
                Err(e) => e.to_string().red(),
            };
            println!("{}  ({})", mask(key).bold(), status);
            println!("{}", store.path().display().to_string().dimmed());
        }
        None => println!(
            "{}",
            "No key stored. Run `crosspost key set` to add one.".yellow()
        ),
    }
}

pub fn clear(ctx: &CliContext, store: &mut CredentialStore) -> Result<()> {
    if store.api_key().is_none() {
        ctx.print_info("No key stored");
        return Ok(());
    }
    if ctx.confirm("Remove the stored Gemini key?", false)? {
        store.clear()?;
        ctx.print_success("Key removed");
    }
    Ok(())
}
