//! Shared state and output helpers for every command

use anyhow::Result;
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm};
use std::path::PathBuf;

use crate::client::ApiClient;

pub struct CliContext {
    pub client: ApiClient,
    /// Local bundle file
    pub bundle_path: PathBuf,
    /// Skip confirmations
    pub yes: bool,
}

impl CliContext {
    pub fn new(bundle_path: PathBuf, yes: bool) -> Self {
        Self {
            client: ApiClient::from_env(),
            bundle_path,
            yes,
        }
    }

    pub fn theme(&self) -> ColorfulTheme {
        ColorfulTheme::default()
    }

    pub fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if self.yes {
            return Ok(true);
        }
        Ok(Confirm::with_theme(&self.theme())
            .with_prompt(prompt)
            .default(default)
            .interact()?)
    }

    pub fn print_header(&self, msg: &str) {
        println!();
        println!("{}", style(msg).bold());
    }

    pub fn print_success(&self, msg: &str) {
        println!("{}", style(msg).green());
    }

    pub fn print_warning(&self, msg: &str) {
        println!("{}", style(msg).yellow());
    }

    pub fn print_info(&self, msg: &str) {
        println!("{}", style(msg).cyan());
    }
}
