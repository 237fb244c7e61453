//! CLI command implementations.

pub mod auth;
pub mod cart;
pub mod config;

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: CartCommand,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart.
    Show,
    /// Add a product to the cart.
    Add(AddArgs),
    /// Empty the cart.
    Clear {
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for `cart add`.
#[derive(Args)]
pub struct AddArgs {
    /// Product ID.
    #[arg(long, conflicts_with = "from_product")]
    pub product_id: Option<String>,

    /// Product name.
    #[arg(long)]
    pub name: Option<String>,

    /// Unit price.
    #[arg(long)]
    pub price: Option<f64>,

    /// Image URL.
    #[arg(long)]
    pub image: Option<String>,

    /// Category label.
    #[arg(long)]
    pub category: Option<String>,

    /// Supplier display name.
    #[arg(long)]
    pub supplier: Option<String>,

    /// Read the product from a catalog JSON record instead.
    #[arg(long, value_name = "FILE")]
    pub from_product: Option<PathBuf>,

    /// Units to add.
    #[arg(short, long, default_value_t = 1)]
    pub quantity: u32,

    /// Chosen attribute, as NAME=VALUE. Repeatable.
    #[arg(long = "attr", value_name = "NAME=VALUE", value_parser = parse_key_val)]
    pub attrs: Vec<(String, String)>,
}

/// Arguments for the login command.
#[derive(Args)]
pub struct LoginArgs {
    /// User ID.
    #[arg(long)]
    pub id: String,

    /// Given name.
    #[arg(long)]
    pub first_name: Option<String>,

    /// Family name.
    #[arg(long)]
    pub last_name: Option<String>,

    /// Email address.
    #[arg(long)]
    pub email: Option<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{}`", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("attribute name is empty in `{}`", s));
    }
    Ok((key.to_string(), value.trim().to_string()))
}
