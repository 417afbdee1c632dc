use std::env;

use anyhow::Context;

use crate::app::DEFAULT_INDEX_PAGE_SIZE;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Bearer token for the admin console; admin routes reject everything when unset
    pub admin_token: Option<String>,
    /// Number of questions on the index page
    pub index_page_size: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: parse_var("PORT", 8080)?,
            admin_token: env::var("ADMIN_TOKEN").ok().filter(|t| !t.is_empty()),
            index_page_size: parse_var("INDEX_PAGE_SIZE", DEFAULT_INDEX_PAGE_SIZE)?,
        })
    }

    /// Check if the admin console is enabled
    pub fn admin_enabled(&self) -> bool {
        self.admin_token.is_some()
    }
}

fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .parse()
            .with_context(|| format!("{} has an invalid value: {}", name, value)),
        Err(_) => Ok(default),
    }
}
