//! Configuration loader for `.env` files, environment variables and explicit overrides.
//!
//! Invariants / Assumptions:
//! - Values set through builder methods after `from_env()` win over the environment.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

mod builder;
mod env;
mod error;

pub use builder::ConfigLoader;
pub use env::env_var_or_none;
pub use error::ConfigError;

#[cfg(test)]
mod tests;
