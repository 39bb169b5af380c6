// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Configuration module for AmpliFi Exporter application
//!
//! Loads command-line flags with environment variable fallbacks and validates them once
//! at startup.

use clap::Parser;
use reqwest::Url;
use secrecy::SecretString;
use std::fmt;
use std::net::SocketAddr;

use crate::error::{AppError, Result};


/// Default configuration values
pub mod defaults {
    pub const SERVER_ADDR: &str = "0.0.0.0:8080";
    pub const ROUTER_URL: &str = "http://192.168.119.1";
}

/// Environment variable names used by the application
pub mod env_vars {
    pub const SERVER_ADDR: &str = "SERVER_ADDR";
    pub const ROUTER_URL: &str = "AMPLIFI_ROUTER";
    pub const PASSWORD: &str = "AMPLIFI_PASSWORD";
}

/// Raw command-line arguments, before validation
#[derive(Parser)]
#[command(name = "amplifi-exporter", version, about = "Prometheus exporter for AmpliFi routers")]
pub struct Cli {
    /// Listen address for the metrics web server
    #[arg(long = "addr", env = env_vars::SERVER_ADDR, default_value = defaults::SERVER_ADDR)]
    pub server_addr: String,

    /// Address of the AmpliFi router website
    #[arg(long = "router", env = env_vars::ROUTER_URL, default_value = defaults::ROUTER_URL)]
    pub router_url: String,

    /// AmpliFi router password
    #[arg(long, env = env_vars::PASSWORD, hide_env_values = true)]
    pub password: Option<String>,
}

impl fmt::Debug for Cli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cli")
            .field("server_addr", &self.server_addr)
            .field("router_url", &self.router_url)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Application-wide configuration
#[derive(Debug)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub router_url: Url,
    pub password: SecretString,
}

impl Config {
    /// Parses process arguments (and `.env`) into a validated configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the password is missing or an address is invalid.
    pub fn from_args() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::try_from(Cli::parse())
    }
}

impl TryFrom<Cli> for Config {
    type Error = AppError;

    fn try_from(cli: Cli) -> Result<Self> {
        let password = cli
            .password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| {
                AppError::Config(format!(
                    "Password is required. Use --password flag or {} env var",
                    env_vars::PASSWORD
                ))
            })?;

        let router_url = parse_router_url(&cli.router_url)?;

        let server_addr = normalize_listen_addr(&cli.server_addr)
            .parse::<SocketAddr>()
            .map_err(|e| {
                AppError::Config(format!("Invalid listen address '{}': {e}", cli.server_addr))
            })?;

        Ok(Config {
            server_addr,
            router_url,
            password: SecretString::new(password.into()),
        })
    }
}

fn parse_router_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim_end_matches('/'))
        .map_err(|e| AppError::Config(format!("Invalid router URL '{raw}': {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::Config(format!(
            "Invalid router URL '{raw}': expected http or https scheme"
        )));
    }
    if url.host_str().is_none() {
        return Err(AppError::Config(format!(
            "Invalid router URL '{raw}': missing host"
        )));
    }
    Ok(url)
}

/// Accepts Go-style `:8080` listen addresses
fn normalize_listen_addr(raw: &str) -> String {
    if raw.starts_with(':') {
        format!("0.0.0.0{raw}")
    } else {
        raw.to_string()
    }
}
