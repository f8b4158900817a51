// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Hauki - Concurrent Login Credential Testing Engine
 * Standalone CLI front-end
 *
 * Collects the run configuration (target, candidate lists, classifier
 * flags), hands it to the attempt engine and prints the final report.
 *
 * (c) 2026 Bountyy Oy
 */

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, Level};

use hauki_engine::config::RunConfig;
use hauki_engine::engine::CredentialEngine;
use hauki_engine::jobs::CredentialSpace;
use hauki_engine::wordlist::load_list;

/// Hauki - Concurrent Login Credential Testing Engine
#[derive(Parser)]
#[command(name = "hauki")]
#[command(author = "Bountyy Oy <info@bountyy.fi>")]
#[command(version = "1.1.0")]
#[command(about = "Credential testing for HTTP login forms. Fast, bounded, Rust.", long_about = None)]
struct Cli {
    /// Target login URL
    url: String,

    /// Username candidates: path to a wordlist file or a single literal value
    #[arg(short, long)]
    usernames: String,

    /// Password candidates: path to a wordlist file or a single literal value
    #[arg(short, long)]
    passwords: String,

    /// Error phrases: path to a file or a single literal phrase
    #[arg(short, long)]
    error_phrases: Option<String>,

    /// Form field name carrying the username
    #[arg(long, default_value = "username")]
    user_field: String,

    /// Form field name carrying the password
    #[arg(long, default_value = "password")]
    pass_field: String,

    /// Number of concurrent workers
    #[arg(short = 't', long, default_value = "50")]
    threads: usize,

    /// Delay in seconds after each failed attempt
    #[arg(short, long, default_value = "0")]
    delay: f64,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout: u64,

    /// Upstream proxy URL (http://host:port)
    #[arg(long)]
    proxy: Option<String>,

    /// Fetch an anti-forgery token from the login page before each attempt
    #[arg(long)]
    csrf: bool,

    /// Match individual words of each error phrase instead of the full phrase
    #[arg(long)]
    sensitive_error_check: bool,

    /// Treat a redirect away from the login page as a successful login
    #[arg(long)]
    redirect_check: bool,

    /// Append the winning credentials to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the final report as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug output
    #[arg(long)]
    debug: bool,

    /// Quiet mode - only show the final report
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    if !cli.quiet {
        println!("    __                __   _");
        println!("   / /_  ____ ___  __/ /__(_)");
        println!("  / __ \\/ __ `/ / / / //_/ /");
        println!(" / / / / /_/ / /_/ / ,< / /");
        println!("/_/ /_/\\__,_/\\__,_/_/|_/_/");
        println!();
        println!("     Login Credential Testing Engine");
        println!("        v1.1 - (c) 2026 Bountyy Oy");
        println!();
    }

    // Create async runtime
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(num_cpus::get())
        .thread_name("hauki-worker")
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cli))
}

async fn async_main(cli: Cli) -> Result<()> {
    let usernames = load_list(&cli.usernames)?;
    let passwords = load_list(&cli.passwords)?;
    let error_phrases = match &cli.error_phrases {
        Some(source) => load_list(source)?,
        None => Vec::new(),
    };

    let config = RunConfig {
        target_url: cli.url,
        user_field: cli.user_field,
        pass_field: cli.pass_field,
        workers: cli.threads,
        delay_secs: cli.delay,
        proxy: cli.proxy,
        error_phrases,
        sensitive_error_check: cli.sensitive_error_check,
        redirect_check: cli.redirect_check,
        fetch_csrf_token: cli.csrf,
        verbosity: if cli.quiet { 0 } else { 1 },
        log_file: cli.log_file,
        request_timeout_secs: cli.timeout,
    };

    let engine = CredentialEngine::new(config).context("engine initialization failed")?;
    let space = CredentialSpace::new(usernames, passwords);
    info!("Search space: {} candidate pairs", space.len());

    let metrics = engine.run(space).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&metrics)?);
    } else {
        print!("{}", metrics);
    }

    Ok(())
}
