// Main entry point
use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use llm_translator::infrastructure::config::{
    generate_config_sample, load_config, mask_api_key, Config,
};
use llm_translator::infrastructure::logging::init_logging;
use llm_translator::interfaces::api::{router, SERVICE_NAME};
use llm_translator::interfaces::cli::Cli;
use llm_translator::state::AppState;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.generate_config {
        generate_config_sample()?;
        return Ok(());
    }

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    if cli.check_config {
        if !print_config_report(&config) {
            std::process::exit(1);
        }
        return Ok(());
    }

    // Initialize logging
    if config.logging.enable {
        init_logging(&config.logging)?;
    }

    // Refuses to start on missing key or unknown provider
    let state = AppState::new(config.clone()).context("Invalid configuration")?;

    info!("Starting {}", SERVICE_NAME);
    info!("LLM Provider: {}", state.translator.provider_name());
    info!("LLM Model: {}", config.llm.model);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutting down {}", SERVICE_NAME);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        eprintln!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Print the configuration diagnostic report. Returns false when any check fails.
fn print_config_report(config: &Config) -> bool {
    let rule = "━".repeat(60);

    println!("{}", "Configuration Diagnostic Report".green().bold());
    println!("{}", rule);
    println!("LLM Provider:  {}", config.llm.provider);
    println!("LLM Model:     {}", config.llm.model);
    println!("LLM Timeout:   {}s", config.llm.timeout);

    let api_key = &config.llm.api_key;
    if api_key.is_empty() {
        println!("LLM API Key:   {}", "[NOT SET]".red());
    } else {
        println!(
            "LLM API Key:   {} (length: {})",
            mask_api_key(api_key),
            api_key.chars().count()
        );
    }

    match config.llm.base_url_override() {
        Some(url) => println!("LLM Base URL:  {}", url),
        None => println!("LLM Base URL:  [Using default]"),
    }

    println!();
    println!("Max Text Len:  {}", config.server.max_text_length);
    println!("CORS Origins:  {:?}", config.server.cors_origins);
    println!("Log Level:     {}", config.logging.level);
    println!(
        "Listen:        {}:{}",
        config.server.host, config.server.port
    );
    println!();

    let issues = config.issues();
    if issues.is_empty() {
        println!("{}", rule);
        println!("{}", "✓ All checks passed! Configuration is valid.".green());
        println!("{}", rule);
        true
    } else {
        println!("{}", "Issues Found:".red().bold());
        println!("{}", rule);
        for issue in &issues {
            println!("{} {}", "✗".red(), issue);
        }
        println!();
        println!("Please fix the issues in your config file or .env and try again.");
        false
    }
}
