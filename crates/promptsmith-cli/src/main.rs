//! Promptsmith CLI - Prompt optimization from the terminal
//!
//! Talks to a running Promptsmith API; the optimized prompt goes to stdout,
//! everything else to stderr so the output pipes cleanly.

mod api;
mod config;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::Input;
use std::fs;
use tracing_subscriber::EnvFilter;

use api::{OptimizeRequest, PromptsmithClient};
use config::Config;
use promptsmith::{OptimizationSettings, TargetModel};

#[derive(Parser)]
#[command(name = "promptsmith")]
#[command(about = "Promptsmith CLI - Optimize prompts for a target model", long_about = None)]
#[command(version)]
struct Cli {
    /// Verbose logging (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Optimize a prompt
    Optimize {
        /// Prompt text (or use -f for file)
        prompt: Option<String>,
        /// Read prompt from file
        #[arg(short, long)]
        file: Option<String>,
        /// Target model: openai, anthropic, google, image
        #[arg(short, long)]
        target: Option<String>,
        /// Do not add examples
        #[arg(long)]
        no_examples: bool,
        /// Do not add constraints
        #[arg(long)]
        no_constraints: bool,
        /// Do not rewrite for clarity
        #[arg(long)]
        no_clarity: bool,
        /// Do not add structure
        #[arg(long)]
        no_structure: bool,
        /// Print the full response as JSON
        #[arg(long)]
        json: bool,
    },

    /// Browse template content
    Templates {
        #[command(subcommand)]
        action: TemplatesAction,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum TemplatesAction {
    /// List template slugs
    List,
    /// Show a template record
    Show {
        /// Template slug
        slug: String,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set the API base URL
    SetUrl {
        /// e.g. https://promptsmith.shuttle.app
        url: String,
    },
    /// Set the default target model
    SetTarget {
        /// openai, anthropic, google, image
        model: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Optimize {
            prompt,
            file,
            target,
            no_examples,
            no_constraints,
            no_clarity,
            no_structure,
            json,
        } => {
            let settings = OptimizationSettings {
                include_examples: !no_examples,
                add_constraints: !no_constraints,
                improve_clarity: !no_clarity,
                add_structure: !no_structure,
            };
            cmd_optimize(prompt, file, target, settings, json).await
        }
        Commands::Templates { action } => cmd_templates(action).await,
        Commands::Config { action } => cmd_config(action),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// ============================================
// Command Implementations
// ============================================

async fn cmd_optimize(
    prompt: Option<String>,
    file: Option<String>,
    target: Option<String>,
    settings: OptimizationSettings,
    json: bool,
) -> Result<()> {
    let config = Config::load()?;

    let prompt = match (prompt, file) {
        (Some(p), None) => p,
        (None, Some(f)) => {
            fs::read_to_string(&f).with_context(|| format!("Failed to read file: {}", f))?
        }
        (Some(_), Some(_)) => {
            bail!("Cannot specify both a prompt and --file");
        }
        (None, None) => Input::new()
            .with_prompt("Prompt")
            .interact_text()
            .context("Failed to read input")?,
    };

    if prompt.trim().is_empty() {
        bail!("Prompt is empty");
    }

    let target_model = resolve_target(target.as_deref(), config.default_target)?;

    let client = PromptsmithClient::new(&config.base_url);
    let resp = client
        .optimize(&OptimizeRequest {
            prompt,
            target_model,
            optimization_settings: settings,
        })
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&resp)?);
        return Ok(());
    }

    // Metadata to stderr so stdout is clean for piping
    eprintln!(
        "{} {} [{} -> {}] {} tokens",
        "Optimized for".dimmed(),
        resp.target_model.display_name().cyan(),
        score_colored(resp.analysis.original_score),
        score_colored(resp.analysis.optimized_score),
        resp.usage.total_tokens
    );
    for improvement in &resp.improvements {
        eprintln!("  {} {}", "+".green(), improvement);
    }
    eprintln!("{}", "---".dimmed());

    println!("{}", resp.optimized);

    Ok(())
}

/// Explicit flag wins over the configured default; neither means server default
fn resolve_target(flag: Option<&str>, default: Option<TargetModel>) -> Result<Option<TargetModel>> {
    match flag {
        Some(name) => {
            let target: TargetModel = name.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            Ok(Some(target))
        }
        None => Ok(default),
    }
}

fn score_colored(score: u8) -> colored::ColoredString {
    let text = score.to_string();
    if score >= 80 {
        text.green()
    } else if score >= 50 {
        text.yellow()
    } else {
        text.red()
    }
}

async fn cmd_templates(action: TemplatesAction) -> Result<()> {
    let config = Config::load()?;
    let client = PromptsmithClient::new(&config.base_url);

    match action {
        TemplatesAction::List => {
            let list = client.list_templates().await?;

            if list.slugs.is_empty() {
                println!("No templates found.");
                return Ok(());
            }

            println!("{} ({}):", "Templates".bold(), list.count);
            for slug in list.slugs {
                println!("  {}", slug.cyan());
            }
        }

        TemplatesAction::Show { slug } => {
            let record = client.get_template(&slug).await?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
    }

    Ok(())
}

fn cmd_config(action: ConfigAction) -> Result<()> {
    let mut config = Config::load()?;

    match action {
        ConfigAction::Show => {
            println!("{}", "Configuration:".bold());
            println!("  Path: {:?}", Config::config_path()?);
            println!("  Base URL: {}", config.base_url);
            println!(
                "  Default Target: {}",
                config
                    .default_target
                    .map(|t| t.as_str())
                    .unwrap_or("server default")
                    .cyan()
            );
        }

        ConfigAction::SetUrl { url } => {
            config.set_base_url(&url)?;
            config.save()?;
            println!("{} Base URL set to {}", "✓".green(), config.base_url);
        }

        ConfigAction::SetTarget { model } => {
            let target = config.set_default_target(&model)?;
            config.save()?;
            println!(
                "{} Default target set to {}",
                "✓".green(),
                target.display_name()
            );
        }
    }

    Ok(())
}
