//! repost CLI: run the Telegram bot or print stored templates. Config from env and optional CLI args.

use anyhow::Result;
use clap::{Parser, Subcommand};
use repost_telegram::{run_bot, RepostConfig};
use template_store::{JsonTemplateStore, TemplateStore};

#[derive(Parser)]
#[command(name = "repost")]
#[command(about = "Series repost bot CLI: run, templates", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the Telegram bot (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Print stored series templates without connecting to Telegram.
    Templates {
        /// Template file; defaults to TEMPLATES_FILE or templates.json.
        #[arg(short, long)]
        file: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = RepostConfig::from_env(token)?;
            run_bot(config).await
        }
        Commands::Templates { file } => handle_templates(file).await,
    }
}

async fn handle_templates(file: Option<String>) -> Result<()> {
    let path = file
        .or_else(|| std::env::var("TEMPLATES_FILE").ok())
        .unwrap_or_else(|| "templates.json".to_string());
    let store = JsonTemplateStore::load(&path).await?;
    let templates = store.list().await;

    if templates.is_empty() {
        println!("No templates in {}", path);
        return Ok(());
    }

    println!("{} template(s) in {}:", templates.len(), path);
    for t in templates {
        println!("\n[{}]", t.name);
        println!("  release: {}", t.release);
        println!("  reserve: {}", t.reserve);
    }
    Ok(())
}
