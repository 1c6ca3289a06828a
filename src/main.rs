mod cli;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cli::Commands;
use tutorai::{AiService, AnswerResult, ChatClient, MockChatClient, OpenAiChatClient, OpenAiConfig};

#[derive(Parser)]
#[command(name = "tutorai")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Answer from a scripted offline client instead of the hosted API
    #[arg(long, global = true)]
    mock: bool,

    #[arg(long, global = true, env = "OPENAI_MODEL")]
    model: Option<String>,

    #[arg(long, global = true, env = "OPENAI_BASE_URL")]
    base_url: Option<String>,

    /// Transport timeout; requests are unbounded when unset
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Print answers as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let chat_client = build_chat_client(&cli)?;
    info!("Using chat model {}", chat_client.model());
    let service = AiService::new(chat_client);

    match cli.command {
        Commands::Ask { question, category } => {
            let category = match category {
                Some(c) => c,
                None => {
                    let detected = service.categorize_question(&question).await;
                    debug!("Detected category: {detected}");
                    detected
                }
            };

            let result = service.generate_answer(&question, category).await?;
            print_answer(&result, cli.json, Some(category.label()))?;
        }

        Commands::Categorize { question } => {
            let category = service.categorize_question(&question).await;
            if cli.json {
                println!("{}", serde_json::to_string(&category)?);
            } else {
                println!("{} ({})", category, category.label());
            }
        }

        Commands::FollowUp {
            original,
            answer,
            follow_up,
        } => {
            let result = service
                .follow_up_question(&original, &answer, &follow_up)
                .await?;
            print_answer(&result, cli.json, None)?;
        }
    }

    Ok(())
}

fn build_chat_client(cli: &Cli) -> Result<Arc<dyn ChatClient>> {
    if cli.mock {
        info!("Using mock chat client");
        return Ok(Arc::new(MockChatClient::new()));
    }

    let mut config = OpenAiConfig::from_env()?;
    if let Some(model) = &cli.model {
        config = config.with_model(model.clone());
    }
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url.clone());
    }
    if let Some(secs) = cli.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    Ok(Arc::new(OpenAiChatClient::new(config)?))
}

fn print_answer(result: &AnswerResult, json: bool, category_label: Option<&str>) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    if let Some(label) = category_label {
        println!("カテゴリー: {label}");
    }
    println!("{}", result.answer());
    println!();
    println!("信頼度: {}%", result.confidence_percent());
    if let Some(sources) = result.sources() {
        for source in sources {
            println!("  - {source}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    #[test]
    fn ask_accepts_japanese_category_label() {
        let cli = Cli::try_parse_from(["tutorai", "ask", "微分とは？", "--category", "大学受験"])
            .unwrap();
        match cli.command {
            Commands::Ask { category, .. } => assert_eq!(category, Some(tutorai::Category::Exam)),
            _ => panic!("expected ask"),
        }
    }

    #[test]
    fn ask_rejects_unknown_category() {
        let res = Cli::try_parse_from(["tutorai", "ask", "q", "--category", "hobby"]);
        assert!(res.is_err());
    }

    #[test]
    fn follow_up_takes_three_positionals() {
        let cli = Cli::try_parse_from(["tutorai", "--mock", "follow-up", "q1", "a1", "q2"]).unwrap();
        assert!(cli.mock);
        assert!(matches!(cli.command, Commands::FollowUp { .. }));
    }
}
