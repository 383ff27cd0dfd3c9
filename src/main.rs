//! Social media sentiment analyzer CLI
//!
//! Collects a post (or URL) plus a topic and renders the structured
//! analysis produced by the hosted model.

use clap::{Parser, Subcommand};
use sentiment_analyzer::{
    config::Config,
    sentiment::{is_url, SentimentEngine},
    types::SentimentAnalysis,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sentiment-analyzer")]
#[command(about = "Analyze the sentiment of social media posts about a topic")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a post, or the post behind a public URL, against a topic
    Analyze {
        /// Post text or a public http(s) URL
        post: String,

        /// Topic the sentiment should be judged against
        #[arg(short, long)]
        topic: String,
    },
    /// Fetch the raw text behind a post URL without analyzing it
    Resolve {
        /// Public http(s) URL of the post
        url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = Config::load(&cli.config)?;

    match cli.command {
        Commands::Analyze { post, topic } => analyze(config, &post, &topic).await,
        Commands::Resolve { url } => resolve(config, &url).await,
    }
}

async fn analyze(config: Config, post: &str, topic: &str) -> anyhow::Result<()> {
    let post = post.trim();
    let topic = topic.trim();

    if post.is_empty() || topic.is_empty() {
        anyhow::bail!("Please provide both a social media post and a topic to analyze.");
    }

    let engine = SentimentEngine::new(&config)?;

    match engine.analyze(post, topic).await {
        Ok(analysis) => {
            render(&analysis);
            Ok(())
        }
        Err(e) => anyhow::bail!("Analysis failed: {}", e),
    }
}

async fn resolve(config: Config, url: &str) -> anyhow::Result<()> {
    let url = url.trim();

    if !is_url(url) {
        anyhow::bail!("Not a well-formed http(s) URL: {}", url);
    }

    let engine = SentimentEngine::new(&config)?;

    match engine.resolve(url).await {
        Ok(text) => {
            println!("{}", text);
            Ok(())
        }
        Err(e) => anyhow::bail!("Resolution failed: {}", e),
    }
}

fn render(analysis: &SentimentAnalysis) {
    println!(
        "Overall sentiment: {} ({:+.2})",
        analysis.overall_sentiment, analysis.sentiment_score
    );
    println!();
    println!("{}", analysis.explanation);

    if !analysis.key_phrases.is_empty() {
        println!();
        println!("Key phrases:");
        for kp in &analysis.key_phrases {
            println!("  [{}] \"{}\"", kp.sentiment, kp.phrase);
        }
    }
}
