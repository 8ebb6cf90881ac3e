use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use gui::{App, AppFlags, APP_TITLE};
use iced::{Application, Settings};
use reddit_client::RedditClient;
use report::RunSummary;
use sentiment_core::{AppConfig, ErrorReporter, MAX_POST_LIMIT, MIN_POST_LIMIT};
use sentiment_engine::{run_analysis, AnalysisContext, AnalysisRequest};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str =
    "subreddit_sentiment=info,gui=info,reddit_client=info,sentiment_engine=info,report=info";

#[derive(Parser)]
#[command(name = "subreddit-sentiment", version, about = "Sentiment of Reddit hot posts")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the desktop window (default)
    Gui,
    /// Analyze without a window and print a summary
    Analyze(AnalyzeArgs),
}

#[derive(Args)]
struct AnalyzeArgs {
    /// Comma-separated subreddit names
    #[arg(long)]
    subreddits: Option<String>,

    /// Posts fetched per subreddit
    #[arg(long, value_parser = clap::value_parser!(u32).range(MIN_POST_LIMIT as i64..=MAX_POST_LIMIT as i64))]
    limit: Option<u32>,

    /// Write the records as CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the records as an HTML table
    #[arg(long)]
    html: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let cli = Cli::parse();

    let reporter = ErrorReporter::default();
    let config = AppConfig::load().map_err(|e| anyhow::anyhow!(reporter.report_error(&e)))?;

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    let context = runtime.block_on(AnalysisContext::load(&config.settings))?;
    let client = RedditClient::new(config.credentials)?;

    match cli.command.unwrap_or(Commands::Gui) {
        Commands::Gui => {
            drop(runtime);
            run_gui(AppFlags {
                client: Arc::new(client),
                context: Arc::new(context),
                settings: config.settings,
            })
        }
        Commands::Analyze(args) => {
            let subreddits = args
                .subreddits
                .unwrap_or_else(|| config.settings.default_subreddits.clone());
            let limit = args.limit.unwrap_or(config.settings.default_limit);
            let request = AnalysisRequest::parse(&subreddits, limit)?;
            runtime.block_on(run_headless(&client, &context, &request, &args.csv, &args.html))
        }
    }
}

fn run_gui(flags: AppFlags) -> anyhow::Result<()> {
    tracing::info!("Starting {}", APP_TITLE);

    let mut settings = Settings::with_flags(flags);
    settings.window = iced::window::Settings {
        size: iced::Size::new(1200.0, 800.0),
        min_size: Some(iced::Size::new(800.0, 600.0)),
        ..Default::default()
    };

    SentimentApp::run(settings).map_err(|e| {
        tracing::error!("Application error: {}", e);
        anyhow::anyhow!("GUI error: {e}")
    })
}

async fn run_headless(
    client: &RedditClient,
    context: &AnalysisContext,
    request: &AnalysisRequest,
    csv_path: &Option<PathBuf>,
    html_path: &Option<PathBuf>,
) -> anyhow::Result<()> {
    if request.communities.is_empty() {
        tracing::warn!("No subreddits given");
        println!("Please enter at least one subreddit.");
        return Ok(());
    }

    let result = run_analysis(client, context, request)
        .await
        .map_err(|e| anyhow::anyhow!("Analysis failed: {}", ErrorReporter::default().report_error(&e)))?;

    for record in &result {
        println!(
            "[{:<8}] r/{} | {} | {}",
            record.sentiment.as_str(),
            record.subreddit,
            record.title,
            record.link
        );
    }
    let summary = RunSummary::from_result(&result).with_seed_lexicon(context.uses_seed_lexicon());
    println!("{}", summary);

    if let Some(path) = csv_path {
        report::export_csv(&result, path)?;
        println!("CSV written to {}", path.display());
    }
    if let Some(path) = html_path {
        report::export_html(&result, path)?;
        println!("HTML written to {}", path.display());
    }
    Ok(())
}

struct SentimentApp {
    app: App,
}

impl Application for SentimentApp {
    type Message = gui::Message;
    type Theme = iced::Theme;
    type Executor = iced::executor::Default;
    type Flags = AppFlags;

    fn new(flags: Self::Flags) -> (Self, iced::Command<Self::Message>) {
        tracing::info!("Initializing application");
        (
            Self {
                app: App::new(flags),
            },
            iced::Command::none(),
        )
    }

    fn title(&self) -> String {
        APP_TITLE.to_string()
    }

    fn update(&mut self, message: Self::Message) -> iced::Command<Self::Message> {
        self.app.update(message)
    }

    fn view(&self) -> iced::Element<Self::Message> {
        self.app.view()
    }
}
