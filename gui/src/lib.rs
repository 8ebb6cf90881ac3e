pub mod table;

use iced::widget::{button, column, container, row, slider, text, text_input};
use iced::{Color, Command, Element, Length, Theme};
use reddit_client::RedditClient;
use report::{RunSummary, DEFAULT_CSV_FILE, DEFAULT_HTML_FILE, SEED_LEXICON_NOTICE};
use sentiment_core::{
    AnalysisResult, CoreError, ErrorReporter, Settings, MAX_POST_LIMIT, MIN_POST_LIMIT,
};
use sentiment_engine::{run_analysis, AnalysisContext, AnalysisRequest};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

pub const APP_TITLE: &str = "Reddit Sentiment Analyzer";

#[derive(Debug, Clone)]
pub enum Message {
    SubredditsChanged(String),
    LimitChanged(u32),
    RunAnalysis,
    AnalysisFinished(Result<AnalysisResult, String>),
    OpenLink(String),
    ExportCsv,
    ExportHtml,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Idle,
    Running,
    Success(String),
    Warning(String),
    Error(String),
}

impl Status {
    fn color(&self) -> Option<Color> {
        match self {
            Status::Idle | Status::Running => None,
            Status::Success(_) => Some(Color::from_rgb(0.0, 0.5, 0.0)),
            Status::Warning(_) => Some(Color::from_rgb(0.8, 0.5, 0.0)),
            Status::Error(_) => Some(Color::from_rgb(0.8, 0.0, 0.0)),
        }
    }

    fn message(&self) -> &str {
        match self {
            Status::Idle => "Enter subreddits and press Run Analysis",
            Status::Running => "Fetching and analyzing posts...",
            Status::Success(msg) | Status::Warning(msg) | Status::Error(msg) => msg,
        }
    }
}

/// Everything the window needs at startup: the shared fetch client, the
/// analysis context and the configured defaults.
#[derive(Clone)]
pub struct AppFlags {
    pub client: Arc<RedditClient>,
    pub context: Arc<AnalysisContext>,
    pub settings: Settings,
}

pub struct App {
    client: Arc<RedditClient>,
    context: Arc<AnalysisContext>,
    subreddits: String,
    limit: u32,
    result: AnalysisResult,
    status: Status,
}

impl App {
    pub fn new(flags: AppFlags) -> Self {
        let limit = flags
            .settings
            .default_limit
            .clamp(MIN_POST_LIMIT, MAX_POST_LIMIT);
        let status = if flags.context.uses_seed_lexicon() {
            Status::Warning(format!("Posts will be {}.", SEED_LEXICON_NOTICE))
        } else {
            Status::Idle
        };
        Self {
            client: flags.client,
            context: flags.context,
            subreddits: flags.settings.default_subreddits,
            limit,
            result: AnalysisResult::default(),
            status,
        }
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn result(&self) -> &AnalysisResult {
        &self.result
    }

    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }

    pub fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::SubredditsChanged(value) => {
                self.subreddits = value;
                Command::none()
            }
            Message::LimitChanged(limit) => {
                self.limit = limit;
                Command::none()
            }
            Message::RunAnalysis => self.start_analysis(),
            Message::AnalysisFinished(Ok(result)) => {
                let seed = self.context.uses_seed_lexicon();
                let summary = RunSummary::from_result(&result).with_seed_lexicon(seed);
                info!("{}", summary);
                self.status = if result.is_empty() {
                    Status::Warning("No posts were returned for the requested subreddits.".to_string())
                } else if seed {
                    Status::Warning(summary.to_string())
                } else {
                    Status::Success(summary.to_string())
                };
                self.result = result;
                Command::none()
            }
            Message::AnalysisFinished(Err(message)) => {
                self.status = Status::Error(message);
                Command::none()
            }
            Message::OpenLink(link) => {
                if let Err(e) = open::that(&link) {
                    warn!("Could not open {} in the browser: {}", link, e);
                }
                Command::none()
            }
            Message::ExportCsv => {
                self.export(DEFAULT_CSV_FILE, report::export_csv);
                Command::none()
            }
            Message::ExportHtml => {
                self.export(DEFAULT_HTML_FILE, report::export_html);
                Command::none()
            }
        }
    }

    fn start_analysis(&mut self) -> Command<Message> {
        if self.is_running() {
            return Command::none();
        }

        let request = match AnalysisRequest::parse(&self.subreddits, self.limit) {
            Ok(request) => request,
            Err(e) => {
                self.status = Status::Error(ErrorReporter::default().report_warning(&e));
                return Command::none();
            }
        };

        if request.communities.is_empty() {
            warn!("Run requested without any subreddit");
            self.result = AnalysisResult::default();
            self.status = Status::Warning("Please enter at least one subreddit.".to_string());
            return Command::none();
        }

        self.status = Status::Running;
        let client = Arc::clone(&self.client);
        let context = Arc::clone(&self.context);

        Command::perform(
            async move {
                run_analysis(client.as_ref(), context.as_ref(), &request)
                    .await
                    .map_err(|e| {
                        format!("Analysis failed: {}", ErrorReporter::default().report_error(&e))
                    })
            },
            Message::AnalysisFinished,
        )
    }

    fn export(&mut self, file_name: &str, write: fn(&AnalysisResult, &Path) -> Result<(), CoreError>) {
        if self.result.is_empty() {
            self.status = Status::Warning("Nothing to export yet. Run an analysis first.".to_string());
            return;
        }

        self.status = match write(&self.result, Path::new(file_name)) {
            Ok(()) => Status::Success(format!("Saved {} records to {}", self.result.len(), file_name)),
            Err(e) => Status::Error(ErrorReporter::default().report_error(&e)),
        };
    }

    pub fn view(&self) -> Element<Message, Theme> {
        let title: Element<Message, Theme> = text(APP_TITLE).size(24).into();

        let input = text_input("technology,AskReddit", &self.subreddits)
            .on_input(Message::SubredditsChanged)
            .on_submit(Message::RunAnalysis)
            .padding(8);

        let limit = row![
            text(format!("Posts per subreddit: {}", self.limit)).size(14),
            slider(MIN_POST_LIMIT..=MAX_POST_LIMIT, self.limit, Message::LimitChanged)
                .width(Length::Fixed(240.0)),
        ]
        .spacing(12);

        let run = button(text("Run Analysis"))
            .on_press_maybe((!self.is_running()).then_some(Message::RunAnalysis));
        let has_records = !self.result.is_empty();
        let export_csv = button(text("Download CSV"))
            .on_press_maybe(has_records.then_some(Message::ExportCsv));
        let export_html = button(text("Export HTML"))
            .on_press_maybe(has_records.then_some(Message::ExportHtml));

        let status = match self.status.color() {
            Some(color) => text(self.status.message()).size(14).style(color),
            None => text(self.status.message()).size(14),
        };

        let controls = column![
            input,
            limit,
            row![run, export_csv, export_html].spacing(10),
            status
        ]
        .spacing(12);

        let content: Element<Message, Theme> = if self.result.is_empty() {
            text("No results yet").size(16).into()
        } else {
            table::view(&self.result)
        };

        container(column![title, controls, content].spacing(20))
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(20)
            .into()
    }
}
