use clap::Parser;
use faqmatch_api::{AppState, RestApi};
use faqmatch_core::{Matcher, MatcherConfig};
use faqmatch_storage::{load_corpus, ConversationLog, FeedbackLog};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// FAQ matching service for examination policy questions
#[derive(Parser, Debug)]
#[command(name = "faqmatch")]
#[command(about = "Answers free-text questions from a static knowledge base", long_about = None)]
struct Args {
    /// Path to the knowledge base JSON file
    #[arg(short, long, default_value = "./data/knowledge_base.json")]
    corpus: PathBuf,

    /// Path to the feedback log (JSON Lines)
    #[arg(long, default_value = "./data/feedback.jsonl")]
    feedback_file: PathBuf,

    /// Directory with a static frontend to serve at /
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// HTTP API port
    #[arg(long, default_value_t = 5000)]
    http_port: u16,

    /// Candidates kept from the vector stage
    #[arg(long, default_value_t = 5)]
    top_k: usize,

    /// Minimum cosine similarity for a vector match
    #[arg(long, default_value_t = 0.2)]
    vector_threshold: f32,

    /// Keyword-overlap score a fallback match must exceed
    #[arg(long, default_value_t = 0.3)]
    fallback_threshold: f32,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting faqmatch v{}", env!("CARGO_PKG_VERSION"));
    info!("Corpus: {:?}", args.corpus);
    info!("Feedback log: {:?}", args.feedback_file);
    info!("HTTP API port: {}", args.http_port);

    let config = MatcherConfig {
        top_k: args.top_k,
        vector_threshold: args.vector_threshold,
        fallback_threshold: args.fallback_threshold,
        ..MatcherConfig::default()
    };

    let corpus = load_corpus(&args.corpus)?;
    let matcher = Matcher::new(corpus, config)?;
    if !matcher.ranker().is_available() {
        warn!("Vector ranking unavailable; answering with keyword fallback only");
    }
    info!("Matcher ready: {} questions indexed", matcher.corpus().len());

    let state = Arc::new(AppState {
        matcher: Arc::new(matcher),
        conversations: Arc::new(ConversationLog::default()),
        feedback: Arc::new(FeedbackLog::open(&args.feedback_file)?),
    });

    let http_port = args.http_port;
    let static_dir = args.static_dir.clone();
    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on port {}", http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(state, http_port, static_dir).await {
                tracing::error!("HTTP server error: {}", e);
            }
        })
    });

    info!("faqmatch started successfully");
    info!("HTTP API: http://localhost:{}/api/chat", args.http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}
