use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use docqa_indexer::DocumentIngestor;
use docqa_protocol::{serialize_json, IngestResponse, QueryResponse};
use docqa_rag::{CompletionClient, LlamaCppClient, RagService};
use docqa_vector_store::{EmbeddingMode, VectorStore};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

mod config;
mod http_api;

pub use config::{AppConfig, ConfigError, ConfigOverrides, ENV_PREFIX};
pub use http_api::{router, AppState};

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "docqa")]
#[command(about = "Answer questions from a folder of text documents", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for JSON)
    #[arg(long, global = true)]
    quiet: bool,

    /// TOML config file (overridden by DOCQA_* env vars and flags)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Folder of .txt documents to ingest
    #[arg(long, global = true)]
    docs_dir: Option<PathBuf>,

    /// Embedding backend: http|stub
    #[arg(long, global = true)]
    embedding_mode: Option<EmbeddingMode>,

    /// Completion endpoint, e.g. http://localhost:8080/completion
    #[arg(long, global = true)]
    llm_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest documents, then serve POST /query and GET /health
    Serve(ServeArgs),

    /// Ingest documents and report what was stored
    Ingest(IngestArgs),

    /// Ingest documents and answer a single question
    Ask(AskArgs),
}

#[derive(Args)]
struct ServeArgs {
    /// Bind address, e.g. 127.0.0.1:8000
    #[arg(long)]
    bind: Option<String>,
}

#[derive(Args)]
struct IngestArgs {
    /// Output JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct AskArgs {
    question: String,

    /// Number of context chunks to retrieve
    #[arg(long)]
    top_k: Option<usize>,

    /// Pretty-print JSON response
    #[arg(long)]
    pretty: bool,
}

/// Store, ingestion and query path wired to one shared store
struct Pipeline {
    store: Arc<VectorStore>,
    ingestor: DocumentIngestor,
    rag: Arc<RagService>,
}

impl Pipeline {
    fn build(config: &AppConfig) -> Result<Self> {
        let store = Arc::new(VectorStore::new(config.embedding_dim)?);
        let embedder = config
            .build_embedder()
            .context("Failed to set up embedding backend")?;
        let ingestor = DocumentIngestor::new(store.clone(), embedder.clone(), config.ingest())?;
        let completion: Arc<dyn CompletionClient> = Arc::new(LlamaCppClient::new(
            config.llm_url.clone(),
            config.llm_timeout(),
        )?);
        let rag = Arc::new(RagService::new(
            store.clone(),
            embedder,
            completion,
            config.rag(),
        ));

        Ok(Self {
            store,
            ingestor,
            rag,
        })
    }

    async fn ingest(&self) -> Result<docqa_indexer::IngestStats> {
        self.ingestor.ingest().await.with_context(|| {
            format!(
                "Failed to ingest documents from {}",
                self.ingestor.docs_dir().display()
            )
        })
    }
}

pub async fn main_entry() -> Result<()> {
    let mut cli = Cli::parse();

    // Keep stdout clean for JSON output
    let json_output = match &cli.command {
        Commands::Ingest(args) => args.json,
        Commands::Ask(_) => true,
        Commands::Serve(_) => false,
    };
    if json_output {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let overrides = ConfigOverrides {
        docs_dir: cli.docs_dir.clone(),
        embedding_mode: cli.embedding_mode,
        llm_url: cli.llm_url.clone(),
        top_k: match &cli.command {
            Commands::Ask(args) => args.top_k,
            _ => None,
        },
        bind: match &cli.command {
            Commands::Serve(args) => args.bind.clone(),
            _ => None,
        },
    };
    let config = AppConfig::resolve(cli.config.as_deref(), &overrides)
        .context("Failed to load configuration")?;

    match cli.command {
        Commands::Serve(_) => run_serve(config).await?,
        Commands::Ingest(args) => run_ingest(args, config).await?,
        Commands::Ask(args) => run_ask(args, config).await?,
    }

    Ok(())
}

async fn run_ingest(args: IngestArgs, config: AppConfig) -> Result<()> {
    let pipeline = Pipeline::build(&config)?;
    let stats = pipeline.ingest().await?;

    if args.json {
        print_stdout(&serialize_json(&IngestResponse {
            documents: stats.documents,
            chunks: stats.chunks,
        })?)?;
    } else {
        print_stdout(&format!(
            "Ingested {} documents ({} chunks) from {} in {} ms",
            stats.documents,
            stats.chunks,
            config.docs_dir.display(),
            stats.time_ms
        ))?;
        if stats.skipped_empty > 0 {
            print_stdout(&format!("Skipped {} empty documents", stats.skipped_empty))?;
        }
    }
    Ok(())
}

async fn run_ask(args: AskArgs, config: AppConfig) -> Result<()> {
    let pipeline = Pipeline::build(&config)?;
    pipeline.ingest().await?;

    let answer = pipeline.rag.answer(&args.question, config.top_k).await?;
    let response = QueryResponse::from(answer);
    let output = if args.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serialize_json(&response)?
    };
    print_stdout(&output)
}

async fn run_serve(config: AppConfig) -> Result<()> {
    let pipeline = Pipeline::build(&config)?;
    let stats = pipeline.ingest().await?;
    log::info!(
        "Vector store ready: {} chunks from {} documents",
        pipeline.store.len(),
        stats.documents
    );

    let app = router(AppState {
        store: pipeline.store,
        rag: pipeline.rag,
    });

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    let local_addr = listener.local_addr()?;
    let base_url = format!("http://{local_addr}");

    print_stdout(&format!("Serving query API: {base_url}/query"))?;
    print_stdout(&format!("Health endpoint: {base_url}/health"))?;
    print_stdout(&format!(
        "Try: curl -X POST {base_url}/query -H 'Content-Type: application/json' -d '{{\"question\": \"What is RAG?\"}}'"
    ))?;
    axum::serve(listener, app).await?;
    Ok(())
}
