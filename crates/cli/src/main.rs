use anyhow::{Context, Result, bail};
use backend::HttpBackend;
use clap::{Parser, Subcommand, ValueEnum};
use finch_core::{Config, RefineToggle, present_constraints};
use session::{RevealSequencer, RevealStage, STAGE_STAGGER, ScorecardSummary, SearchSession, TraceView};
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "finch")]
#[command(about = "Financing-aware shopping search")]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortArg {
  LowestMonthly,
  LowestTotal,
  ShortestTerm,
}

impl SortArg {
  fn toggle(self) -> RefineToggle {
    match self {
      SortArg::LowestMonthly => RefineToggle::LowestMonthly,
      SortArg::LowestTotal => RefineToggle::LowestTotal,
      SortArg::ShortestTerm => RefineToggle::ShortestTerm,
    }
  }
}

#[derive(Subcommand)]
enum Commands {
  /// Run a search against the ranking service
  Search {
    query: String,
    /// Only show 0% APR offers
    #[arg(long)]
    zero_apr: bool,
    /// Sort order
    #[arg(long, value_enum)]
    sort: Option<SortArg>,
    /// Show the pipeline trace even when diagnostics are off in config
    #[arg(long)]
    trace: bool,
    /// Output the raw response as JSON
    #[arg(long)]
    json: bool,
  },
  /// Fetch the search quality scorecard
  Scorecard {
    /// Output as JSON
    #[arg(long)]
    json: bool,
  },
  /// Check whether the ranking service is reachable
  Health,
  /// Print the config template, or write it with --init
  Config {
    /// Write the template to .finch/config.toml in the current directory
    #[arg(long)]
    init: bool,
  },
}

/// Initialize logging for CLI commands (console only)
fn init_cli_logging() {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
    .init();
}

fn load_config() -> Config {
  let cwd = std::env::current_dir().unwrap_or_else(|_| std::path::PathBuf::from("."));
  Config::load_for_project(&cwd)
}

fn build_backend(config: &Config) -> HttpBackend {
  HttpBackend::with_timeout(Duration::from_secs(config.backend.timeout_secs)).with_base_url(&config.backend.base_url)
}

fn build_session(config: &Config, backend: HttpBackend) -> SearchSession {
  if config.search.send_session_id {
    SearchSession::new(Arc::new(backend))
  } else {
    SearchSession::anonymous(Arc::new(backend))
  }
}

#[tokio::main]
async fn main() -> Result<()> {
  init_cli_logging();
  let cli = Cli::parse();

  match cli.command {
    Commands::Search {
      query,
      zero_apr,
      sort,
      trace,
      json,
    } => cmd_search(&query, zero_apr, sort, trace, json).await,
    Commands::Scorecard { json } => cmd_scorecard(json).await,
    Commands::Health => cmd_health().await,
    Commands::Config { init } => cmd_config(init),
  }
}

async fn cmd_search(query: &str, zero_apr: bool, sort: Option<SortArg>, trace: bool, json: bool) -> Result<()> {
  let config = load_config();
  let session = build_session(&config, build_backend(&config));

  // Toggles first so the submit composes them into the payload. There is
  // no query in the session yet, so these do not trigger a call.
  if zero_apr {
    session.toggle_refine(RefineToggle::OnlyZeroApr).await;
  }
  if let Some(sort) = sort {
    session.toggle_refine(sort.toggle()).await;
  }

  session.submit(query).await;
  let snapshot = session.snapshot();

  if let Some(message) = &snapshot.error {
    bail!("{message}");
  }
  let Some(response) = snapshot.result.clone() else {
    bail!("Enter a search query.");
  };

  if json {
    println!("{}", serde_json::to_string_pretty(response.as_ref())?);
    return Ok(());
  }

  if !response.has_results() {
    println!("No offers matched \"{}\".", response.query);
    return Ok(());
  }

  // Stage the output the way the app staggers its result subsections
  let mut sequencer = RevealSequencer::new();
  sequencer.observe(&snapshot);
  for stage in RevealStage::ALL {
    while !sequencer.is_revealed(stage) {
      tokio::time::sleep(STAGE_STAGGER).await;
      sequencer.advance(STAGE_STAGGER);
    }
    print_stage(stage, &response);
  }

  for disclaimer in &response.disclaimers {
    println!("  {disclaimer}");
  }

  let trace_view = {
    let mut view = TraceView::new(config.diagnostics.debug_trace || trace);
    view.toggle();
    view
  };
  if trace_view.is_visible(&response) && trace_view.is_expanded() {
    println!("\nPipeline trace:");
    for step in trace_view.visible_steps(&response) {
      println!("  {:<12} {:>7.1}ms  {}", step.step, step.ms, step.notes);
    }
    println!("  total: {:.1}ms", trace_view.total_ms(&response));
  }

  Ok(())
}

fn print_stage(stage: RevealStage, response: &finch_core::SearchResponse) {
  match stage {
    RevealStage::Summary => {
      println!("{}", response.ai_summary);
      let chips = present_constraints(&response.applied_constraints);
      if !chips.is_empty() {
        println!("[{}]", chips.join("] ["));
      }
      println!();
    }
    RevealStage::Recommended => {
      if let Some(offer) = response.recommended() {
        println!(
          "* {} — {} (${:.0}, ${:.2}/mo over {} months, {:.1}% APR)",
          offer.merchant_name, offer.product_name, offer.total_price, offer.monthly_payment, offer.term_months,
          offer.apr
        );
        if !response.why_this_recommendation.is_empty() {
          println!("  {}", response.why_this_recommendation);
        }
        println!();
      }
    }
    RevealStage::Alternates => {
      for offer in response.alternates() {
        println!(
          "  {} — {} (${:.0}, ${:.2}/mo)",
          offer.merchant_name, offer.product_name, offer.total_price, offer.monthly_payment
        );
      }
      if !response.alternates().is_empty() {
        println!();
      }
    }
  }
}

async fn cmd_scorecard(json: bool) -> Result<()> {
  let config = load_config();
  let session = build_session(&config, build_backend(&config));

  let scorecard = match session.scorecard().await {
    Ok(scorecard) => scorecard,
    Err(e) => bail!("{}", e.display_message()),
  };

  if json {
    println!("{}", serde_json::to_string_pretty(&scorecard)?);
    return Ok(());
  }

  let summary = ScorecardSummary::from_scorecard(&scorecard);
  println!(
    "Pass rate: {:.0}% ({}/{})  constraint adherence: {:.0}%",
    summary.pass_rate_pct, summary.passed, summary.total_queries, summary.constraint_adherence_pct
  );
  println!(
    "Latency: avg {:.0}ms, p95 {:.0}ms",
    summary.avg_latency_ms, summary.p95_latency_ms
  );

  if !summary.step_latencies.is_empty() {
    println!("\nStep latency (avg ms):");
    for (step, ms) in &summary.step_latencies {
      println!("  {step:<12} {ms:>7.1}");
    }
  }

  if !scorecard.queries.is_empty() {
    println!("\nPer-query results:");
    for query in &scorecard.queries {
      println!(
        "  [{}] {} — {} results, {:.0}ms, constraint {}",
        if query.passed { "PASS" } else { "FAIL" },
        query.query,
        query.result_count,
        query.latency_ms,
        if query.constraint_ok { "OK" } else { "FAIL" },
      );
    }
  }

  Ok(())
}

async fn cmd_health() -> Result<()> {
  let config = load_config();
  let backend = build_backend(&config);
  if backend.check_health().await {
    println!("ok: {}", backend.base_url());
    Ok(())
  } else {
    bail!("search service unreachable at {}", backend.base_url());
  }
}

fn cmd_config(init: bool) -> Result<()> {
  let template = Config::generate_template();
  if !init {
    print!("{template}");
    return Ok(());
  }

  let cwd = std::env::current_dir().context("Failed to resolve current directory")?;
  let path = Config::project_config_path(&cwd);
  if path.exists() {
    bail!("{} already exists", path.display());
  }
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent).context("Failed to create config directory")?;
  }
  std::fs::write(&path, template).context("Failed to write config")?;
  println!("Wrote {}", path.display());
  Ok(())
}
