mod api;
mod server;

use clap::{Args, Parser, Subcommand};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use post_optimizer::config::OptimizerConfig;
use post_optimizer::{
    format_delta, format_float, optimize_posts_with, OptimizationResult, PostCandidate,
};

#[derive(Parser)]
#[command(name = "post-optimizer", about = "Platform-aware social post optimizer")]
struct Cli {
    /// Path to the TOML config (defaults to config/optimizer.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    Optimize(OptimizeArgs),
    Serve(ServeArgs),
    InitConfig(InitConfigArgs),
}

#[derive(Args, Debug, Clone, Default)]
struct OptimizeArgs {
    /// Post text; repeat for a batch
    #[arg(long = "post")]
    posts: Vec<String>,
    /// Prior score for the post at the same position
    #[arg(long = "score")]
    scores: Vec<f64>,
    /// JSON file with `[{post, score}]` or `{"posts": [...]}`
    #[arg(long, conflicts_with = "posts")]
    input: Option<PathBuf>,
    #[arg(long)]
    platform: Option<String>,
    #[arg(long)]
    tone: Option<String>,
    #[arg(long)]
    audience: Option<String>,
    #[arg(long)]
    length: Option<String>,
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long)]
    host: Option<String>,
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug, Clone)]
struct InitConfigArgs {
    #[arg(long, default_value = "config/optimizer.toml")]
    path: PathBuf,
    #[arg(long)]
    force: bool,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Optimize(OptimizeArgs::default()));

    match command {
        Command::InitConfig(args) => run_init_config(args),
        Command::Optimize(args) => {
            let (config, _) = OptimizerConfig::load(cli.config).map_err(|err| err.to_string())?;
            run_optimize(args, &config)
        }
        Command::Serve(args) => {
            let (config, _) = OptimizerConfig::load(cli.config).map_err(|err| err.to_string())?;
            server::serve(args, config).await
        }
    }
}

fn run_optimize(args: OptimizeArgs, config: &OptimizerConfig) -> Result<(), String> {
    let catalog = config.catalog().map_err(|err| err.to_string())?;
    let posts = read_posts(&args)?;
    let options = config.options_with(args.platform, args.tone, args.audience, args.length);

    let result = optimize_posts_with(&catalog, &posts, &options).map_err(|err| err.to_string())?;

    if args.json {
        let payload = serde_json::to_string_pretty(&result)
            .map_err(|err| format!("failed to serialize result: {}", err))?;
        println!("{}", payload);
    } else {
        print_result(&result);
    }
    Ok(())
}

fn print_result(result: &OptimizationResult) {
    println!(
        "Platform: {} | tone: {} | length: {}",
        result.platform, result.tone, result.length
    );

    for (index, item) in result.items.iter().enumerate() {
        let original = item
            .original_score
            .map(|score| format_float(score, 1))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "\n#{} score {} -> {}",
            index,
            original,
            format_float(item.optimized_score, 1)
        );
        println!("{}", item.optimized_post);
        for reason in &item.reasons {
            println!("  - {}", reason);
        }
        for warning in &item.warnings {
            println!("  ! {}", warning);
        }
    }

    let winners: Vec<String> = result
        .summary
        .winners
        .iter()
        .map(|index| format!("#{}", index))
        .collect();
    println!(
        "\nAverage score delta: {} | winners: {}",
        format_delta(result.summary.avg_score_delta),
        winners.join(", ")
    );

    println!("\nGuidance:");
    for tip in &result.summary.guidance {
        println!("- {}", tip);
    }
}

fn read_posts(args: &OptimizeArgs) -> Result<Vec<PostCandidate>, String> {
    if !args.posts.is_empty() {
        return Ok(args
            .posts
            .iter()
            .enumerate()
            .map(|(index, post)| PostCandidate::new(post.clone(), args.scores.get(index).copied()))
            .collect());
    }

    let raw = match args.input.as_ref() {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|err| format!("failed reading {}: {}", path.display(), err))?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|err| format!("failed reading stdin: {}", err))?;
            buffer
        }
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("missing posts: pass --post, --input, or pipe stdin".to_string());
    }
    if trimmed.starts_with('[') || trimmed.starts_with('{') {
        let value: serde_json::Value = serde_json::from_str(trimmed)
            .map_err(|err| format!("failed to parse posts JSON: {}", err))?;
        return api::candidates_from_json(value).map_err(|err| err.to_string());
    }

    // Plain text: one post per non-empty line.
    Ok(trimmed
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| PostCandidate::new(line.trim(), None))
        .collect())
}

fn run_init_config(args: InitConfigArgs) -> Result<(), String> {
    if args.path.exists() && !args.force {
        return Err(format!(
            "{} already exists (use --force to overwrite)",
            args.path.display()
        ));
    }
    OptimizerConfig::default()
        .write(&args.path)
        .map_err(|err| err.to_string())?;
    println!("Wrote {}", args.path.display());
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "post_optimizer=info,tower_http=info".into()),
        )
        .with_writer(io::stderr)
        .init();
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
