use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use serde_json::json;

#[derive(Parser, Debug)]
#[command(name = "canopy", version)]
struct Cli {
    /// Log verbosity on stderr (repeat for more).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the builtin pattern catalog as JSON.
    Patterns,
    /// Evaluate a stored block and print one JSON line per sampled time.
    Sample(SampleArgs),
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// Input block JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Sampling step in seconds.
    #[arg(long, default_value_t = 0.1)]
    step: f64,

    /// Audio analysis JSON (`{"sampleRate": .., "samples": [..]}`).
    #[arg(long)]
    audio: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Patterns => cmd_patterns(),
        Command::Sample(args) => cmd_sample(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

fn cmd_patterns() -> anyhow::Result<()> {
    let catalog = canopy::PatternCatalog::builtin();
    let mut patterns = Vec::with_capacity(catalog.len());
    for pattern in catalog.iter() {
        let mut params = serde_json::Map::new();
        for (uniform, p) in pattern.user_params() {
            let default = canopy::encode_param_value(&p.value)
                .with_context(|| format!("encode default of '{uniform}'"))?;
            params.insert(
                uniform.to_owned(),
                json!({
                    "name": p.name,
                    "kind": p.value.kind_name(),
                    "default": default,
                    "min": p.min,
                    "max": p.max,
                    "step": p.step,
                }),
            );
        }
        patterns.push(json!({
            "name": pattern.name(),
            "shader": pattern.shader(),
            "params": params,
        }));
    }

    let out = serde_json::to_string_pretty(&patterns).context("encode catalog JSON")?;
    println!("{out}");
    Ok(())
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    if !args.step.is_finite() || args.step <= 0.0 {
        anyhow::bail!("--step must be > 0, got {}", args.step);
    }

    let catalog = canopy::PatternCatalog::builtin();
    let stored = canopy::SerializedBlock::from_path(&args.in_path)
        .with_context(|| format!("load block '{}'", args.in_path.display()))?;
    let mut block = canopy::deserialize_block(&stored, &catalog)
        .with_context(|| format!("decode block '{}'", args.in_path.display()))?;

    let audio = args
        .audio
        .as_ref()
        .map(|path| {
            canopy::AudioSignal::from_path(path)
                .with_context(|| format!("load audio analysis '{}'", path.display()))
        })
        .transpose()?;

    let start = block.start_time + block.render_offset;
    let steps = (block.duration / args.step).ceil().max(1.0) as u64;
    tracing::info!(pattern = block.pattern().name(), steps, "sampling block");

    for i in 0..steps {
        let t = start + i as f64 * args.step;
        block
            .update(t, audio.as_ref())
            .with_context(|| format!("evaluate block at t={t}"))?;

        let uniforms = block
            .uniforms()
            .iter()
            .filter(|(uniform, _)| *uniform != canopy::TEXTURE_UNIFORM)
            .map(|(uniform, p)| Ok((uniform.clone(), canopy::encode_param_value(&p.value)?)))
            .collect::<canopy::CanopyResult<serde_json::Map<String, serde_json::Value>>>()?;
        println!("{}", json!({ "time": t, "uniforms": uniforms }));
    }
    Ok(())
}
