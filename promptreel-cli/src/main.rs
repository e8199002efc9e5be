mod proxy;
mod render;
mod status;

use anyhow::Context;
use clap::Parser;
use promptreel_core::types::{AspectRatio, GenerationRequest, MediaArtifact};
use promptreel_engine::engine::{PollPolicy, PromptreelEngine};
use promptreel_engine::http::VeoVideoProvider;
use promptreel_providers::error::{GenerateError, user_facing_generate_error};
use promptreel_providers::veo::{DEFAULT_MODEL, VeoConfig};
use render::RenderTarget;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(
    name = "promptreel",
    about = "Generate videos from a text prompt",
    version
)]
struct Args {
    /// What the video should show
    prompt: String,

    /// Reference image the generation should start from
    #[arg(long)]
    image: Option<PathBuf>,

    /// Aspect ratio (16:9 or 9:16)
    #[arg(long)]
    aspect_ratio: Option<AspectRatio>,

    /// How many videos to request
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    count: u32,

    /// Requested clip length in seconds
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..))]
    duration_secs: u32,

    /// Directory the finished videos are written into
    #[arg(long, default_value = "videos")]
    out_dir: PathBuf,

    /// Send the request through a running promptreel proxy instead of
    /// calling the provider directly
    #[arg(long)]
    proxy: Option<String>,

    /// Provider API key (direct mode only; the proxy holds its own)
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Video model to use in direct mode
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Give up after this many status checks in direct mode (default: keep
    /// polling)
    #[arg(long, conflicts_with = "proxy")]
    max_checks: Option<u32>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let request = build_request(&args)?;

    // A new generation replaces whatever the previous one produced.
    let target = RenderTarget::new(&args.out_dir);
    target.clear_previous().context("clear previous outputs")?;

    let result = status::with_ticker(run(&args, &request)).await;

    match result {
        Ok(artifacts) => {
            let paths = target.render(&artifacts).context("write videos")?;
            for path in &paths {
                println!("wrote {}", path.display());
            }
            println!("Done. Generated {} video(s).", paths.len());
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {}", user_facing_generate_error(&e));
            std::process::exit(1);
        }
    }
}

async fn run(args: &Args, request: &GenerationRequest) -> Result<Vec<MediaArtifact>, GenerateError> {
    if let Some(base) = args.proxy.as_deref() {
        return proxy::generate_via_proxy(base, request).await;
    }

    let Some(api_key) = args.api_key.as_deref().filter(|k| !k.trim().is_empty()) else {
        return Err(GenerateError::MissingApiKey);
    };

    let cfg = VeoConfig::new(api_key).with_model(args.model.clone());
    let mut poll = PollPolicy::new();
    if let Some(max) = args.max_checks {
        poll = poll.with_max_checks(max);
    }

    let engine =
        PromptreelEngine::new(Arc::new(VeoVideoProvider::new(cfg))).with_poll_policy(poll);
    let generated = engine.run_generation(request).await?;
    Ok(generated.artifacts)
}

fn build_request(args: &Args) -> anyhow::Result<GenerationRequest> {
    let mut request = GenerationRequest::new(args.prompt.clone())
        .with_video_count(args.count)
        .with_duration_seconds(args.duration_secs);

    if let Some(ratio) = args.aspect_ratio {
        request = request.with_aspect_ratio(ratio);
    }

    if let Some(path) = &args.image {
        let bytes =
            std::fs::read(path).with_context(|| format!("read image {}", path.display()))?;
        request = request.with_reference_image(bytes, render::mime_for_image(path));
    }

    Ok(request)
}
