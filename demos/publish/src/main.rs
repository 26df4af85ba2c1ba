use clap::{Parser, ValueEnum};
use tracing::{info, warn};

use meta_core::{CancellationToken, GraphClient, GraphConfig, PollPolicy};
use meta_exec::instagram::media::{self, CarouselPost, ImagePost, VideoPost};
use meta_model::{PublishResult, VideoMediaType};
use meta_observe::{LoggerConfig, logger_init};

/// Publish one Instagram post through the Graph API.
///
/// Connection settings come from `META_*` environment variables.
#[derive(Debug, Parser)]
#[command(name = "publish")]
#[command(about = "Publish an image, video, reel or carousel to Instagram", long_about = None)]
struct Cli {
    /// What to publish
    #[arg(value_enum)]
    kind: Kind,

    /// Instagram business account id
    account_id: String,

    /// Media URLs; one for image/video/reel, 2 to 10 for a carousel
    #[arg(required = true, num_args = 1..)]
    urls: Vec<String>,

    /// Caption of the post
    #[arg(long)]
    caption: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Kind {
    Image,
    Video,
    Reel,
    Carousel,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1) Arguments
    let cli = Cli::parse();

    // 2) Logger
    let log_cfg = LoggerConfig::from_env()?;
    logger_init(&log_cfg)?;

    // 3) Client, one per run
    let config = GraphConfig::from_env()?;
    info!(
        base_url = %config.base_url,
        api_version = %config.api_version,
        "graph client configured"
    );
    let client = GraphClient::new(config)?;

    // 4) Ctrl+C cancels polling
    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received; cancelling");
            on_signal.cancel();
        }
    });

    // 5) Run
    let result = run(&client, cli, &cancel).await?;

    info!(media_id = %result.media_id, "done");
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

async fn run(
    client: &GraphClient,
    cli: Cli,
    cancel: &CancellationToken,
) -> meta_core::Result<PublishResult> {
    let Cli {
        kind,
        account_id,
        mut urls,
        caption,
    } = cli;

    match kind {
        Kind::Image => {
            let req = ImagePost {
                account_id,
                image_url: urls.swap_remove(0),
                caption,
            };
            media::create_image(client, &req).await
        }
        Kind::Video | Kind::Reel => {
            let media_type = match kind {
                Kind::Reel => VideoMediaType::Reels,
                _ => VideoMediaType::Video,
            };
            let req = VideoPost {
                account_id,
                video_url: urls.swap_remove(0),
                media_type,
                caption,
                poll: PollPolicy::default(),
            };
            media::create_video(client, &req, cancel).await
        }
        Kind::Carousel => {
            let req = CarouselPost {
                account_id,
                media_urls: urls,
                caption,
                poll: PollPolicy::default(),
            };
            media::create_carousel(client, &req, cancel).await
        }
    }
}
