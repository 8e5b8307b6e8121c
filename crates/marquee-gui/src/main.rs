mod app;
mod screen;
mod style;
mod subscription;
mod theme;
mod toast;
mod widgets;

use clap::Parser;
use marquee_core::config::AppConfig;
use url::Url;

/// Desktop browser for a movie-recommendation service.
#[derive(Debug, Parser)]
#[command(name = "marquee", version)]
struct Cli {
    /// Override the service base URL from the config file.
    #[arg(long)]
    base_url: Option<String>,

    /// Browse as this user id (drives the for-you and history feeds).
    #[arg(long)]
    user: Option<u32>,
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter("marquee=debug")
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!("config load failed, using built-in defaults: {e}");
        AppConfig::default()
    });

    let base = cli
        .base_url
        .unwrap_or_else(|| config.service.base_url.clone());
    let base_url = match Url::parse(&base) {
        Ok(url) => url,
        Err(e) => {
            eprintln!("invalid service base URL {base:?}: {e}");
            std::process::exit(2);
        }
    };
    let user_id = cli.user.unwrap_or(config.detail.default_user);

    let flags = app::Flags {
        config,
        base_url,
        user_id,
    };

    iced::application(
        move || app::Marquee::new(flags.clone()),
        app::Marquee::update,
        app::Marquee::view,
    )
    .title(app::Marquee::title)
    .subscription(app::Marquee::subscription)
    .theme(app::Marquee::theme)
    .font(lucide_icons::LUCIDE_FONT_BYTES)
    .window_size(iced::Size::new(1200.0, 800.0))
    .centered()
    .run()
}
