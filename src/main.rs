// Razer keyboard lighting driver
// Controls keys and effects through the razerkbd kernel driver's sysfs files

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use razer_driver::config::DriverConfig;
use tracing::debug;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.clone().unwrap_or_else(DriverConfig::default_path);
    debug!("Loading config from {:?}", config_path);
    let config = DriverConfig::load(&config_path)?;

    // Commands that don't talk to the keyboard
    if let Some(Commands::SetDevice { folder }) = cli.command {
        return commands::utility::set_device(&config_path, config, folder);
    }

    let printer = commands::create_printer_config(
        cli.monitor || cli.dry_run,
        cli.hex,
        cli.filter.as_deref(),
    )?;
    let target = commands::resolve_target(&config, cli.root, cli.device, printer, cli.dry_run);
    let mut keyboard = commands::open_keyboard(&target)?;

    match cli.command {
        None | Some(Commands::Info) => commands::query::info(&keyboard).await?,

        // === Effect Commands ===
        Some(Commands::Breathe { color, color2 }) => {
            commands::effect::breathe(&keyboard, color, color2).await?;
        }
        Some(Commands::Starlight {
            speed,
            color,
            color2,
        }) => {
            commands::effect::starlight(&keyboard, speed, color, color2).await?;
        }
        Some(Commands::Reactive { speed, color }) => {
            commands::effect::reactive(&keyboard, speed, color).await?;
        }
        Some(Commands::Spectrum) => commands::effect::spectrum(&keyboard).await?,
        Some(Commands::Static { color }) => commands::effect::static_color(&keyboard, color).await?,
        Some(Commands::Wave { left }) => commands::effect::wave(&keyboard, left).await?,
        Some(Commands::NoEffect) => commands::effect::none(&keyboard).await?,

        // === Indicator LEDs ===
        Some(Commands::GameLed { state }) => {
            commands::effect::game_led(&keyboard, state.is_on()).await?;
        }
        Some(Commands::MacroLed { state }) => {
            commands::effect::macro_led(&keyboard, state.is_on()).await?;
        }
        Some(Commands::MacroBlink { state }) => {
            commands::effect::macro_blink(&keyboard, state.is_on()).await?;
        }

        // === Custom Matrix Commands ===
        Some(Commands::Fill { color }) => commands::matrix::fill(&mut keyboard, color).await?,
        Some(Commands::Image { file }) => commands::matrix::image(&mut keyboard, &file).await?,
        Some(Commands::Rainbow { fps }) => commands::matrix::rainbow(&mut keyboard, fps).await?,

        // Handled before opening the keyboard
        Some(Commands::SetDevice { .. }) => {}
    }

    Ok(())
}
