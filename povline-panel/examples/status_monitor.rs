//! Headless status monitor
//!
//! Connects to a POV-Line device, prints what it finds, then prints every
//! status snapshot as the poller publishes it. Stops after `--polls N`
//! snapshots (default 10).
//!
//! Run with: cargo run -p povline-panel --example status_monitor
//!
//! Set POVLINE_DEVICE_URL to point at a device other than the default access
//! point address, and POVLINE_LOG_MODE=development to see panel logs.

use povline_panel::{
    init_logging_from_env, is_initialized, AssetListing, ControlPanel, PanelConfig, PanelError,
};

#[tokio::main]
async fn main() -> Result<(), PanelError> {
    if let Err(e) = init_logging_from_env() {
        eprintln!("logging unavailable: {}", e);
    }

    let polls = parse_poll_count().unwrap_or(10);
    let config = PanelConfig::from_env()?;
    println!("POV-Line status monitor");
    println!("=======================");
    println!("Device: {} (every {:?})", config.device_url, config.poll_interval);
    if !is_initialized() {
        println!("Panel logs: off (set POVLINE_LOG_MODE to enable)");
    }

    let mut panel = ControlPanel::new(config)?;
    panel.start().await?;

    match panel.images.listing() {
        AssetListing::NotLoaded => println!("Images: unavailable"),
        AssetListing::Empty => println!("Images: none stored"),
        AssetListing::Available(images) => {
            println!("Images:");
            for image in images {
                println!("  {} {}x{} {} ({} bytes)", image.name, image.width, image.height, image.format, image.size);
            }
        }
    }

    if let Some(config) = panel.device_config.config() {
        println!("Device name: {} ({} LEDs)", config.device_name, config.num_leds);
    }

    match panel.effects.available_effects().await {
        Ok(effects) => {
            let names: Vec<String> = effects.iter().map(|e| e.to_string()).collect();
            println!("Effects: {}", names.join(", "));
        }
        Err(e) => println!("Effects: {}", e.notice_text()),
    }

    let mut watcher = panel.watch_status();
    for _ in 0..polls {
        watcher.changed().await?;
        if let Some(status) = watcher.current() {
            println!(
                "{:<8} {:<16} {:>9}  speed {:>3}  brightness {:>3}  free {} KB  wifi {} ({})",
                status.state.to_string(),
                status.image,
                status.column_label(),
                status.speed,
                status.brightness,
                status.free_space_kb(),
                status.wifi_ssid,
                status.wifi_ip,
            );
        }
    }

    panel.shutdown().await
}

fn parse_poll_count() -> Option<usize> {
    let args: Vec<String> = std::env::args().collect();
    let index = args.iter().position(|arg| arg == "--polls")?;
    args.get(index + 1)?.parse().ok()
}
