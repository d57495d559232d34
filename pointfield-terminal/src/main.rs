/// Pointfield Terminal Demo - Spinning Crate
///
/// Loads a bitmap as a point cloud and spins it in the terminal.
/// Controls:
///   - Left drag: Rotate the crate
///   - Mouse wheel: Move the crate nearer or farther
///   - Q/ESC: Quit
use anyhow::Context;
use clap::Parser;
use log::info;
use pointfield_core::{RenderConfig, Scene, SceneScript};
use pointfield_terminal::TerminalApp;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pointfield", about = "Render a bitmap as a spinning point cloud")]
struct Args {
    /// 24-bit bitmap loaded into image 0
    #[arg(short, long, default_value = "crate.bmp")]
    image: PathBuf,

    /// JSON render configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Scene script to draw instead of the spinning crate
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Target frames per second
    #[arg(long, default_value_t = 25)]
    fps: u32,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => RenderConfig::from_json_file(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => RenderConfig::default(),
    };
    info!("Render config: {:?}", config);

    let mut scene = Scene::new(config.limits);
    if scene.load_image(0, &args.image) {
        info!("Loaded {}", args.image.display());
    }

    let animate = match &args.script {
        Some(path) => {
            let script = SceneScript::load(path)
                .with_context(|| format!("Failed to read scene script {}", path.display()))?;
            script
                .apply(&mut scene)
                .with_context(|| format!("Scene script {} does not fit", path.display()))?;
            false
        }
        None => true,
    };

    let mut app = TerminalApp::new(config, scene, animate, args.fps)
        .context("Failed to initialize terminal")?;
    app.run().context("Terminal renderer failed")?;

    Ok(())
}
