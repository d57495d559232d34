/// Example: Render one frame of the crate and save it as a PGM image
///
/// Usage: cargo run --example snapshot -- path/to/crate.bmp out.pgm [x_rot y_rot]
use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use pointfield_core::{Canvas, CrateAnimation, RenderConfig, Scene};

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: {} <bitmap> <output.pgm> [x_rot y_rot]", args[0]);
        std::process::exit(1);
    }

    let angle = |i: usize| args.get(i).and_then(|a| a.parse::<f32>().ok()).unwrap_or(30.0);

    let config = RenderConfig::default();
    let mut scene = Scene::new(config.limits);
    if !scene.load_image(0, &args[1]) {
        eprintln!("Could not load {}, rendering an empty frame", args[1]);
    }

    let pose = CrateAnimation {
        x_rot: angle(3),
        y_rot: angle(4),
        z_loc: 0.0,
    };
    pose.apply(&mut scene, 0, 0);

    let mut canvas = Canvas::new(config.canvas_width, config.canvas_height);
    canvas.clear();
    let stats = canvas.render(&scene, &config);
    println!("Plotted {} of {} points", stats.plotted, stats.samples);

    // PGM rows run top to bottom; canvas row 0 is the bottom
    let mut out = BufWriter::new(File::create(&args[2])?);
    write!(out, "P5\n{} {}\n255\n", canvas.width(), canvas.height())?;
    for y in (0..canvas.height()).rev() {
        for x in 0..canvas.width() {
            out.write_all(&[canvas.brightness_at(x, y).unwrap_or(0)])?;
        }
    }
    out.flush()?;

    println!("Wrote {}", args[2]);
    Ok(())
}
