//! Render every model in a reconstruction payload to PNG files.
//!
//! Run with: cargo run --example render_payload -- <payload.json> [options.json]
//!
//! Writes `<model>.png` into the current directory, one image per model that
//! passed validation, viewed from a slight orbit so depth is visible.

use std::env;
use std::process::ExitCode;

use reconview::*;

const WIDTH: u32 = 800;
const HEIGHT: u32 = 600;

fn run(payload_path: &str, options_path: Option<&str>) -> Result<()> {
    let options = match options_path {
        Some(path) => ViewerOptions::from_path(path)?,
        None => ViewerOptions::default(),
    };
    let payload = std::fs::read_to_string(payload_path)?;

    let mut viewer = Viewer::headless(options);
    viewer.load_payload(&payload)?;
    for (model, error) in viewer.model_errors() {
        log::warn!("skipping {model}: {error}");
    }

    // A short primary drag: 30 degrees of yaw, a little pitch.
    viewer.handle_pointer(PointerEvent::Down {
        button: PointerButton::Primary,
        position: Vec2::ZERO,
    });
    viewer.handle_pointer(PointerEvent::Move {
        position: Vec2::new(52.0, 20.0),
    });
    viewer.handle_pointer(PointerEvent::Up);

    let models: Vec<String> = viewer.registry().model_names().map(str::to_string).collect();
    for model in models {
        viewer.select_model(&model)?;
        let status = viewer.status();
        let filename = format!("{model}.png");
        render_to_file(&mut viewer, &filename, WIDTH, HEIGHT)?;
        println!(
            "{} ({} points) -> {filename}",
            status.active_label.unwrap_or(model),
            status.num_points
        );
    }

    viewer.teardown();
    Ok(())
}

fn main() -> ExitCode {
    init_logging();

    let args: Vec<String> = env::args().collect();
    let Some(payload_path) = args.get(1) else {
        eprintln!("usage: render_payload <payload.json> [options.json]");
        return ExitCode::FAILURE;
    };

    match run(payload_path, args.get(2).map(String::as_str)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
