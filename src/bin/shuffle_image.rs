use pane_shuffle::config::load_config;
use pane_shuffle::diagnostics::ShuffleTrace;
use pane_shuffle::geometry::Geometry;
use pane_shuffle::image::io::{load_image, save_image_u8, write_json_file};
use pane_shuffle::map::ShuffleMap;
use pane_shuffle::normalize::pow2_dimensions;
use serde::Serialize;
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let source = load_image(&config.input, config.color)?;
    let normalized = pow2_dimensions(&source, config.pad).map_err(|e| e.to_string())?;
    let geometry =
        Geometry::new(normalized.log_dim, config.log_panes).map_err(|e| e.to_string())?;
    let plan = config
        .maps
        .build_plan(geometry)
        .map_err(|e| format!("Invalid map configuration: {e}"))?;

    let (shuffled, trace) = plan
        .apply_with_trace(&normalized.image)
        .map_err(|e| e.to_string())?;
    let restored = plan.undo(&shuffled).map_err(|e| e.to_string())?;
    let round_trip_exact = restored == normalized.image;

    save_image_u8(&shuffled, &config.output.shuffled_image)?;
    println!(
        "Saved shuffled {}x{} image to {}",
        shuffled.w,
        shuffled.h,
        config.output.shuffled_image.display()
    );

    if let Some(path) = &config.output.restored_image {
        let (w, h) = normalized.original;
        let cropped = restored.crop(w, h).map_err(|e| e.to_string())?;
        save_image_u8(&cropped, path)?;
        println!("Saved restored image to {}", path.display());
    }

    if let Some(path) = &config.output.report_json {
        let summary = ShuffleSummary {
            original_width: normalized.original.0,
            original_height: normalized.original.1,
            outer_map: plan.outer(),
            inner_map: plan.inner(),
            round_trip_exact,
            trace,
        };
        write_json_file(path, &summary)?;
        println!("Saved report to {}", path.display());
    }

    if !round_trip_exact {
        return Err("restored image differs from the normalized input".to_string());
    }
    Ok(())
}

fn usage() -> String {
    "Usage: shuffle_image <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ShuffleSummary<'a> {
    original_width: usize,
    original_height: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    outer_map: Option<&'a ShuffleMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inner_map: Option<&'a ShuffleMap>,
    round_trip_exact: bool,
    trace: ShuffleTrace,
}
