use log::info;
use raw_image::config::mask;
use raw_image::image::io::{save_preview_png, write_json_file};
use raw_image::image::{MaskFlags, RawImage};
use raw_image::types::MaskReport;
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
    let config = mask::load_config(Path::new(&config_path))?;

    let mut image = RawImage::load_from_file(&config.input).map_err(|e| e.to_string())?;
    if let Some(value) = config.fill {
        image.set_all_pix(value);
    }

    let (flags, masked) = match &config.mask {
        Some(mask_path) => {
            let mask = RawImage::load_from_file(mask_path).map_err(|e| e.to_string())?;
            let masked = image
                .apply_mask(config.flags, &mask)
                .map_err(|e| format!("Failed to apply {}: {e}", mask_path.display()))?;
            (config.flags, masked)
        }
        None => (MaskFlags::empty(), 0),
    };
    info!("masked {masked} pixels with flags {flags:?}");

    image
        .save_to_file(&config.output.image)
        .map_err(|e| e.to_string())?;
    println!("Saved masked image to {}", config.output.image.display());

    if let Some(preview) = &config.output.preview {
        save_preview_png(&image, preview)?;
        println!("Saved preview to {}", preview.display());
    }
    if let Some(report_path) = &config.output.report_json {
        let report = MaskReport::new(&image, flags, masked);
        write_json_file(report_path, &report)?;
        println!("Saved report to {}", report_path.display());
    }

    Ok(())
}

fn usage() -> String {
    "Usage: mask_image <config.json>".to_string()
}
