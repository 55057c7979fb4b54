//! Material preview console application
//!
//! Loads the preview configuration and material library, meshes the preview
//! shapes and drives the session from commands on stdin:
//!
//! ```text
//! material_preview [config.toml|config.ron] < commands.txt
//! ```

mod console;

use std::io;
use std::path::PathBuf;

use material_preview::foundation::logging;
use material_preview::prelude::*;

use console::Command;

const DEFAULT_CONFIG_PATH: &str = "preview.toml";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_with_level(log::LevelFilter::Info);
    log::info!("Starting material previewer");

    let config_path = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let mut config = PreviewConfig::load_or_default(&config_path)?;
    config.validate()?;
    if let Some(config_dir) = config_path.parent() {
        config.resolve_paths(config_dir);
    }
    log::info!(
        "{} ({}x{}, {} px/unit)",
        config.window.title,
        config.window.width,
        config.window.height,
        config.pixels_per_unit
    );

    let materials = MaterialLibrary::load(&config.material_library)?;
    let mut session = match PreviewSession::from_config(&config, materials, SwatchRenderer::default()) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Failed to start preview session: {}", e);
            return Err(e.into());
        }
    };

    if let Err(e) = session.render_current() {
        log::warn!("Initial render failed: {}", e);
    }

    let mut recorder = CommandRecorder::default();
    let mut exported_generation = 0;
    present(&session, &mut recorder, &config, &mut exported_generation)?;

    for command in console::commands(io::stdin().lock()) {
        let Command::Key(key) = command else {
            break;
        };

        for held in command.frames() {
            for event in session.update(held) {
                log::info!("{:?}", event);
            }
        }
        log::debug!("Handled {}", key);

        present(&session, &mut recorder, &config, &mut exported_generation)?;
    }

    log::info!("Material previewer finished");
    Ok(())
}

/// Draw a frame, print the status line and export the texture if it changed
fn present(
    session: &PreviewSession<MaterialLibrary, SwatchRenderer>,
    recorder: &mut CommandRecorder,
    config: &PreviewConfig,
    exported_generation: &mut u64,
) -> Result<(), SessionError> {
    session.draw(recorder)?;
    console::log_frame(&recorder.take_commands());
    println!("{}", session.status_line());

    if let (Some(path), Some(texture)) = (&config.export_path, session.texture()) {
        if session.texture_generation() != *exported_generation {
            match texture.save_png(path) {
                Ok(()) => *exported_generation = session.texture_generation(),
                Err(e) => log::warn!("Texture export failed: {}", e),
            }
        }
    }
    Ok(())
}
