//! End-to-end preview session behaviour with the built-in swatch renderer

use std::fs;
use std::path::Path;

use material_preview::prelude::*;
use material_preview::render::DrawCommand;

const LIBRARY: &str = r##"[
    (uid: "grass", attributes: {"color": "#3a7d2c"}),
    (uid: "sand", attributes: {"color": "#e0c080"}),
    (uid: "broken", attributes: {"color": "not a colour"}),
]"##;

fn write_library(dir: &Path, contents: &str) -> std::path::PathBuf {
    let path = dir.join("materials.ron");
    fs::write(&path, contents).unwrap();
    path
}

fn start(dir: &Path) -> PreviewSession<MaterialLibrary, SwatchRenderer> {
    let mut config = PreviewConfig::default();
    config.material_library = write_library(dir, LIBRARY);
    config.render.preview_quality = true;

    let materials = MaterialLibrary::load(&config.material_library).unwrap();
    PreviewSession::from_config(&config, materials, SwatchRenderer::new(256)).unwrap()
}

fn tap(session: &mut PreviewSession<MaterialLibrary, SwatchRenderer>, key: PreviewKey) -> Vec<SessionEvent> {
    let events = session.update(KeySet::key(key));
    session.update(KeySet::empty());
    events
}

#[test]
fn test_menu_wraps_both_ways() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = start(dir.path());

    tap(&mut session, PreviewKey::ToggleMenu);
    tap(&mut session, PreviewKey::SelectUp);
    assert_eq!(session.selected_index(), 2);
    tap(&mut session, PreviewKey::SelectDown);
    assert_eq!(session.selected_index(), 0);
}

#[test]
fn test_render_and_toggle_shape() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = start(dir.path());

    tap(&mut session, PreviewKey::ToggleMenu);
    let events = tap(&mut session, PreviewKey::Confirm);
    assert_eq!(events, vec![SessionEvent::Rendered { uid: "grass".to_string() }]);

    // Default screen rectangle: 512 px at 35 px/unit, rendered at 35 px/unit
    let texture = session.texture().unwrap();
    assert_eq!(texture.dimensions(), (256, 256));
    assert_eq!(texture.pixel(128, 128), Some([0x3a, 0x7d, 0x2c, 255]));

    tap(&mut session, PreviewKey::ToggleShape);
    assert_eq!(session.active_shape_index(), 1);
    assert_eq!(session.texture_generation(), 2);

    let mut recorder = CommandRecorder::default();
    session.draw(&mut recorder).unwrap();
    assert!(recorder
        .commands()
        .iter()
        .any(|c| matches!(c, DrawCommand::Mesh { triangle_count: 11, .. })));
}

#[test]
fn test_render_failure_keeps_previous_texture() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = start(dir.path());

    tap(&mut session, PreviewKey::ToggleMenu);
    tap(&mut session, PreviewKey::Confirm);
    let before = session.texture().cloned().unwrap();

    tap(&mut session, PreviewKey::SelectUp);
    assert_eq!(session.selected_material().map(MaterialDefinition::uid), Some("broken"));

    let events = tap(&mut session, PreviewKey::Confirm);
    assert!(matches!(events.as_slice(), [SessionEvent::RenderFailed { .. }]));
    assert_eq!(session.texture(), Some(&before));
}

#[test]
fn test_reload_picks_up_edits_and_survives_bad_files() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = start(dir.path());

    tap(&mut session, PreviewKey::ToggleMenu);
    tap(&mut session, PreviewKey::SelectUp);
    tap(&mut session, PreviewKey::ToggleMenu);
    assert_eq!(session.selected_index(), 2);

    // Shorter list: selection wraps back to the start
    write_library(dir.path(), r#"[(uid: "grass"), (uid: "sand")]"#);
    let events = tap(&mut session, PreviewKey::Reload);
    assert_eq!(
        events,
        vec![
            SessionEvent::Reloaded { count: 2 },
            SessionEvent::Rendered { uid: "grass".to_string() },
        ]
    );
    assert_eq!(session.selected_index(), 0);
    assert_eq!(session.texture_generation(), 1);

    write_library(dir.path(), "[(uid: ");
    let events = tap(&mut session, PreviewKey::Reload);
    assert!(matches!(events.as_slice(), [SessionEvent::ReloadFailed { .. }]));
    assert_eq!(session.materials().count(), 2);
}

#[test]
fn test_export_current_texture() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = start(dir.path());
    session.render_current().unwrap();

    let path = dir.path().join("swatch.png");
    session.texture().unwrap().save_png(&path).unwrap();
    assert!(path.exists());
}
