//! Help overlay and material menu layout

use crate::assets::MaterialSource;
use crate::config::MenuLayout;
use crate::render::{colors, DisplaySurface, SurfaceError, TextLabel};

/// Help overlay shown while the material menu is closed
pub const HELP_TEXT: &str = "Material Previewer
---------------------------------
  F1 - Toggle material menu
  F2 - Reload material definitions
  Tab - Next preview shape
  Up/Down - Select material (menu)
  Enter - Render selected material (menu)";

/// Header drawn above the material list
pub const MENU_HEADER: &str = "Material Menu (press F1 to close)\n----------------------------";

/// Top-left corner of the menu entry at `index`
pub fn entry_position(layout: &MenuLayout, index: usize) -> [f32; 2] {
    [
        layout.list_offset[0],
        layout.list_offset[1] + layout.line_spacing * index as f32,
    ]
}

/// Help text followed by a status line
pub(crate) fn draw_help<D: DisplaySurface + ?Sized>(
    surface: &mut D,
    layout: &MenuLayout,
    status: &str,
) -> Result<(), SurfaceError> {
    surface.draw_text(&TextLabel::new(HELP_TEXT, layout.header_position, colors::WHITE))?;

    let help_height = surface.measure_text(HELP_TEXT)[1];
    let status_position = [
        layout.header_position[0],
        layout.header_position[1] + help_height + layout.line_spacing,
    ];
    surface.draw_text(&TextLabel::new(status, status_position, colors::WHITE))
}

/// Header plus one uid per line, with the selected entry highlighted
pub(crate) fn draw_menu<D, S>(
    surface: &mut D,
    layout: &MenuLayout,
    materials: &S,
    selected: usize,
) -> Result<(), SurfaceError>
where
    D: DisplaySurface + ?Sized,
    S: MaterialSource + ?Sized,
{
    surface.draw_text(&TextLabel::new(MENU_HEADER, layout.header_position, colors::WHITE))?;

    for index in 0..materials.count() {
        let Some(material) = materials.get(index) else {
            continue;
        };
        let position = entry_position(layout, index);

        if index == selected {
            let size = surface.measure_text(material.uid());
            surface.fill_rect(position, size, colors::DARK_RED)?;
        }

        surface.draw_text(&TextLabel::new(material.uid(), position, colors::WHITE))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{MaterialDefinition, MaterialLibrary};
    use crate::render::{CommandRecorder, DrawCommand};
    use approx::assert_relative_eq;

    #[test]
    fn test_entry_positions() {
        let layout = MenuLayout::default();
        assert_eq!(entry_position(&layout, 0), [22.0, 46.0]);
        let third = entry_position(&layout, 2);
        assert_relative_eq!(third[1], 76.0);
    }

    #[test]
    fn test_menu_highlights_selected_entry() {
        let library = MaterialLibrary::from_definitions(vec![
            MaterialDefinition::new("grass"),
            MaterialDefinition::new("rock"),
        ])
        .unwrap();
        let mut recorder = CommandRecorder::new([10.0, 12.0]);

        draw_menu(&mut recorder, &MenuLayout::default(), &library, 1).unwrap();

        let commands = recorder.take_commands();
        assert_eq!(commands.len(), 4);
        assert!(matches!(&commands[0], DrawCommand::Text(label) if label.text == MENU_HEADER));
        assert_eq!(
            commands[2],
            DrawCommand::Rect {
                position: [22.0, 61.0],
                size: [40.0, 12.0],
                color: colors::DARK_RED,
            }
        );
        assert!(matches!(&commands[3], DrawCommand::Text(label) if label.text == "rock"));
    }

    #[test]
    fn test_help_places_status_below_text() {
        let mut recorder = CommandRecorder::new([10.0, 10.0]);
        draw_help(&mut recorder, &MenuLayout::default(), "status").unwrap();

        let commands = recorder.take_commands();
        assert_eq!(commands.len(), 2);
        let DrawCommand::Text(status) = &commands[1] else {
            panic!("expected status text");
        };
        // 7 help lines of 10 px, then one line gap
        assert_relative_eq!(status.position[1], 16.0 + 70.0 + 15.0);
    }
}
