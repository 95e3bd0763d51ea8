//! Debug text overlay

use sketchpad_ipc::PointerObservation;
use tracing::warn;

use crate::constants::DEBUG_FONT_SIZE;
use crate::types::Image;

use super::target::DrawTarget;

/// Diagnostic lines: rates, document size, then the last pointer snapshot
pub fn overlay_lines(
    refresh_rate: u32,
    sampling_rate: u32,
    image: &Image,
    last_pointer: Option<&PointerObservation>,
) -> Vec<String> {
    let mut lines = vec![
        format!("refreshRate: {refresh_rate}"),
        format!("samplingRate: {sampling_rate}"),
        format!("strokes: {}", image.stroke_count()),
        format!("samples: {}", image.sample_count()),
    ];

    if let Some(pointer) = last_pointer {
        match pointer.debug_entries() {
            Ok(entries) => {
                lines.extend(
                    entries
                        .into_iter()
                        .map(|(key, value)| format!("pointer.{key}: {value}")),
                );
            }
            Err(e) => warn!("overlay: cannot describe pointer: {}", e),
        }
    }

    lines
}

/// Draw overlay lines top-left, one font height apart
pub fn draw_overlay<T: DrawTarget + ?Sized>(lines: &[String], target: &mut T) {
    for (i, line) in lines.iter().enumerate() {
        target.fill_text(line, 0.0, DEBUG_FONT_SIZE * (i + 1) as f64, DEBUG_FONT_SIZE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::target::{DrawCommand, RecordingTarget};

    #[test]
    fn test_lines_without_pointer() {
        let lines = overlay_lines(60, 120, &Image::new(), None);
        assert_eq!(
            lines,
            vec![
                "refreshRate: 60",
                "samplingRate: 120",
                "strokes: 0",
                "samples: 0"
            ]
        );
    }

    #[test]
    fn test_lines_with_pointer() {
        let obs = PointerObservation::at(5.0, 6.0, 0.5);
        let lines = overlay_lines(0, 0, &Image::new(), Some(&obs));
        assert_eq!(lines.len(), 4 + 10);
        assert_eq!(lines[4], "pointer.offsetX: 5");
        assert_eq!(lines[13], "pointer.pointerType: mouse");
    }

    #[test]
    fn test_draw_positions() {
        let mut target = RecordingTarget::new();
        draw_overlay(&["a".to_string(), "b".to_string()], &mut target);

        match &target.commands()[1] {
            DrawCommand::Text { text, x, y, font_size } => {
                assert_eq!(text, "b");
                assert_eq!(*x, 0.0);
                assert_eq!(*y, 20.0);
                assert_eq!(*font_size, 10.0);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
