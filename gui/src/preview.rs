//! In-window preview of the glyph output

use eframe::egui;
use egui::text::{LayoutJob, TextFormat};
use pic2html::{Color, RunSink};

/// Builds a colored text layout from run events
pub struct PreviewSink {
    job: LayoutJob,
    format: TextFormat,
    run: String,
}

impl PreviewSink {
    pub fn new(font_size: f32) -> Self {
        Self {
            job: LayoutJob::default(),
            format: TextFormat {
                font_id: egui::FontId::monospace(font_size),
                ..Default::default()
            },
            run: String::new(),
        }
    }

    fn flush(&mut self) {
        if !self.run.is_empty() {
            self.job.append(&self.run, 0.0, self.format.clone());
            self.run.clear();
        }
    }

    pub fn finish(mut self) -> LayoutJob {
        self.flush();
        self.job
    }
}

impl RunSink for PreviewSink {
    fn open_run(&mut self, color: Color) {
        self.flush();
        self.format.color = egui::Color32::from_rgb(color.r(), color.g(), color.b());
    }

    fn glyph(&mut self, glyph: char) {
        self.run.push(glyph);
    }

    fn close_run(&mut self) {
        self.flush();
    }

    fn end_row(&mut self) {
        self.run.push('\n');
        self.flush();
    }
}

/// Resolve an HTML background color for the preview frame
///
/// Accepts `#RRGGBB`, bare `RRGGBB` and the common color names. Anything
/// else falls back to black, the default page background.
pub fn parse_html_color(value: &str) -> egui::Color32 {
    let value = value.trim();
    let hex = value.strip_prefix('#').unwrap_or(value);
    if hex.len() == 6
        && hex.bytes().all(|b| b.is_ascii_hexdigit())
        && let Ok(rgb) = u32::from_str_radix(hex, 16)
    {
        return egui::Color32::from_rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8);
    }

    match value.to_ascii_lowercase().as_str() {
        "white" => egui::Color32::WHITE,
        "gray" | "grey" => egui::Color32::from_rgb(128, 128, 128),
        "silver" => egui::Color32::from_rgb(192, 192, 192),
        "red" => egui::Color32::from_rgb(255, 0, 0),
        "maroon" => egui::Color32::from_rgb(128, 0, 0),
        "green" => egui::Color32::from_rgb(0, 128, 0),
        "lime" => egui::Color32::from_rgb(0, 255, 0),
        "blue" => egui::Color32::from_rgb(0, 0, 255),
        "navy" => egui::Color32::from_rgb(0, 0, 128),
        "yellow" => egui::Color32::from_rgb(255, 255, 0),
        "purple" => egui::Color32::from_rgb(128, 0, 128),
        "teal" => egui::Color32::from_rgb(0, 128, 128),
        _ => egui::Color32::BLACK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_html_color_hex() {
        assert_eq!(
            parse_html_color("#FF8000"),
            egui::Color32::from_rgb(255, 128, 0)
        );
        assert_eq!(
            parse_html_color("00ff00"),
            egui::Color32::from_rgb(0, 255, 0)
        );
    }

    #[test]
    fn test_parse_html_color_names() {
        assert_eq!(parse_html_color("BLACK"), egui::Color32::BLACK);
        assert_eq!(parse_html_color("White"), egui::Color32::WHITE);
        assert_eq!(parse_html_color("no-such-color"), egui::Color32::BLACK);
    }

    #[test]
    fn test_parse_html_color_rejects_signed_hex() {
        assert_eq!(parse_html_color("+FFFFF"), egui::Color32::BLACK);
        assert_eq!(parse_html_color("#+FFFFF"), egui::Color32::BLACK);
    }

    #[test]
    fn test_preview_sections_follow_runs() {
        let mut sink = PreviewSink::new(10.0);
        sink.open_run(Color([255, 0, 0]));
        sink.glyph('0');
        sink.glyph('1');
        sink.close_run();
        sink.open_run(Color([0, 0, 255]));
        sink.glyph('0');
        sink.close_run();
        sink.end_row();
        let job = sink.finish();

        assert_eq!(job.text, "010\n");
        assert_eq!(job.sections.len(), 3);
        assert_eq!(
            job.sections[0].format.color,
            egui::Color32::from_rgb(255, 0, 0)
        );
        assert_eq!(
            job.sections[1].format.color,
            egui::Color32::from_rgb(0, 0, 255)
        );
    }
}
