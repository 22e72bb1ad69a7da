mod app;
mod page;
mod preview;

use app::Pic2HtmlApp;
use eframe::egui;

fn main() -> eframe::Result {
    // Configure logging
    env_logger::init();

    // Configure viewport/window
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("pic2html")
            .with_icon(load_icon()),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "pic2html",
        options,
        Box::new(|cc| Ok(Box::new(Pic2HtmlApp::new(cc)))),
    )
}

/// Load application icon
fn load_icon() -> egui::IconData {
    // 32x32 icon: alternating '0' and '1' columns in shifting colors
    let icon_size = 32;
    let mut pixels = vec![0u8; icon_size * icon_size * 4];

    for y in 0..icon_size {
        for x in 0..icon_size {
            let idx = (y * icon_size + x) * 4;

            // Each 4x8 cell is a tiny glyph: a ring for 0, a bar for 1
            let cell_x = x % 4;
            let cell_y = y % 8;
            let is_one = (x / 4) % 2 == 1;
            let lit = if is_one {
                cell_x == 1
            } else {
                (cell_x == 0 || cell_x == 2) || cell_y == 0 || cell_y == 6
            };

            if lit && cell_y < 7 && cell_x < 3 {
                pixels[idx] = (x * 8) as u8; // R
                pixels[idx + 1] = 255 - (y * 8) as u8; // G
                pixels[idx + 2] = 128; // B
                pixels[idx + 3] = 255; // A
            } else {
                pixels[idx] = 0; // R
                pixels[idx + 1] = 0; // G
                pixels[idx + 2] = 0; // B
                pixels[idx + 3] = 255; // A
            }
        }
    }

    egui::IconData {
        rgba: pixels,
        width: icon_size as u32,
        height: icon_size as u32,
    }
}
