/// Basic example: Convert a simple test image to glyph HTML
///
/// This creates a test image with some basic shapes and writes a standalone
/// HTML page showing it as colored glyphs
use image::{Rgba, RgbaImage};
use pic2html::{ColorMode, RenderSettings, convert};

fn main() {
    println!("pic2html - Basic Example");
    println!("========================\n");

    let width = 320;
    let height = 240;
    let mut img = RgbaImage::from_pixel(width, height, Rgba([40, 60, 120, 255]));

    // Draw a yellow circle in the center
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;
    let radius = 80.0;

    for y in 0..height {
        for x in 0..width {
            let dx = x as f32 - center_x;
            let dy = y as f32 - center_y;
            let dist = (dx * dx + dy * dy).sqrt();

            if dist < radius {
                img.put_pixel(x, y, Rgba([250, 210, 40, 255]));
            } else if (dist - radius).abs() < 6.0 {
                img.put_pixel(x, y, Rgba([0, 0, 0, 255]));
            }
        }
    }

    println!("Created test image: {}x{}", width, height);

    for (mode, file) in [
        (ColorMode::None, "basic_color.html"),
        (ColorMode::Grayscale, "basic_grayscale.html"),
        (ColorMode::Monochrome, "basic_monochrome.html"),
    ] {
        let settings = RenderSettings {
            width: 80,
            characters: "pic2html".to_string(),
            color_mode: mode,
            ..Default::default()
        };

        let conversion = convert(&img, &settings).expect("Failed to convert");
        let page = format!(
            "<html><body bgcolor=\"{}\">\n{}</td></tr></table>\n</body></html>\n",
            settings.bgcolor, conversion.markup
        );
        std::fs::write(file, page).expect("Failed to write output");

        println!(
            "✓ {:<10} {}x{} glyphs, {} bytes in {:?} -> {}",
            mode.name(),
            conversion.columns,
            conversion.rows,
            conversion.markup.len(),
            conversion.elapsed,
            file
        );
    }

    println!("\nConversion complete!");
}
