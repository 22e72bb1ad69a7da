use image::{Rgba, RgbaImage};
use pic2html::processor::output_dimensions;
use pic2html::{Browser, RenderSettings, convert};

fn main() {
    println!("pic2html - Glyph Grid Sizing Demo");
    println!("=================================\n");

    // Create test images with various dimensions
    let test_cases = vec![
        (100, 100, "100x100 (square)"),
        (127, 85, "127x85 (landscape)"),
        (1920, 1080, "1920x1080 (Full HD)"),
        (60, 400, "60x400 (tall, narrower than the grid)"),
        (4000, 3, "4000x3 (extremely wide)"),
    ];

    for (width, height, description) in test_cases {
        println!("Testing: {}", description);

        // Create a test image with a gradient pattern
        let img = RgbaImage::from_fn(width, height, |x, y| {
            let gray = ((x + y) % 256) as u8;
            Rgba([gray, gray, gray, 255])
        });

        for browser in [Browser::Other, Browser::InternetExplorer] {
            let settings = RenderSettings {
                browser,
                ..Default::default()
            };
            let (columns, rows) =
                output_dimensions(width, height, &settings).expect("Invalid dimensions");
            let conversion = convert(&img, &settings).expect("Failed to convert");

            println!(
                "  {:?}: {}x{} glyphs ({}x{} rendered, {} bytes)",
                browser,
                columns,
                rows,
                conversion.columns,
                conversion.rows,
                conversion.markup.len()
            );
        }
        println!();
    }

    println!("All tests completed successfully!");
    println!("\nNote: rows are squashed to 43% (65% for IE) of the aspect-correct");
    println!("height because glyph cells are taller than they are wide.");
}
