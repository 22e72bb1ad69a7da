use crate::page::{render_error_page, render_page};
use crate::preview::{PreviewSink, parse_html_color};
use eframe::egui;
use image::RgbaImage;
use pic2html::config::MAX_WIDTH;
use pic2html::{
    Browser, ColorMode, Conversion, HtmlSink, RenderSettings, Resampling, TextType, convert_many,
    render_with, wrap_document,
};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Main application state for the pic2html GUI
pub struct Pic2HtmlApp {
    /// Input image (original)
    input_image: Option<RgbaImage>,
    /// Where the input image was loaded from
    input_path: Option<PathBuf>,
    /// Conversion settings
    settings: RenderSettings,

    /// Last successful conversion
    conversion: Option<Conversion>,
    /// Colored glyph layout of the last conversion
    preview: Option<egui::text::LayoutJob>,
    /// Point size of preview glyphs
    preview_font_size: f32,

    /// Texture handle for input image display
    input_texture: Option<egui::TextureHandle>,

    /// Whether to automatically reprocess when settings change
    auto_process: bool,
    /// Flag indicating settings have changed and reprocessing is needed
    needs_reprocess: bool,

    /// Last processing time in milliseconds
    last_process_time_ms: f64,
    /// Message to display (if any)
    error_message: Option<String>,
}

impl Default for Pic2HtmlApp {
    fn default() -> Self {
        Self {
            input_image: None,
            input_path: None,
            settings: RenderSettings::default(),
            conversion: None,
            preview: None,
            preview_font_size: 8.0,
            input_texture: None,
            auto_process: true,
            needs_reprocess: false,
            last_process_time_ms: 0.0,
            error_message: None,
        }
    }
}

impl Pic2HtmlApp {
    /// Create a new pic2html application
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self::default()
    }

    /// Load an image from file path
    pub fn load_image(&mut self, path: &Path) {
        match image::open(path) {
            Ok(img) => {
                let rgba = img.to_rgba8();
                log::info!(
                    "loaded {} ({}x{})",
                    path.display(),
                    rgba.width(),
                    rgba.height()
                );

                self.input_image = Some(rgba);
                self.input_path = Some(path.to_path_buf());
                self.input_texture = None; // Clear old texture
                self.conversion = None;
                self.preview = None;
                self.needs_reprocess = true;
                self.error_message = None;
            }
            Err(e) => {
                self.error_message = Some(format!("Failed to load image: {}", e));
            }
        }
    }

    /// Save the converted output as a standalone HTML page
    pub fn save_output(&self, path: &Path) -> Result<(), String> {
        match &self.conversion {
            Some(conversion) => std::fs::write(path, render_page(conversion))
                .map_err(|e| format!("Failed to save: {}", e)),
            None => Err("No output to save".to_string()),
        }
    }

    /// Convert several image files at once, writing `<name>.html` next to each
    fn batch_convert(&mut self, paths: &[PathBuf]) {
        let mut failures = Vec::new();
        let mut images = Vec::new();
        let mut targets = Vec::new();

        for path in paths {
            match image::open(path) {
                Ok(img) => {
                    images.push(img.to_rgba8());
                    targets.push(path.with_extension("html"));
                }
                Err(e) => failures.push(format!("{}: {}", path.display(), e)),
            }
        }

        let start = Instant::now();
        let results = convert_many(&images, &self.settings);
        log::info!(
            "batch converted {} images in {:?}",
            images.len(),
            start.elapsed()
        );

        for (target, result) in targets.iter().zip(results) {
            let page = match result {
                Ok(conversion) => render_page(&conversion),
                Err(e) => {
                    failures.push(format!("{}: {}", target.display(), e));
                    render_error_page(&e.to_string())
                }
            };
            if let Err(e) = std::fs::write(target, page) {
                failures.push(format!("{}: {}", target.display(), e));
            }
        }

        self.error_message = if failures.is_empty() {
            Some(format!("Converted {} images", targets.len()))
        } else {
            Some(failures.join("\n"))
        };
    }

    /// Process the input image with current settings
    fn process(&mut self) {
        let Some(ref input) = self.input_image else {
            return;
        };
        let start = Instant::now();

        // One pass feeds both the HTML and the preview so random glyphs agree
        let mut sinks = (HtmlSink::new(), PreviewSink::new(self.preview_font_size));
        match render_with(input, &self.settings, &mut sinks) {
            Ok((columns, rows)) => {
                let (html, preview) = sinks;
                let elapsed = start.elapsed();
                self.conversion = Some(Conversion {
                    markup: wrap_document(&self.settings, html.as_str()),
                    columns,
                    rows,
                    elapsed,
                });
                self.preview = Some(preview.finish());
                self.last_process_time_ms = elapsed.as_secs_f64() * 1000.0;
                self.error_message = None;
            }
            Err(e) => {
                log::warn!("conversion failed: {}", e);
                self.conversion = None;
                self.preview = None;
                self.error_message = Some(format!("Conversion failed: {}", e));
            }
        }
        self.needs_reprocess = false;
    }

    /// Render the control panel UI
    fn render_controls(&mut self, ui: &mut egui::Ui) -> bool {
        let mut changed = false;

        ui.heading("Settings");
        ui.separator();

        // Output size
        ui.collapsing("Output", |ui| {
            changed |= ui
                .add(egui::Slider::new(&mut self.settings.width, 1..=MAX_WIDTH).text("Width"))
                .on_hover_text("Glyphs per row")
                .changed();

            egui::ComboBox::from_label("Browser")
                .selected_text(match self.settings.browser {
                    Browser::InternetExplorer => "Internet Explorer",
                    Browser::Other => "Other",
                })
                .show_ui(ui, |ui| {
                    changed |= ui
                        .selectable_value(&mut self.settings.browser, Browser::Other, "Other")
                        .changed();
                    changed |= ui
                        .selectable_value(
                            &mut self.settings.browser,
                            Browser::InternetExplorer,
                            "Internet Explorer",
                        )
                        .changed();
                });

            egui::ComboBox::from_label("Resampling")
                .selected_text(format!("{:?}", self.settings.resampling))
                .show_ui(ui, |ui| {
                    changed |= ui
                        .selectable_value(&mut self.settings.resampling, Resampling::Blend, "Blend")
                        .on_hover_text("Pairwise average when shrinking")
                        .changed();
                    changed |= ui
                        .selectable_value(
                            &mut self.settings.resampling,
                            Resampling::Smooth,
                            "Smooth",
                        )
                        .on_hover_text("Lanczos3 filtering")
                        .changed();
                });
        });

        ui.add_space(8.0);

        // Glyph settings
        ui.collapsing("Glyphs", |ui| {
            ui.label("Characters");
            changed |= ui
                .text_edit_singleline(&mut self.settings.characters)
                .changed();

            ui.horizontal(|ui| {
                changed |= ui
                    .radio_value(&mut self.settings.text_type, TextType::Sequence, "Sequence")
                    .changed();
                changed |= ui
                    .radio_value(&mut self.settings.text_type, TextType::Random, "Random")
                    .changed();
            });

            ui.add_enabled_ui(self.settings.text_type == TextType::Random, |ui| {
                let mut fixed = self.settings.seed.is_some();
                if ui
                    .checkbox(&mut fixed, "Fixed seed")
                    .on_hover_text("Repeatable random glyphs")
                    .changed()
                {
                    self.settings.seed = fixed.then_some(0);
                    changed = true;
                }
                if let Some(seed) = self.settings.seed.as_mut() {
                    changed |= ui.add(egui::DragValue::new(seed)).changed();
                }
            });
        });

        ui.add_space(8.0);

        // Color settings
        ui.collapsing("Colors", |ui| {
            for mode in [ColorMode::None, ColorMode::Grayscale, ColorMode::Monochrome] {
                changed |= ui
                    .radio_value(&mut self.settings.color_mode, mode, mode.name())
                    .changed();
            }

            ui.add_space(4.0);

            ui.label("Background");
            changed |= ui.text_edit_singleline(&mut self.settings.bgcolor).changed();
            ui.label("Font size");
            changed |= ui.text_edit_singleline(&mut self.settings.fontsize).changed();
        });

        ui.add_space(8.0);

        ui.collapsing("Preview", |ui| {
            changed |= ui
                .add(egui::Slider::new(&mut self.preview_font_size, 4.0..=16.0).text("Glyph size"))
                .changed();
        });

        ui.add_space(16.0);
        ui.separator();

        // Auto-process toggle
        ui.checkbox(&mut self.auto_process, "Auto-process")
            .on_hover_text("Automatically reconvert when settings change");

        // Manual process button
        ui.add_enabled_ui(!self.auto_process || !self.needs_reprocess, |ui| {
            if ui.button("Convert").clicked() {
                self.process();
            }
        });

        // Show processing time
        if self.last_process_time_ms > 0.0 {
            ui.label(format!("Last conversion: {:.1} ms", self.last_process_time_ms));
        }

        changed
    }

    /// Convert RgbaImage to egui ColorImage
    fn rgba_to_color_image(img: &RgbaImage) -> egui::ColorImage {
        let (width, height) = img.dimensions();
        let pixels = img
            .pixels()
            .map(|p| egui::Color32::from_rgba_unmultiplied(p[0], p[1], p[2], p[3]))
            .collect();

        egui::ColorImage {
            size: [width as usize, height as usize],
            source_size: egui::Vec2::new(width as f32, height as f32),
            pixels,
        }
    }

    /// Display the input image
    fn display_input(&mut self, ui: &mut egui::Ui) {
        ui.vertical(|ui| {
            ui.heading("Original");

            let Some(img) = self.input_image.as_ref() else {
                ui.label("No image loaded");
                return;
            };

            if self.input_texture.is_none() {
                let color_image = Self::rgba_to_color_image(img);
                self.input_texture = Some(ui.ctx().load_texture(
                    "input",
                    color_image,
                    egui::TextureOptions::default(),
                ));
            }

            if let Some(tex) = &self.input_texture {
                let size = tex.size_vec2();
                let max_size = ui.available_size();
                let scale = ((max_size.x / size.x).min(max_size.y / size.y)).min(4.0);

                ui.image((tex.id(), size * scale));
                ui.label(format!("{}x{}", img.width(), img.height()));
            }
        });
    }

    /// Display the glyph preview
    fn display_preview(&self, ui: &mut egui::Ui) {
        ui.vertical(|ui| {
            ui.heading("HTML Output");

            let (Some(job), Some(conversion)) = (&self.preview, &self.conversion) else {
                ui.label("Nothing converted yet");
                return;
            };

            ui.label(format!(
                "{}x{} glyphs, {} bytes of markup",
                conversion.columns,
                conversion.rows,
                conversion.markup.len()
            ));

            egui::Frame::new()
                .fill(parse_html_color(&self.settings.bgcolor))
                .inner_margin(egui::Margin::same(8))
                .show(ui, |ui| {
                    egui::ScrollArea::both()
                        .auto_shrink([false; 2])
                        .show(ui, |ui| {
                            ui.add(
                                egui::Label::new(job.clone()).wrap_mode(egui::TextWrapMode::Extend),
                            );
                        });
                });
        });
    }
}

impl eframe::App for Pic2HtmlApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Image...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Images", &["png", "jpg", "jpeg", "gif", "bmp", "tiff"])
                            .pick_file()
                        {
                            self.load_image(&path);
                        }
                        ui.close();
                    }

                    if ui.button("Save HTML...").clicked() {
                        let file_name = self
                            .input_path
                            .as_ref()
                            .and_then(|p| p.file_stem())
                            .map(|s| format!("{}.html", s.to_string_lossy()))
                            .unwrap_or_else(|| "output.html".to_string());

                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("HTML", &["html", "htm"])
                            .set_file_name(file_name)
                            .save_file()
                            && let Err(e) = self.save_output(&path)
                        {
                            self.error_message = Some(e);
                        }
                        ui.close();
                    }

                    if ui.button("Batch Convert...").clicked() {
                        if let Some(paths) = rfd::FileDialog::new()
                            .add_filter("Images", &["png", "jpg", "jpeg", "gif", "bmp", "tiff"])
                            .pick_files()
                        {
                            self.batch_convert(&paths);
                        }
                        ui.close();
                    }

                    ui.separator();

                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Edit", |ui| {
                    if ui.button("Copy Markup").clicked() {
                        if let Some(conversion) = &self.conversion {
                            ctx.copy_text(conversion.markup.clone());
                        }
                        ui.close();
                    }
                });

                ui.menu_button("Help", |ui| {
                    if ui.button("About").clicked() {
                        self.error_message = Some(
                            "pic2html\nTurns pictures into colored glyph HTML\n\nBuilt with Rust + egui"
                                .to_string(),
                        );
                        ui.close();
                    }
                });
            });
        });

        // Left panel: Controls
        egui::SidePanel::left("control_panel")
            .resizable(true)
            .default_width(250.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let changed = self.render_controls(ui);

                    if changed {
                        self.needs_reprocess = true;
                    }
                });
            });

        // Central panel: Image and preview
        egui::CentralPanel::default().show(ctx, |ui| {
            // Show message if any
            if let Some(ref msg) = self.error_message {
                ui.colored_label(egui::Color32::RED, msg);
                if ui.button("Clear").clicked() {
                    self.error_message = None;
                }
                ui.separator();
            }

            // Auto-process if needed
            if self.auto_process && self.needs_reprocess && self.input_image.is_some() {
                self.process();
            }

            ui.horizontal(|ui| {
                let available_width = ui.available_width();
                let input_width = available_width / 3.0 - 8.0;

                ui.allocate_ui_with_layout(
                    egui::vec2(input_width, ui.available_height()),
                    egui::Layout::top_down(egui::Align::Center),
                    |ui| self.display_input(ui),
                );

                ui.separator();

                ui.allocate_ui_with_layout(
                    egui::vec2(ui.available_width(), ui.available_height()),
                    egui::Layout::top_down(egui::Align::Min),
                    |ui| self.display_preview(ui),
                );
            });
        });
    }
}
