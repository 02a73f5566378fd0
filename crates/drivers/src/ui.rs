use std::collections::HashMap;
use std::path::Path;

use eframe::egui::{
    self, Color32, ColorImage, RichText, Sense, TextureHandle, TextureOptions, Vec2,
};
use shoe_who_adapters::{present_board, AssetIndex, BoardView, CellView};
use shoe_who_application::{
    BoardOutcome, BoardService, ExportBoardCommand, ImportBoardCommand, NewBoardCommand,
    ToggleCellCommand,
};
use tracing::warn;

const WINDOW_TITLE: &str = "ShoeWho";
const MIN_WINDOW_SIZE: [f32; 2] = [900.0, 700.0];
const GRID_COLUMNS: usize = 6;
const CELL_IMAGE_SIZE: f32 = 100.0;
const FEATURED_IMAGE_SIZE: f32 = 200.0;
const CELL_SPACING: f32 = 5.0;
const CAPTION_RED: Color32 = Color32::from_rgb(204, 32, 32);
const CAPTION_GRAY: Color32 = Color32::from_rgb(128, 128, 128);
const PLACEHOLDER: Color32 = Color32::from_rgb(48, 48, 48);

#[derive(Debug, Clone, PartialEq, Eq)]
enum UiAction {
    NewBoard,
    ExportBoard,
    ImportBoard,
    ToggleCell(String),
}

/// Decoded images per filename. Misses are cached too, so a broken image is
/// only decoded once per catalog.
struct TextureCache<T> {
    entries: HashMap<String, Option<T>>,
}

impl<T: Clone> TextureCache<T> {
    fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    fn get_or_load(&mut self, filename: &str, load: impl FnOnce() -> Option<T>) -> Option<T> {
        if let Some(cached) = self.entries.get(filename) {
            return cached.clone();
        }
        let loaded = load();
        self.entries.insert(filename.to_string(), loaded.clone());
        loaded
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

struct BoardApp {
    service: BoardService,
    assets: AssetIndex,
    textures: TextureCache<TextureHandle>,
}

impl BoardApp {
    fn new(mut service: BoardService, assets: AssetIndex) -> Self {
        service.new_board(NewBoardCommand);
        Self {
            service,
            assets,
            textures: TextureCache::new(),
        }
    }

    fn dispatch(&mut self, action: UiAction) {
        // Outcomes are logged by the service; the window stays silent.
        match action {
            UiAction::NewBoard => {
                if self.service.new_board(NewBoardCommand) == BoardOutcome::Updated {
                    self.textures.clear();
                }
            }
            UiAction::ExportBoard => {
                self.service.export_board(ExportBoardCommand::default());
            }
            UiAction::ImportBoard => {
                let outcome = self.service.import_board(ImportBoardCommand::default());
                if matches!(outcome, BoardOutcome::Imported(_)) {
                    self.textures.clear();
                }
            }
            UiAction::ToggleCell(filename) => {
                self.service.toggle_selection(ToggleCellCommand { filename });
            }
        }
    }

    fn texture(&mut self, ctx: &egui::Context, filename: &str) -> Option<TextureHandle> {
        let assets = &self.assets;
        self.textures.get_or_load(filename, || {
            let path = assets.image_path(filename)?;
            match load_color_image(path) {
                Ok(image) => Some(ctx.load_texture(filename, image, TextureOptions::LINEAR)),
                Err(error) => {
                    warn!(path = %path.display(), %error, "failed to decode contestant image");
                    None
                }
            }
        })
    }

    fn draw_board(&mut self, ui: &mut egui::Ui, view: &BoardView) -> Option<UiAction> {
        let mut action = None;

        ui.horizontal_top(|ui| {
            if let Some(featured) = &view.featured {
                ui.vertical(|ui| {
                    let texture = self.texture(ui.ctx(), &featured.filename);
                    draw_image(ui, texture.as_ref(), FEATURED_IMAGE_SIZE, false);
                    draw_caption(ui, &featured.caption, false);
                });
                ui.add_space(CELL_SPACING * 2.0);
            }

            egui::Grid::new("board_grid")
                .spacing([CELL_SPACING, CELL_SPACING])
                .show(ui, |ui| {
                    for (index, cell) in view.cells.iter().enumerate() {
                        if self.draw_cell(ui, cell) {
                            action = Some(UiAction::ToggleCell(cell.filename.clone()));
                        }
                        if (index + 1) % GRID_COLUMNS == 0 {
                            ui.end_row();
                        }
                    }
                });
        });

        action
    }

    /// Returns true when the cell image was clicked.
    fn draw_cell(&mut self, ui: &mut egui::Ui, cell: &CellView) -> bool {
        let texture = self.texture(ui.ctx(), &cell.filename);
        ui.vertical_centered(|ui| {
            let clicked = draw_image(ui, texture.as_ref(), CELL_IMAGE_SIZE, cell.dimmed).clicked();
            draw_caption(ui, &cell.caption, cell.dimmed);
            clicked
        })
        .inner
    }
}

impl eframe::App for BoardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut action = None;

        egui::TopBottomPanel::bottom("board_actions").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("New Board").clicked() {
                    action = Some(UiAction::NewBoard);
                }
                if ui.button("Export Board").clicked() {
                    action = Some(UiAction::ExportBoard);
                }
                if ui.button("Import Board").clicked() {
                    action = Some(UiAction::ImportBoard);
                }
            });
        });

        let view = present_board(self.service.catalog(), self.service.board());
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both().show(ui, |ui| {
                if let Some(clicked) = self.draw_board(ui, &view) {
                    action = Some(clicked);
                }
            });
        });

        if let Some(action) = action {
            self.dispatch(action);
            ctx.request_repaint();
        }
    }
}

fn draw_image(
    ui: &mut egui::Ui,
    texture: Option<&TextureHandle>,
    size: f32,
    dimmed: bool,
) -> egui::Response {
    let size = Vec2::splat(size);
    let tint = if dimmed { Color32::GRAY } else { Color32::WHITE };
    match texture {
        Some(texture) => ui.add(
            egui::Image::from_texture(egui::load::SizedTexture::from_handle(texture))
                .fit_to_exact_size(size)
                .tint(tint)
                .sense(Sense::click()),
        ),
        None => {
            let (rect, response) = ui.allocate_exact_size(size, Sense::click());
            let fill = if dimmed { PLACEHOLDER.gamma_multiply(0.5) } else { PLACEHOLDER };
            ui.painter().rect_filled(rect, 4.0, fill);
            response
        }
    }
}

fn draw_caption(ui: &mut egui::Ui, caption: &str, dimmed: bool) {
    let fill = if dimmed { CAPTION_GRAY } else { CAPTION_RED };
    egui::Frame::new()
        .fill(fill)
        .inner_margin(5.0)
        .show(ui, |ui| {
            ui.label(RichText::new(caption).small().color(Color32::WHITE));
        });
}

fn load_color_image(path: &Path) -> Result<ColorImage, image::ImageError> {
    let rgba = image::open(path)?.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

pub fn launch_window(service: BoardService, assets_dir: &Path) -> Result<(), String> {
    let assets = AssetIndex::scan(assets_dir);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(MIN_WINDOW_SIZE)
            .with_min_inner_size(MIN_WINDOW_SIZE),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(BoardApp::new(service, assets)))),
    )
    .map_err(|error| format!("failed to start UI: {error}"))
}
