mod detail;
mod forms;
mod list;

use crate::KpiApp;
use eframe::egui;
use kpi_core::store::IndicatorStore;

const DIVIDER_WIDTH: f32 = 6.0;

impl KpiApp {
    pub(crate) fn render_toolbar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Indicators");
                ui.separator();
                if ui.button("New indicator").clicked() {
                    self.open_new_indicator();
                }
                let theme_label = if self.settings.dark_theme {
                    "Light theme"
                } else {
                    "Dark theme"
                };
                if ui.button(theme_label).clicked() {
                    self.settings.dark_theme = !self.settings.dark_theme;
                    self.persist_settings();
                }
                if !self.status.is_empty() {
                    ui.separator();
                    ui.label(&self.status);
                }
            });
        });
    }

    /// List pane, divider and detail pane; the divider ratio decides the split.
    pub(crate) fn render_panes(&mut self, ctx: &egui::Context) {
        // Fresh snapshot every frame; nothing derived is kept between frames.
        let indicators = match self.store.indicators() {
            Ok(indicators) => indicators,
            Err(err) => {
                self.status = err.to_string();
                Vec::new()
            }
        };
        if self
            .selected
            .is_some_and(|id| !indicators.iter().any(|i| i.id == id))
        {
            self.selected = None;
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let full = ui.available_rect_before_wrap();
            let split_x = full.min.x + full.width() * self.split.ratio() / 100.0;
            let list_rect = egui::Rect::from_min_max(
                full.min,
                egui::pos2(split_x - DIVIDER_WIDTH / 2.0, full.max.y),
            );
            let divider_rect = egui::Rect::from_min_max(
                egui::pos2(split_x - DIVIDER_WIDTH / 2.0, full.min.y),
                egui::pos2(split_x + DIVIDER_WIDTH / 2.0, full.max.y),
            );
            let detail_rect = egui::Rect::from_min_max(
                egui::pos2(divider_rect.max.x + 8.0, full.min.y),
                full.max,
            );

            self.render_divider(ui, divider_rect, full);
            ui.allocate_ui_at_rect(list_rect, |ui| self.render_list(ui, &indicators));
            ui.allocate_ui_at_rect(detail_rect, |ui| {
                let selected = self
                    .selected
                    .and_then(|id| indicators.iter().find(|i| i.id == id));
                match selected {
                    Some(indicator) => self.render_detail(ui, indicator),
                    None => {
                        ui.centered_and_justified(|ui| {
                            ui.label(egui::RichText::new("Select an indicator").weak());
                        });
                    }
                }
            });
        });
    }

    fn render_divider(&mut self, ui: &mut egui::Ui, rect: egui::Rect, container: egui::Rect) {
        let response = ui.interact(rect, ui.id().with("split_divider"), egui::Sense::drag());
        if response.drag_started() {
            self.split.press();
        }
        if self.split.is_resizing() {
            // The drag is free-form: follow the global pointer, not the divider.
            let (pointer, released) =
                ui.ctx().input(|i| (i.pointer.latest_pos(), i.pointer.any_released()));
            if let Some(pos) = pointer {
                self.split
                    .pointer_moved(pos.x, container.min.x, container.width());
            }
            if released {
                self.split.release();
                self.persist_settings();
            }
            ui.ctx().request_repaint();
        }
        if response.hovered() || self.split.is_resizing() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
        }
        let color = if self.split.is_resizing() {
            ui.visuals().widgets.active.bg_fill
        } else {
            ui.visuals().widgets.noninteractive.bg_stroke.color
        };
        ui.painter().rect_filled(rect.shrink2(egui::vec2(2.0, 0.0)), 0.0, color);
    }
}
