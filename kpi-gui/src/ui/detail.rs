use crate::chart_view::{color32, show_chart};
use crate::export::{export_chart, ExportFormat};
use crate::KpiApp;
use eframe::egui;
use indicator::{EntryMode, Indicator};
use kpi_core::chart::render_indicator;
use kpi_core::normalize::normalize_series;
use kpi_core::status::classify;
use kpi_core::store::IndicatorStore;

impl KpiApp {
    pub(crate) fn render_detail(&mut self, ui: &mut egui::Ui, indicator: &Indicator) {
        ui.horizontal(|ui| {
            ui.heading(&indicator.name);
            if !indicator.code.is_empty() {
                ui.label(egui::RichText::new(&indicator.code).weak());
            }
            if ui.button("Edit").clicked() {
                self.open_edit_indicator(indicator);
            }
        });
        ui.label(format!(
            "Objective {}   Alert {}   Unit {}",
            indicator.objective,
            indicator.alert_threshold,
            if indicator.unit.is_empty() { "-" } else { indicator.unit.as_str() }
        ));
        ui.separator();

        let layout = render_indicator(indicator);
        show_chart(ui, indicator.id, &layout);
        if ui
            .add_enabled(!layout.is_placeholder(), egui::Button::new("Export chart"))
            .clicked()
        {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("SVG", &["svg"])
                .add_filter("PNG", &["png"])
                .set_file_name(format!("{}.svg", indicator.name.replace(' ', "_")))
                .save_file()
            {
                let format = ExportFormat::from_path(&path);
                let size = (self.settings.chart_width, self.settings.chart_height);
                self.status = match export_chart(
                    &layout,
                    &indicator.name,
                    &path,
                    format,
                    size,
                    self.settings.dark_theme,
                ) {
                    Ok(()) => format!("Exported {}", path.display()),
                    Err(err) => err,
                };
            }
        }
        ui.separator();

        self.render_measurement_form(ui, indicator.id);
        ui.separator();

        egui::ScrollArea::vertical()
            .id_source(("measurements", indicator.id))
            .auto_shrink([false, false])
            .show(ui, |ui| {
                egui::Grid::new(("measurement_grid", indicator.id))
                    .striped(true)
                    .num_columns(4)
                    .show(ui, |ui| {
                        ui.strong("Date");
                        ui.strong("Value");
                        ui.strong("Entry");
                        ui.strong("Comment");
                        ui.end_row();
                        for point in normalize_series(&indicator.measurements).iter().rev() {
                            let m = point.measurement;
                            let band = classify(m.value, indicator.objective, indicator.alert_threshold);
                            ui.label(&m.timestamp);
                            ui.label(egui::RichText::new(m.value.to_string()).color(color32(band.color())));
                            ui.label(m.mode.label());
                            ui.label(m.comment.as_deref().unwrap_or(""));
                            ui.end_row();
                        }
                    });
            });
    }

    fn render_measurement_form(&mut self, ui: &mut egui::Ui, indicator_id: u64) {
        ui.horizontal(|ui| {
            ui.label("New measurement");
            ui.add(
                egui::TextEdit::singleline(&mut self.measurement_draft.timestamp_text)
                    .hint_text("YYYY-MM-DD")
                    .desired_width(90.0),
            );
            ui.add(
                egui::TextEdit::singleline(&mut self.measurement_draft.value_text)
                    .hint_text("value")
                    .desired_width(70.0),
            );
            egui::ComboBox::from_id_source("entry_mode")
                .selected_text(self.measurement_draft.mode.label())
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut self.measurement_draft.mode, EntryMode::Manual, "manual");
                    ui.selectable_value(
                        &mut self.measurement_draft.mode,
                        EntryMode::Automatic,
                        "automatic",
                    );
                });
            ui.add(
                egui::TextEdit::singleline(&mut self.measurement_draft.comment)
                    .hint_text("comment")
                    .desired_width(160.0),
            );
            if ui.button("Add").clicked() {
                self.save_measurement(indicator_id);
            }
        });
    }

    fn save_measurement(&mut self, indicator_id: u64) {
        let id = self.store.next_measurement_id();
        let result = self
            .measurement_draft
            .into_measurement(id)
            .and_then(|m| {
                self.store
                    .save_measurement(indicator_id, m)
                    .map_err(|err| err.to_string())
            });
        match result {
            Ok(()) => {
                self.status = "Measurement saved".to_string();
                let mode = self.measurement_draft.mode;
                self.measurement_draft = Default::default();
                self.measurement_draft.mode = mode;
            }
            Err(err) => {
                log::warn!("measurement rejected: {err}");
                self.status = err;
            }
        }
    }
}
