use crate::chart_view::color32;
use crate::KpiApp;
use eframe::egui;
use indicator::Indicator;
use kpi_core::status::Band;
use kpi_core::summary::summarize_all;

impl KpiApp {
    pub(crate) fn render_list(&mut self, ui: &mut egui::Ui, indicators: &[Indicator]) {
        ui.horizontal(|ui| {
            ui.label("Search");
            ui.add(egui::TextEdit::singleline(&mut self.query).hint_text("name or code"));
        });
        ui.separator();

        let summaries = summarize_all(indicators, &self.query);
        if summaries.is_empty() {
            ui.label(egui::RichText::new("No indicators").weak());
            return;
        }
        let alert_color = color32(Band::BelowAlert.color());
        egui::ScrollArea::vertical()
            .id_source("indicator_list")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for summary in summaries {
                    let latest = summary
                        .latest_value
                        .map(|v| format!("{v} {}", summary.unit))
                        .unwrap_or_else(|| "-".to_string());
                    let mut text = egui::RichText::new(format!(
                        "{} {}  ({latest})",
                        summary.code, summary.name
                    ));
                    if summary.is_under_alert {
                        text = text.color(alert_color).strong();
                    }
                    let selected = self.selected == Some(summary.id);
                    let response = ui.selectable_label(selected, text);
                    let response = if summary.is_under_alert {
                        response.on_hover_text("Latest measurement is below the alert threshold")
                    } else {
                        response
                    };
                    if response.clicked() && !selected {
                        self.selected = Some(summary.id);
                        self.measurement_draft = Default::default();
                        self.editor = None;
                    }
                }
            });
    }
}
