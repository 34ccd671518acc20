use crate::{IndicatorEditor, KpiApp};
use eframe::egui;
use indicator::Indicator;
use kpi_core::input::IndicatorDraft;
use kpi_core::store::IndicatorStore;

impl KpiApp {
    pub(crate) fn open_new_indicator(&mut self) {
        self.editor = Some(IndicatorEditor {
            indicator_id: None,
            draft: IndicatorDraft::default(),
        });
    }

    pub(crate) fn open_edit_indicator(&mut self, indicator: &Indicator) {
        self.editor = Some(IndicatorEditor {
            indicator_id: Some(indicator.id),
            draft: IndicatorDraft::from_indicator(indicator),
        });
    }

    pub(crate) fn render_editor_window(&mut self, ctx: &egui::Context) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        let title = if editor.indicator_id.is_some() {
            "Edit indicator"
        } else {
            "New indicator"
        };
        let mut open = true;
        let mut save = false;
        egui::Window::new(title)
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                egui::Grid::new("indicator_form").num_columns(2).show(ui, |ui| {
                    for (label, text) in [
                        ("Name", &mut editor.draft.name),
                        ("Code", &mut editor.draft.code),
                        ("Unit", &mut editor.draft.unit),
                        ("Objective", &mut editor.draft.objective_text),
                        ("Alert threshold", &mut editor.draft.alert_text),
                    ] {
                        ui.label(label);
                        ui.text_edit_singleline(text);
                        ui.end_row();
                    }
                });
                save = ui.button("Save").clicked();
            });
        if save {
            self.save_editor();
        } else if !open {
            self.editor = None;
        }
    }

    fn save_editor(&mut self) {
        let Some(editor) = self.editor.as_ref() else {
            return;
        };
        let base = match editor.indicator_id {
            Some(id) => match self.store.indicator(id) {
                Ok(Some(existing)) => existing,
                Ok(None) => Indicator::new(id, "", 0.0, 0.0),
                Err(err) => {
                    self.status = err.to_string();
                    return;
                }
            },
            None => Indicator::new(self.store.next_indicator_id(), "", 0.0, 0.0),
        };
        let result = editor.draft.apply_to(&base).and_then(|indicator| {
            let id = indicator.id;
            self.store
                .save_indicator(indicator)
                .map(|()| id)
                .map_err(|err| err.to_string())
        });
        match result {
            Ok(id) => {
                self.selected = Some(id);
                self.editor = None;
                self.status = "Indicator saved".to_string();
            }
            Err(err) => {
                log::warn!("indicator rejected: {err}");
                self.status = err;
            }
        }
    }
}
