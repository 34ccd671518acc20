use crate::commands::Commands;
use crate::output::{print_indicator_list, print_info};
use indicator::{EntryMode, Indicator};
use kpi_core::chart::render_indicator;
use kpi_core::input::{IndicatorDraft, MeasurementDraft};
use kpi_core::settings::ViewSettings;
use kpi_core::store::{FileStore, IndicatorStore};
use kpi_core::summary::summarize_all;
use kpi_gui::export::{export_chart, ExportFormat};
use kpi_gui::{run_gui, GuiConfig};
use std::path::PathBuf;

type HandlerResult = Result<(), Box<dyn std::error::Error>>;

fn snapshot(store: &FileStore, id: u64) -> Result<Indicator, Box<dyn std::error::Error>> {
    store
        .indicator(id)?
        .ok_or_else(|| format!("indicator {id} not found").into())
}

pub fn handle_command(
    command: Option<Commands>,
    mut store: FileStore,
    settings: ViewSettings,
    settings_path: PathBuf,
) -> HandlerResult {
    match command.unwrap_or(Commands::Gui) {
        Commands::Gui => {
            run_gui(
                GuiConfig {
                    settings,
                    settings_path,
                    ..GuiConfig::default()
                },
                store,
            )?;
        }
        Commands::List { query, alerts_only } => {
            let indicators = store.indicators()?;
            let mut summaries = summarize_all(&indicators, query.as_deref().unwrap_or(""));
            if alerts_only {
                summaries.retain(|s| s.is_under_alert);
            }
            print_indicator_list(&summaries);
        }
        Commands::Show { id } => {
            let indicator = snapshot(&store, id)?;
            let layout = render_indicator(&indicator);
            println!("{}", serde_json::to_string_pretty(&layout)?);
        }
        Commands::AddIndicator {
            name,
            code,
            unit,
            objective,
            alert,
        } => {
            let draft = IndicatorDraft {
                name,
                code,
                unit,
                objective_text: objective,
                alert_text: alert,
            };
            let base = Indicator::new(store.next_indicator_id(), "", 0.0, 0.0);
            let indicator = draft.apply_to(&base)?;
            let id = indicator.id;
            store.save_indicator(indicator)?;
            print_info(&format!("Indicator added with id {id}"));
        }
        Commands::AddMeasurement {
            id,
            value,
            date,
            comment,
            mode,
        } => {
            let draft = MeasurementDraft {
                value_text: value,
                timestamp_text: date,
                comment: comment.unwrap_or_default(),
                mode: mode.parse::<EntryMode>()?,
            };
            let measurement = draft.into_measurement(store.next_measurement_id())?;
            let measurement_id = measurement.id;
            store.save_measurement(id, measurement)?;
            print_info(&format!(
                "Measurement {measurement_id} added to indicator {id}"
            ));
        }
        Commands::Export { id, path, png } => {
            let indicator = snapshot(&store, id)?;
            let layout = render_indicator(&indicator);
            let format = if png {
                ExportFormat::Png
            } else {
                ExportFormat::from_path(&path)
            };
            export_chart(
                &layout,
                &indicator.name,
                &path,
                format,
                (settings.chart_width, settings.chart_height),
                settings.dark_theme,
            )?;
            print_info(&format!("Chart written to {}", path.display()));
        }
    }
    Ok(())
}
