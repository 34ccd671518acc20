use egui_plot::{Bar, BarChart, GridMark, HLine, Legend, Plot};
use kpi_core::chart::{ChartLayout, ChartView};
use kpi_core::status::{Band, Rgb};

const CHART_HEIGHT: f32 = 260.0;
const BAR_WIDTH: f64 = 0.6;

pub(crate) fn color32(color: Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(color.r, color.g, color.b)
}

/// Draws a chart layout, or its placeholder message.
pub(crate) fn show_chart(ui: &mut egui::Ui, indicator_id: u64, layout: &ChartLayout) {
    match layout {
        ChartLayout::Placeholder { reason } => {
            ui.allocate_ui(egui::vec2(ui.available_width(), CHART_HEIGHT), |ui| {
                ui.centered_and_justified(|ui| {
                    ui.label(egui::RichText::new(reason.message()).italics().weak());
                });
            });
        }
        ChartLayout::Chart(view) => show_view(ui, indicator_id, view),
    }
}

fn show_view(ui: &mut egui::Ui, indicator_id: u64, view: &ChartView) {
    let unit = view.unit.clone();
    let bars: Vec<Bar> = view
        .bars
        .iter()
        .enumerate()
        .map(|(idx, bar)| {
            let tooltip = if unit.is_empty() {
                bar.tooltip.clone()
            } else {
                format!("{} {unit}", bar.tooltip)
            };
            Bar::new(idx as f64, bar.height)
                .width(BAR_WIDTH)
                .fill(color32(bar.color))
                .name(tooltip)
        })
        .collect();
    let chart = BarChart::new(bars)
        .name("Measurements")
        .element_formatter(Box::new(|bar: &Bar, _chart: &BarChart| bar.name.clone()));

    let objective = HLine::new(view.objective_line.position)
        .color(color32(Band::AtOrAboveObjective.color()))
        .width(2.0)
        .name(format!("Objective {}", view.objective_line.value));
    let alert = HLine::new(view.alert_line.position)
        .color(color32(Band::BelowAlert.color()))
        .width(2.0)
        .name(format!("Alert {}", view.alert_line.value));

    let axis_labels: Vec<String> = view.bars.iter().map(|bar| bar.axis_label.clone()).collect();
    let bar_count = axis_labels.len();
    let gridlines: Vec<(f64, String)> = view
        .gridlines
        .iter()
        .map(|line| (line.position, line.label.clone()))
        .collect();
    let grid_positions: Vec<f64> = gridlines.iter().map(|(position, _)| *position).collect();

    Plot::new(("indicator_chart", indicator_id))
        .height(CHART_HEIGHT)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .show_x(false)
        .show_y(false)
        .include_x(-0.5)
        .include_x(bar_count as f64 - 0.5)
        .include_y(0.0)
        .include_y(1.0)
        .legend(Legend::default())
        .x_grid_spacer(move |_input| {
            (0..bar_count)
                .map(|idx| GridMark {
                    value: idx as f64,
                    step_size: 1.0,
                })
                .collect()
        })
        .y_grid_spacer(move |_input| {
            grid_positions
                .iter()
                .map(|position| GridMark {
                    value: *position,
                    step_size: 0.5,
                })
                .collect()
        })
        .x_axis_formatter(move |mark, _max_chars, _range| {
            let idx = mark.value.round();
            if idx < 0.0 {
                return String::new();
            }
            axis_labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .y_axis_formatter(move |mark, _max_chars, _range| {
            gridlines
                .iter()
                .find(|(position, _)| (position - mark.value).abs() < 1e-9)
                .map(|(_, label)| label.clone())
                .unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
            plot_ui.hline(objective);
            plot_ui.hline(alert);
        });
}
