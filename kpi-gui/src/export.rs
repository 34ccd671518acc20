use kpi_core::chart::{ChartLayout, ChartView};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Svg,
    Png,
}

impl ExportFormat {
    /// Picks the format from the file extension, defaulting to SVG.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("png") => ExportFormat::Png,
            _ => ExportFormat::Svg,
        }
    }
}

fn chart_view(layout: &ChartLayout) -> Result<&ChartView, String> {
    match layout {
        ChartLayout::Chart(view) => Ok(view),
        ChartLayout::Placeholder { reason } => Err(format!("Nothing to export: {}.", reason.message())),
    }
}

pub fn export_chart(
    layout: &ChartLayout,
    title: &str,
    path: &Path,
    format: ExportFormat,
    size: (u32, u32),
    dark_theme: bool,
) -> Result<(), String> {
    let view = chart_view(layout)?;
    match format {
        ExportFormat::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            draw_chart(&root, view, title, dark_theme)?;
            root.present().map_err(|e| e.to_string())?;
        }
        ExportFormat::Png => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            draw_chart(&root, view, title, dark_theme)?;
            root.present().map_err(|e| e.to_string())?;
        }
    }
    log::info!("exported chart '{title}' to {}", path.display());
    Ok(())
}

/// Plot positions of the gridlines, top to bottom.
fn gridline_positions(view: &ChartView) -> Vec<f64> {
    view.gridlines.iter().map(|line| line.position).collect()
}

fn gridline_label(view: &ChartView, position: f64) -> String {
    view.gridlines
        .iter()
        .find(|line| (line.position - position).abs() < 1e-9)
        .map(|line| line.label.clone())
        .unwrap_or_default()
}

fn rgb(color: kpi_core::status::Rgb) -> RGBColor {
    RGBColor(color.r, color.g, color.b)
}

fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    view: &ChartView,
    title: &str,
    dark_theme: bool,
) -> Result<(), String> {
    let bg_color = if dark_theme {
        RGBColor(24, 24, 24)
    } else {
        RGBColor(255, 255, 255)
    };
    let text_color = if dark_theme {
        RGBColor(220, 220, 220)
    } else {
        RGBColor(40, 40, 40)
    };
    let axis_color = if dark_theme {
        RGBColor(80, 80, 80)
    } else {
        RGBColor(120, 120, 120)
    };
    root.fill(&bg_color).map_err(|e| e.to_string())?;

    let count = view.bars.len() as f64;
    let y_min = view
        .bars
        .iter()
        .map(|bar| bar.height)
        .chain([view.objective_line.position, view.alert_line.position])
        .fold(0.0, f64::min);

    let mut chart = ChartBuilder::on(root)
        .margin(20)
        .caption(title, ("sans-serif", 24).into_font().color(&text_color))
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d(
            -0.5..(count - 0.5),
            (y_min..1.0).with_key_points(gridline_positions(view)),
        )
        .map_err(|e| e.to_string())?;

    let x_label = |x: &f64| {
        let idx = x.round();
        if (x - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        view.bars
            .get(idx as usize)
            .map(|bar| bar.axis_label.clone())
            .unwrap_or_default()
    };
    let y_label = |y: &f64| gridline_label(view, *y);
    let y_desc = if view.unit.is_empty() {
        "value".to_string()
    } else {
        view.unit.clone()
    };
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(view.bars.len().max(1))
        .x_label_formatter(&x_label)
        .y_label_formatter(&y_label)
        .y_desc(y_desc)
        .axis_desc_style(("sans-serif", 16).into_font().color(&text_color))
        .label_style(("sans-serif", 14).into_font().color(&text_color))
        .axis_style(&axis_color)
        .light_line_style(&axis_color)
        .bold_line_style(&axis_color)
        .draw()
        .map_err(|e| e.to_string())?;

    chart
        .draw_series(view.bars.iter().enumerate().map(|(idx, bar)| {
            let x = idx as f64;
            Rectangle::new([(x - 0.3, 0.0), (x + 0.3, bar.height)], rgb(bar.color).filled())
        }))
        .map_err(|e| e.to_string())?;

    let objective_color = rgb(kpi_core::Band::AtOrAboveObjective.color());
    let alert_color = rgb(kpi_core::Band::BelowAlert.color());
    for (line, color, name) in [
        (&view.objective_line, objective_color, "Objective"),
        (&view.alert_line, alert_color, "Alert"),
    ] {
        chart
            .draw_series(LineSeries::new(
                vec![(-0.5, line.position), (count - 0.5, line.position)],
                color.stroke_width(2),
            ))
            .map_err(|e| e.to_string())?
            .label(format!("{name} {}", line.value))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
    }

    chart
        .configure_series_labels()
        .background_style(if dark_theme {
            RGBColor(18, 18, 18)
        } else {
            RGBColor(240, 240, 240)
        })
        .border_style(axis_color)
        .label_font(("sans-serif", 16).into_font().color(&text_color))
        .position(SeriesLabelPosition::UpperRight)
        .margin(12)
        .draw()
        .map_err(|e| e.to_string())?;
    Ok(())
}
