use kpi_core::summary::IndicatorSummary;

pub fn print_info(message: &str) {
    println!("[KPI][INFO] {message}");
}

pub fn print_error(message: &str) {
    eprintln!("[KPI][ERROR]: {message}");
}

pub fn print_indicator_list(summaries: &[IndicatorSummary]) {
    if summaries.is_empty() {
        print_info("No indicators");
        return;
    }
    for summary in summaries {
        let latest = summary
            .latest_value
            .map(|v| v.to_string())
            .unwrap_or_else(|| "-".to_string());
        let band = summary.latest_band.map(|b| b.label()).unwrap_or("no-data");
        let flag = if summary.is_under_alert { "ALERT" } else { "ok" };
        println!(
            "{} [{}] {} latest={} {} ({}, {} measurements) {}",
            summary.id,
            summary.code,
            summary.name,
            latest,
            summary.unit,
            band,
            summary.measurement_count,
            flag
        );
    }
}
