use indicator::{Dashboard, Indicator, Measurement};
use kpi_core::render_indicator;
use kpi_core::store::{FileStore, IndicatorStore, MemoryStore, StoreError};

fn closure_rate(id: u64) -> Indicator {
    let mut indicator = Indicator::new(id, "Incident closure rate", 90.0, 70.0);
    indicator.code = "OPS-1".to_string();
    indicator.unit = "%".to_string();
    indicator
}

#[test]
fn new_indicator_starts_without_measurements() {
    let mut store = MemoryStore::new();
    let mut indicator = closure_rate(1);
    indicator.measurements.push(Measurement::new(1, "2024-01", 10.0));
    store.save_indicator(indicator).expect("save");
    let saved = store.indicator(1).unwrap().expect("indicator");
    assert!(saved.measurements.is_empty());
}

#[test]
fn metadata_edit_keeps_measurements() {
    let mut store = MemoryStore::new();
    store.save_indicator(closure_rate(1)).unwrap();
    store
        .save_measurement(1, Measurement::new(1, "2024-01", 80.0))
        .unwrap();

    let mut edited = closure_rate(1);
    edited.name = "Closure rate".to_string();
    edited.objective = 95.0;
    store.save_indicator(edited).unwrap();

    let saved = store.indicator(1).unwrap().unwrap();
    assert_eq!(saved.name, "Closure rate");
    assert_eq!(saved.objective, 95.0);
    assert_eq!(saved.measurements.len(), 1);
}

#[test]
fn measurement_rules_are_enforced() {
    let mut store = MemoryStore::new();
    store.save_indicator(closure_rate(1)).unwrap();
    store
        .save_measurement(1, Measurement::new(1, "2024-01", 80.0))
        .unwrap();

    assert!(matches!(
        store.save_measurement(1, Measurement::new(1, "2024-02", 81.0)),
        Err(StoreError::DuplicateMeasurement { measurement_id: 1, .. })
    ));
    store.save_indicator(closure_rate(2)).unwrap();
    assert!(matches!(
        store.save_measurement(2, Measurement::new(1, "2024-02", 81.0)),
        Err(StoreError::DuplicateMeasurement {
            indicator_id: 2,
            measurement_id: 1
        })
    ));
    assert!(store.indicator(2).unwrap().unwrap().measurements.is_empty());
    assert!(matches!(
        store.save_measurement(9, Measurement::new(2, "2024-02", 81.0)),
        Err(StoreError::UnknownIndicator(9))
    ));
    assert!(matches!(
        store.save_measurement(1, Measurement::new(2, "someday", 81.0)),
        Err(StoreError::Invalid(_))
    ));
    assert!(matches!(
        store.save_measurement(1, Measurement::new(2, "2024-02", f64::NAN)),
        Err(StoreError::Invalid(_))
    ));
    assert_eq!(store.indicator(1).unwrap().unwrap().measurements.len(), 1);
}

#[test]
fn values_that_overflow_the_scale_are_rejected() {
    let mut store = MemoryStore::new();
    store.save_indicator(closure_rate(1)).unwrap();
    assert!(matches!(
        store.save_measurement(1, Measurement::new(1, "2024-01", 1.7e308)),
        Err(StoreError::Invalid(_))
    ));
    assert!(matches!(
        store.save_measurement(1, Measurement::new(1, "2024-01", -1.7e308)),
        Err(StoreError::Invalid(_))
    ));
    let mut huge_objective = closure_rate(2);
    huge_objective.objective = 1.0e308 * 1.7;
    assert!(matches!(
        store.save_indicator(huge_objective),
        Err(StoreError::Invalid(_))
    ));

    store
        .save_measurement(1, Measurement::new(1, "2024-01", 1.0e308))
        .unwrap();
    let layout = render_indicator(&store.indicator(1).unwrap().unwrap());
    let view = layout.view().expect("chart");
    assert!(view.max_scale.is_finite());
    assert!(view.bars[0].height > 0.9);
}

#[test]
fn rerender_after_save_sees_the_new_measurement() {
    let mut store = MemoryStore::new();
    store.save_indicator(closure_rate(1)).unwrap();
    let snapshot = store.indicator(1).unwrap().unwrap();
    assert!(render_indicator(&snapshot).is_placeholder());

    let id = store.next_measurement_id();
    store
        .save_measurement(1, Measurement::new(id, "2024-02", 60.0))
        .unwrap();
    let snapshot = store.indicator(1).unwrap().unwrap();
    let layout = render_indicator(&snapshot);
    assert_eq!(layout.view().expect("chart").bars.len(), 1);
}

#[test]
fn file_store_persists_every_save() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("data").join("indicators.json");

    let mut store = FileStore::open(&path).expect("open");
    assert!(store.indicators().unwrap().is_empty());
    store.save_indicator(closure_rate(1)).unwrap();
    store
        .save_measurement(1, Measurement::new(1, "2024-01", 80.0))
        .unwrap();
    assert!(path.exists());

    let reopened = FileStore::open(&path).expect("reopen");
    let indicator = reopened.indicator(1).unwrap().expect("indicator");
    assert_eq!(indicator.measurements.len(), 1);
    assert_eq!(reopened.next_measurement_id(), 2);
    assert_eq!(reopened.next_indicator_id(), 2);
}

#[test]
fn file_store_leaves_file_untouched_on_rejected_save() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("indicators.json");
    let mut dashboard = Dashboard::default();
    dashboard.indicators.push(closure_rate(1));
    dashboard.save_to_file(&path).unwrap();
    let before = std::fs::read(&path).unwrap();

    let mut store = FileStore::open(&path).unwrap();
    assert!(store
        .save_measurement(2, Measurement::new(1, "2024-01", 1.0))
        .is_err());
    assert_eq!(std::fs::read(&path).unwrap(), before);
}
