pub mod chart;
pub mod input;
pub mod normalize;
pub mod scale;
pub mod settings;
pub mod split_pane;
pub mod status;
pub mod store;
pub mod summary;

pub use chart::{render_chart, render_indicator, ChartLayout, ChartView, PlaceholderReason};
pub use normalize::{normalize_series, SeriesPoint};
pub use scale::{compute_scale, Scale};
pub use split_pane::{ListenerRegistry, SplitPaneController};
pub use status::{classify, is_under_alert, Band};
pub use store::{FileStore, IndicatorStore, MemoryStore, StoreError};
pub use summary::{summarize, summarize_all, IndicatorSummary};
