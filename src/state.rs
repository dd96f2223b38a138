use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, TryRecvError, channel};

use crate::config::ViewerConfig;
use crate::data::loader::{LoadError, load_file};
use crate::data::model::ColumnTable;

// ---------------------------------------------------------------------------
// Per-series view state
// ---------------------------------------------------------------------------

/// Number of samples averaged into one plotted point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregationWindow(usize);

impl AggregationWindow {
    /// The only windows offered in the UI.
    pub const CHOICES: [usize; 5] = [1, 2, 5, 10, 25];

    /// Accepts only members of [`Self::CHOICES`].
    pub fn from_choice(size: usize) -> Option<Self> {
        Self::CHOICES.contains(&size).then_some(AggregationWindow(size))
    }

    pub fn size(self) -> usize {
        self.0
    }
}

impl Default for AggregationWindow {
    fn default() -> Self {
        AggregationWindow(1)
    }
}

impl fmt::Display for AggregationWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 1 {
            write!(f, "off")
        } else {
            write!(f, "{} samples", self.0)
        }
    }
}

/// Display settings of a single column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesView {
    pub visible: bool,
    /// Vertical multiplier applied after normalisation; shown as a percentage.
    pub scale: f64,
    pub window: AggregationWindow,
}

impl Default for SeriesView {
    fn default() -> Self {
        Self {
            visible: true,
            scale: 1.0,
            window: AggregationWindow::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// ViewState – everything a render pass needs besides the data
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub series: BTreeMap<String, SeriesView>,
    pub show_derivative: bool,
    pub smoothing: bool,
    pub show_points: bool,
    pub show_analysis: bool,
    pub limit_recent: bool,
    pub recent_limit: usize,
}

impl ViewState {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            series: BTreeMap::new(),
            show_derivative: false,
            smoothing: false,
            show_points: false,
            show_analysis: false,
            limit_recent: true,
            recent_limit: config.recent_limit,
        }
    }

    /// Fresh defaults for every column of `table`; global toggles are kept.
    pub fn reset_for(&mut self, table: &ColumnTable) {
        self.series = table
            .columns()
            .iter()
            .map(|c| (c.name.clone(), SeriesView::default()))
            .collect();
    }

    /// Settings for `name`, falling back to defaults for unknown columns.
    pub fn series_view(&self, name: &str) -> SeriesView {
        self.series.get(name).copied().unwrap_or_default()
    }

    /// Recent-sample limit in effect, if any.
    pub fn recent(&self) -> Option<usize> {
        self.limit_recent.then_some(self.recent_limit)
    }

    /// Visible column names in table order.
    pub fn visible_columns(&self, table: &ColumnTable) -> Vec<String> {
        table
            .columns()
            .iter()
            .filter(|c| self.series_view(&c.name).visible)
            .map(|c| c.name.clone())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Outcome of a background load, tagged with the file it came from.
pub type LoadResult = (PathBuf, Result<ColumnTable, LoadError>);

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: ViewerConfig,

    /// Loaded table (None until the first successful load).
    pub table: Option<ColumnTable>,

    pub view: ViewState,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Error shown in a modal until the user dismisses it.
    pub error_dialog: Option<String>,

    /// Receiver for a load running on a worker thread.
    pending_load: Option<Receiver<LoadResult>>,

    /// Set when the user asks for a PNG of the plot; consumed by the app.
    pub png_export_requested: bool,
}

impl AppState {
    pub fn new(config: ViewerConfig) -> Self {
        let view = ViewState::new(&config);
        Self {
            config,
            table: None,
            view,
            status_message: None,
            error_dialog: None,
            pending_load: None,
            png_export_requested: false,
        }
    }

    /// Whether a file loading operation is in progress.
    pub fn loading(&self) -> bool {
        self.pending_load.is_some()
    }

    /// Install a newly loaded table, discarding all per-series view state.
    /// The recent-sample limit restarts at the configured default, capped
    /// to the table's row count.
    pub fn set_table(&mut self, table: ColumnTable) {
        self.view.reset_for(&table);
        self.table = Some(table);
        let (lo, hi) = self.recent_limit_bounds();
        self.view.recent_limit = self.config.recent_limit.clamp(lo, hi);
        self.status_message = None;
    }

    /// Slider range for the recent-sample limit. The upper bound follows the
    /// loaded table's row count, never dropping below the configured minimum.
    pub fn recent_limit_bounds(&self) -> (usize, usize) {
        let (lo, hi) = self.config.recent_limit_range;
        match &self.table {
            Some(table) => (lo, table.max_len().max(lo)),
            None => (lo, hi.max(lo)),
        }
    }

    /// Show `message` in the status line and in the error modal.
    pub fn report_error(&mut self, message: String) {
        self.status_message = Some(message.clone());
        self.error_dialog = Some(message);
    }

    /// Parse `path` on a worker thread; poll with [`Self::poll_load`].
    pub fn start_load(&mut self, path: PathBuf) {
        let (tx, rx) = channel();
        self.pending_load = Some(rx);
        self.status_message = Some(format!("Loading {}…", path.display()));
        std::thread::spawn(move || {
            let result = load_file(&path);
            // Receiver gone means the app closed; nothing to report to.
            let _ = tx.send((path, result));
        });
    }

    /// Apply a finished background load. Returns true when state changed.
    pub fn poll_load(&mut self) -> bool {
        let Some(rx) = &self.pending_load else {
            return false;
        };
        match rx.try_recv() {
            Ok((path, result)) => {
                self.pending_load = None;
                self.finish_load(&path, result);
                true
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                self.pending_load = None;
                log::error!("Loader thread exited without a result");
                self.report_error("Error: loading was interrupted".to_string());
                true
            }
        }
    }

    /// Install a load result. On failure the previous table stays in place.
    pub fn finish_load(&mut self, path: &std::path::Path, result: Result<ColumnTable, LoadError>) {
        match result {
            Ok(table) => {
                log::info!(
                    "Loaded {} rows from {} with columns {:?}",
                    table.max_len(),
                    path.display(),
                    table.column_names()
                );
                self.set_table(table);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.report_error(format!("Error loading {}: {e}", path.display()));
            }
        }
    }

    /// Show or hide every column at once.
    pub fn set_all_visible(&mut self, visible: bool) {
        for sv in self.view.series.values_mut() {
            sv.visible = visible;
        }
    }
}
