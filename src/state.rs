use std::path::Path;

use bike_brush::config::EngineConfig;
use bike_brush::data::dataset::{Dataset, SelectionViews, ViewSlot};
use bike_brush::data::loader::load_file;
use bike_brush::data::selection::{period_label, BrushRect, Projection, Selection};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Corners of the brush on the daily plot, in plot coordinates
/// (day number, total rentals).
#[derive(Debug, Clone, Copy, Default)]
pub struct BrushDrag {
    pub anchor: Option<[f64; 2]>,
    pub current: Option<[f64; 2]>,
}

impl BrushDrag {
    pub fn corners(&self) -> Option<([f64; 2], [f64; 2])> {
        Some((self.anchor?, self.current?))
    }
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until user loads a file).
    pub dataset: Option<Dataset>,

    pub config: EngineConfig,

    /// Current brush selection over the daily plot.
    pub selection: Selection,

    /// Views derived from the current selection.
    pub views: ViewSlot,

    pub brush: BrushDrag,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            dataset: None,
            config,
            selection: Selection::None,
            views: ViewSlot::default(),
            brush: BrushDrag::default(),
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset and show views over all of it.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.selection = Selection::None;
        self.brush = BrushDrag::default();
        self.views.clear();
        let generation = self.views.begin();
        self.views.publish(generation, dataset.full_views());

        self.dataset = Some(dataset);
        self.status_message = None;
    }

    /// Load a file, reporting failures in the status line.
    pub fn load_path(&mut self, path: &Path) {
        match load_file(path) {
            Ok(rows) => {
                let dataset = Dataset::from_rows(&rows, &self.config);
                log::info!(
                    "Loaded {} records over {} days from {}",
                    dataset.records.len(),
                    dataset.daily.len(),
                    path.display()
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Replace the selection with a brushed rectangle and recompute.
    pub fn brush_select(&mut self, rect: BrushRect, projection: &dyn Projection) {
        self.selection = Selection::Rect(rect);
        self.recompute(projection);
    }

    /// Drop the brush and go back to views over all data.
    pub fn clear_selection(&mut self) {
        self.selection = Selection::None;
        self.brush = BrushDrag::default();
        let generation = self.views.begin();
        if let Some(ds) = &self.dataset {
            self.views.publish(generation, ds.full_views());
        }
    }

    fn recompute(&mut self, projection: &dyn Projection) {
        let generation = self.views.begin();
        if let Some(ds) = &self.dataset {
            let views = ds.recompute(projection, &self.selection);
            self.views.publish(generation, views);
        }
    }

    pub fn current_views(&self) -> Option<&SelectionViews> {
        self.views.current()
    }

    /// Title suffix for the daily plot: brushed period or "None".
    pub fn period_text(&self) -> String {
        period_label(self.current_views().and_then(|v| v.period.as_ref()))
    }
}
