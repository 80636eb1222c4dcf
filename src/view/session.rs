//! What the window talks to: the record store seen through the sales ordering,
//! the "undecided only" filter and the page cursor.

use std::{collections::HashSet, path::PathBuf};

use tracing::{debug, info};

use crate::{
    error::{LoadError, ReviewError},
    excel::record_store::RecordStore,
    models::{record::{Decision, Record, RowId}, user_sheet::{ReviewSettings, ViewInfo}},
    parsing::ean::{image_path, lookup_url},
    view::{
        ordering::{ordered_view_filtered, ViewFilter},
        pagination::PageCursor,
    },
};

/// Whether a product has a reference image on disk. A missing image is a normal state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageStatus {
    Found(PathBuf),
    NotFound,
}

pub struct ReviewSession {
    store: RecordStore,
    view: ViewInfo,
    filter: ViewFilter,
    cursor: PageCursor,
    expanded: HashSet<RowId>, // Rows with their details open, never saved
}

impl ReviewSession {
    pub fn open(settings: &ReviewSettings) -> Result<Self, LoadError> {
        let store = RecordStore::load(&settings.sheet)?;
        Ok(Self::with_store(store, settings.view.clone()))
    }

    pub fn with_store(store: RecordStore, view: ViewInfo) -> Self {
        let filter = if view.only_undecided { ViewFilter::Undecided } else { ViewFilter::All };
        let mut session = ReviewSession {
            cursor: PageCursor::new(0, view.page_size),
            store,
            view,
            filter,
            expanded: HashSet::new(),
        };
        session.refresh_cursor();
        session
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn record(&self, row: RowId) -> Option<&Record> {
        self.store.record(row)
    }

    pub fn filter(&self) -> ViewFilter {
        self.filter
    }

    /// Every row that passes the filter, in display order.
    pub fn visible_rows(&self) -> Vec<RowId> {
        ordered_view_filtered(self.store.records(), self.filter)
    }

    pub fn page_rows(&self) -> Vec<RowId> {
        let rows = self.visible_rows();
        let (start, end) = self.cursor.bounds();
        let end = end.min(rows.len());
        rows[start.min(end)..end].to_vec()
    }

    /// 1-based position of a row in the current view, as shown to the user.
    pub fn position_of(&self, row: RowId) -> Option<usize> {
        self.visible_rows().iter().position(|&r| r == row).map(|p| p + 1)
    }

    pub fn current_page(&self) -> usize {
        self.cursor.page()
    }

    pub fn page_count(&self) -> usize {
        self.cursor.page_count()
    }

    pub fn next_page(&mut self) -> usize {
        let page = self.cursor.next();
        debug!("Page {}/{}", page, self.page_count());
        page
    }

    pub fn previous_page(&mut self) -> usize {
        let page = self.cursor.previous();
        debug!("Page {}/{}", page, self.page_count());
        page
    }

    pub fn jump_to(&mut self, page: usize) -> Result<usize, ReviewError> {
        self.cursor.jump(page)
    }

    pub fn toggle_undecided_filter(&mut self) -> ViewFilter {
        self.filter = match self.filter {
            ViewFilter::All => ViewFilter::Undecided,
            ViewFilter::Undecided => ViewFilter::All,
        };
        self.refresh_cursor();
        info!("Filter set to {:?}, {} rows visible", self.filter, self.visible_rows().len());
        self.filter
    }

    pub fn is_expanded(&self, row: RowId) -> bool {
        self.expanded.contains(&row)
    }

    pub fn toggle_expanded(&mut self, row: RowId) -> bool {
        if !self.expanded.remove(&row) {
            self.expanded.insert(row);
        }
        self.is_expanded(row)
    }

    pub fn expand_page(&mut self) {
        self.expanded.extend(self.page_rows());
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    /// Sets and saves one decision. With the undecided filter on, the row drops out
    /// of the view so the page may need to move back. A failed save keeps the edit in
    /// memory, so the cursor is re-clamped either way.
    pub fn commit_decision(&mut self, row: RowId, decision: Decision) -> Result<(), ReviewError> {
        let committed = self.store.commit_decision(row, decision);
        self.refresh_cursor();
        committed
    }

    pub fn reload(&mut self) -> Result<(), LoadError> {
        self.store.reload()?;
        self.expanded.retain(|&row| row < self.store.len());
        self.refresh_cursor();
        Ok(())
    }

    pub fn export_copy(&self, path: &std::path::Path) -> Result<(), ReviewError> {
        self.store.persist_to(path)
    }

    pub fn image_for(&self, row: RowId) -> ImageStatus {
        let Some(record) = self.store.record(row) else { return ImageStatus::NotFound };
        let path = image_path(&self.view.image_dir, &record.ean);
        if path.is_file() { ImageStatus::Found(path) } else { ImageStatus::NotFound }
    }

    pub fn lookup_link(&self, row: RowId) -> Option<String> {
        self.store.record(row).map(|r| lookup_url(&self.view.lookup_url_template, &r.ean))
    }

    fn refresh_cursor(&mut self) {
        let visible = self.visible_rows().len();
        self.cursor.resize(visible);
    }
}
