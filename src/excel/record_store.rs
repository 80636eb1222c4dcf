use std::path::Path;

use indexmap::IndexMap;
use tracing::{debug, info};
use umya_spreadsheet::Spreadsheet;

use crate::{
    error::{LoadError, ReviewError},
    excel::excel_ops::{display_order, get_header_columns, get_records, get_spreadsheet, resolve_sheet_name, set_spreadsheet},
    models::{record::{Decision, Record, RowId}, user_sheet::SheetInfo},
};

/// The workbook being reviewed plus the records read from it.
///
/// The whole book stays in memory and only decision cells are ever rewritten, so
/// saving without edits gives back the same columns and values.
pub struct RecordStore {
    excel: SheetInfo,
    book: Spreadsheet,
    sheet_name: String,
    columns: IndexMap<String, u32>,
    decision_col: u32,
    records: Vec<Record>,
}

impl RecordStore {
    pub fn load(excel: &SheetInfo) -> Result<Self, LoadError> {
        let book = get_spreadsheet(&excel.path_to_sheet)?;
        let sheet_name = resolve_sheet_name(&book, excel)?;
        let sheet = book.get_sheet_by_name(&sheet_name)
            .ok_or_else(|| LoadError::MissingSheet { path: excel.path_to_sheet.clone(), name: sheet_name.clone() })?;

        let columns = get_header_columns(sheet, excel.header_row);
        for required in excel.required_columns() {
            if !columns.contains_key(required) {
                return Err(LoadError::MissingColumn { path: excel.path_to_sheet.clone(), column: required.to_string() });
            }
        }
        let decision_col = columns.get(&excel.col_decision).copied()
            .ok_or_else(|| LoadError::MissingColumn { path: excel.path_to_sheet.clone(), column: excel.col_decision.clone() })?;

        let records = get_records(sheet, excel, &columns);
        info!(
            "Loaded {} records from {} (sheet {:?})",
            records.len(), excel.path_to_sheet.display(), sheet_name
        );

        Ok(RecordStore { excel: excel.clone(), book, sheet_name, columns, decision_col, records })
    }

    /// Re-reads the backing file. On failure the current state is kept.
    pub fn reload(&mut self) -> Result<(), LoadError> {
        *self = Self::load(&self.excel)?;
        Ok(())
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn record(&self, row: RowId) -> Option<&Record> {
        self.records.get(row)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.excel.path_to_sheet
    }

    pub fn sheet_info(&self) -> &SheetInfo {
        &self.excel
    }

    /// Header names with EAN first. Storage order is untouched.
    pub fn display_columns(&self) -> Vec<&str> {
        display_order(&self.columns, &self.excel.col_ean)
    }

    /// Sets the decision of one record, in memory only.
    pub fn set_decision(&mut self, row: RowId, decision: Decision) -> Result<(), ReviewError> {
        let len = self.records.len();
        let record = self.records.get_mut(row).ok_or(ReviewError::InvalidRow { row, len })?;

        let sheet = self.book.get_sheet_by_name_mut(&self.sheet_name)
            .ok_or_else(|| LoadError::MissingSheet { path: self.excel.path_to_sheet.clone(), name: self.sheet_name.clone() })?;

        let sheet_row = self.excel.header_row + 1 + row as u32;
        sheet.get_cell_value_mut((self.decision_col, sheet_row)).set_value_string(decision.as_str());

        record.decision = decision;
        if let Some(cell) = record.cells.get_mut(&self.excel.col_decision) {
            *cell = decision.as_str().to_string();
        }

        debug!("Row {} (sheet row {}) set to {:?}", row, sheet_row, decision);
        Ok(())
    }

    /// Overwrites the backing file with the in-memory workbook.
    pub fn persist(&self) -> Result<(), ReviewError> {
        self.persist_to(&self.excel.path_to_sheet)
    }

    /// Writes the in-memory workbook to another file, the backing file is untouched.
    pub fn persist_to(&self, path: &Path) -> Result<(), ReviewError> {
        set_spreadsheet(path, &self.book)?;
        info!("Saved {} records to {}", self.records.len(), path.display());
        Ok(())
    }

    /// One edit, durably written before returning.
    pub fn commit_decision(&mut self, row: RowId, decision: Decision) -> Result<(), ReviewError> {
        self.set_decision(row, decision)?;
        self.persist()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_book(dir: &TempDir, rows: &[&[&str]]) -> SheetInfo {
        let path = dir.path().join("products.xlsx");
        let mut book = umya_spreadsheet::new_file();
        let sheet = book.get_sheet_mut(&0).unwrap();
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                sheet.get_cell_value_mut((c as u32 + 1, r as u32 + 1)).set_value_string(*value);
            }
        }
        umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();
        SheetInfo { path_to_sheet: path, ..SheetInfo::default() }
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let dir = TempDir::new().unwrap();
        let excel = SheetInfo { path_to_sheet: dir.path().join("nope.xlsx"), ..SheetInfo::default() };
        assert!(matches!(RecordStore::load(&excel), Err(LoadError::Read { .. })));
    }

    #[test]
    fn missing_decision_column_is_a_load_error() {
        let dir = TempDir::new().unwrap();
        let excel = write_book(&dir, &[&["EAN", "Sale"], &["111", "2/mo"]]);
        match RecordStore::load(&excel) {
            Err(LoadError::MissingColumn { column, .. }) => assert_eq!(column, "Mua Hay Ko"),
            other => panic!("expected missing column, got {:?}", other.err()),
        }
    }

    #[test]
    fn out_of_range_row_leaves_store_untouched() {
        let dir = TempDir::new().unwrap();
        let excel = write_book(&dir, &[&["EAN", "Sale", "Mua Hay Ko"], &["111", "2/mo", "N"]]);
        let mut store = RecordStore::load(&excel).unwrap();
        let before = store.records().to_vec();

        let err = store.set_decision(1, Decision::Buy).unwrap_err();
        assert!(matches!(err, ReviewError::InvalidRow { row: 1, len: 1 }));
        assert_eq!(store.records(), before.as_slice());
    }

    #[test]
    fn set_decision_updates_record_and_cell_view() {
        let dir = TempDir::new().unwrap();
        let excel = write_book(&dir, &[&["EAN", "Sale", "Mua Hay Ko"], &["111", "2/mo", ""]]);
        let mut store = RecordStore::load(&excel).unwrap();

        store.set_decision(0, Decision::NoBuy).unwrap();
        let record = store.record(0).unwrap();
        assert_eq!(record.decision, Decision::NoBuy);
        assert_eq!(record.cell("Mua Hay Ko"), "N");
    }

    #[test]
    fn write_to_missing_folder_is_a_persist_error() {
        let dir = TempDir::new().unwrap();
        let excel = write_book(&dir, &[&["EAN", "Sale", "Mua Hay Ko"], &["111", "2/mo", ""]]);
        let store = RecordStore::load(&excel).unwrap();

        let target = dir.path().join("missing").join("copy.xlsx");
        assert!(matches!(store.persist_to(&target), Err(ReviewError::Persist { path, .. }) if path == target));
    }

    #[test]
    fn failed_commit_keeps_the_edit_for_a_retry() {
        let dir = TempDir::new().unwrap();
        let excel = write_book(&dir, &[&["EAN", "Sale", "Mua Hay Ko"], &["111", "2/mo", ""]]);
        let mut store = RecordStore::load(&excel).unwrap();

        std::fs::remove_file(&excel.path_to_sheet).unwrap();
        std::fs::create_dir(&excel.path_to_sheet).unwrap();
        let err = store.commit_decision(0, Decision::Buy).unwrap_err();
        assert!(matches!(err, ReviewError::Persist { .. }));
        assert_eq!(store.record(0).unwrap().decision, Decision::Buy);

        std::fs::remove_dir(&excel.path_to_sheet).unwrap();
        store.persist().unwrap();
        assert_eq!(RecordStore::load(&excel).unwrap().record(0).unwrap().decision, Decision::Buy);
    }

    #[test]
    fn failed_reload_keeps_current_records() {
        let dir = TempDir::new().unwrap();
        let excel = write_book(&dir, &[&["EAN", "Sale", "Mua Hay Ko"], &["111", "2/mo", "Y"], &["222", "1/mo", ""]]);
        let mut store = RecordStore::load(&excel).unwrap();
        let before = store.records().to_vec();

        std::fs::remove_file(&excel.path_to_sheet).unwrap();
        assert!(matches!(store.reload(), Err(LoadError::Read { .. })));
        assert_eq!(store.records(), before.as_slice());

        std::fs::write(&excel.path_to_sheet, b"not a zip archive").unwrap();
        assert!(matches!(store.reload(), Err(LoadError::Read { .. })));
        assert_eq!(store.records(), before.as_slice());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn unknown_decision_text_loads_as_unset() {
        let dir = TempDir::new().unwrap();
        let excel = write_book(&dir, &[&["EAN", "Sale", "Mua Hay Ko"], &["111", "2/mo", "maybe"]]);
        let store = RecordStore::load(&excel).unwrap();
        assert_eq!(store.record(0).unwrap().decision, Decision::Unset);
    }
}
