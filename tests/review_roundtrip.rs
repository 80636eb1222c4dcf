use std::path::Path;

use ean_review::{
    excel::record_store::RecordStore,
    models::{record::Decision, user_sheet::{ReviewSettings, SheetInfo, ViewInfo}},
    view::{ordering::ordered_view, pagination::page_bounds, session::ReviewSession},
};
use tempfile::TempDir;

const HEADERS: [&str; 6] = ["Sale", "EAN", "Mua Hay Ko", "BSR", "Prix Qogita", "Notes"];

fn write_products(path: &Path, count: usize) {
    let mut book = umya_spreadsheet::new_file();
    let sheet = book.get_sheet_mut(&0).unwrap();
    for (c, name) in HEADERS.iter().enumerate() {
        sheet.get_cell_value_mut((c as u32 + 1, 1)).set_value_string(*name);
    }
    for i in 0..count {
        let row = i as u32 + 2;
        let sale = if i % 7 == 0 { String::from("unknown") } else { format!("{}/mo", i % 13) };
        sheet.get_cell_value_mut((1, row)).set_value_string(sale);
        sheet.get_cell_value_mut((2, row)).set_value_string(format!("3{:012}", i));
        sheet.get_cell_value_mut((4, row)).set_value_string(format!("{}", 1000 + i));
        sheet.get_cell_value_mut((5, row)).set_value_string(format!("{}.99", i));
        sheet.get_cell_value_mut((6, row)).set_value_string(format!("note {}", i));
    }
    umya_spreadsheet::writer::xlsx::write(&book, path).unwrap();
}

fn sheet_info(path: &Path) -> SheetInfo {
    SheetInfo { path_to_sheet: path.to_path_buf(), ..SheetInfo::default() }
}

#[test]
fn saving_without_edits_keeps_every_cell() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("products.xlsx");
    write_products(&path, 12);

    let store = RecordStore::load(&sheet_info(&path)).unwrap();
    store.persist().unwrap();
    let reloaded = RecordStore::load(&sheet_info(&path)).unwrap();

    assert_eq!(reloaded.records(), store.records());
    let stored: Vec<&str> = reloaded.records()[0].cells.keys().map(String::as_str).collect();
    assert_eq!(stored.len(), HEADERS.len());
    assert!(HEADERS.iter().all(|h| stored.contains(h)));
}

#[test]
fn committed_decision_survives_a_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("products.xlsx");
    write_products(&path, 5);

    let mut store = RecordStore::load(&sheet_info(&path)).unwrap();
    let ean = store.record(3).unwrap().ean.clone();
    store.commit_decision(3, Decision::Buy).unwrap();

    let reloaded = RecordStore::load(&sheet_info(&path)).unwrap();
    let record = reloaded.record(3).unwrap();
    assert_eq!(record.ean, ean);
    assert_eq!(record.decision, Decision::Buy);
    assert_eq!(record.cell("Mua Hay Ko"), "Y");
    assert!(reloaded.records().iter().enumerate().all(|(i, r)| i == 3 || r.decision == Decision::Unset));
}

#[test]
fn display_columns_put_ean_first() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("products.xlsx");
    write_products(&path, 1);

    let store = RecordStore::load(&sheet_info(&path)).unwrap();
    assert_eq!(store.display_columns(), vec!["EAN", "Sale", "Mua Hay Ko", "BSR", "Prix Qogita", "Notes"]);
}

#[test]
fn exported_copy_leaves_the_source_alone() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("products.xlsx");
    let copy = dir.path().join("copy.xlsx");
    write_products(&path, 4);

    let mut store = RecordStore::load(&sheet_info(&path)).unwrap();
    store.set_decision(0, Decision::NoBuy).unwrap();
    store.persist_to(&copy).unwrap();

    assert_eq!(RecordStore::load(&sheet_info(&path)).unwrap().record(0).unwrap().decision, Decision::Unset);
    assert_eq!(RecordStore::load(&sheet_info(&copy)).unwrap().record(0).unwrap().decision, Decision::NoBuy);
}

#[test]
fn sixty_rows_make_three_pages() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("products.xlsx");
    write_products(&path, 60);

    let settings = ReviewSettings {
        sheet: sheet_info(&path),
        view: ViewInfo { image_dir: dir.path().join("img"), page_size: 25, ..ViewInfo::default() },
    };
    let mut session = ReviewSession::open(&settings).unwrap();
    assert_eq!(session.page_count(), 3);
    assert_eq!(session.page_rows().len(), 25);

    assert_eq!(session.jump_to(3).unwrap(), 3);
    assert_eq!(page_bounds(3, 25, 60).unwrap(), (50, 60));
    assert_eq!(session.page_rows(), ordered_view(session.store().records())[50..60].to_vec());

    assert!(session.jump_to(4).is_err());
    assert_eq!(session.current_page(), 3);
    assert_eq!(session.next_page(), 3);
}

#[test]
fn unknown_sales_sort_after_zero() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("products.xlsx");
    write_products(&path, 14);

    let store = RecordStore::load(&sheet_info(&path)).unwrap();
    let order = ordered_view(store.records());
    // Rows 0 and 7 are "unknown", row 13 is "0/mo".
    assert_eq!(&order[order.len() - 3..], &[13, 0, 7]);
}
