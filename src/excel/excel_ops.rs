use std::path::Path;

use indexmap::IndexMap;
use umya_spreadsheet::{reader, writer, Spreadsheet, Worksheet};

use crate::{
    error::{LoadError, ReviewError},
    models::{record::{Decision, ExternalLink, Record}, user_sheet::SheetInfo},
};

pub fn get_spreadsheet(path: &Path) -> Result<Spreadsheet, LoadError> {
    reader::xlsx::read(path).map_err(|source| LoadError::Read { path: path.to_path_buf(), source })
}

pub fn set_spreadsheet(path: &Path, book: &Spreadsheet) -> Result<(), ReviewError> {
    writer::xlsx::write(book, path).map_err(|source| ReviewError::Persist { path: path.to_path_buf(), source })
}

/// Name of the worksheet to review; the first sheet when none is configured.
pub fn resolve_sheet_name(book: &Spreadsheet, excel: &SheetInfo) -> Result<String, LoadError> {
    match &excel.sheet_name {
        Some(sn) => {
            if book.get_sheet_by_name(sn).is_some() { Ok(sn.clone()) }
            else {
                Err(LoadError::MissingSheet { path: excel.path_to_sheet.clone(), name: sn.clone() })
            }
        }
        None => book.get_sheet(&0)
            .map(|s| s.get_name().to_string())
            .ok_or_else(|| LoadError::EmptyBook { path: excel.path_to_sheet.clone() }),
    }
}

pub fn cell_text(sheet: &Worksheet, col: u32, row: u32) -> String {
    match sheet.get_cell((col, row)) {
        Some(cell) => cell.get_value().trim().to_string(),
        None => String::new(),
    }
}

/// Header name -> column number (1-based). On duplicate names the leftmost wins.
pub fn get_header_columns(sheet: &Worksheet, header_row: u32) -> IndexMap<String, u32> {
    let mut columns: IndexMap<String, u32> = IndexMap::new();

    for col in 1..=sheet.get_highest_column() {
        let name = cell_text(sheet, col, header_row);
        if name.is_empty() { continue }
        columns.entry(name).or_insert(col);
    }
    columns
}

/// Last row with any value under a named column. Blank rows in between are kept so
/// row ids line up with sheet rows.
pub fn get_last_data_row(sheet: &Worksheet, header_row: u32, columns: &IndexMap<String, u32>) -> u32 {
    let mut row = sheet.get_highest_row();

    while row > header_row {
        if columns.values().any(|&col| !cell_text(sheet, col, row).is_empty()) { break }
        row -= 1;
    }
    row
}

/// Header names with the EAN column moved to the front. Display order only.
pub fn display_order<'a>(columns: &'a IndexMap<String, u32>, col_ean: &str) -> Vec<&'a str> {
    let mut order: Vec<&str> = Vec::with_capacity(columns.len());

    if let Some((ean, _)) = columns.get_key_value(col_ean) { order.push(ean.as_str()) }
    for name in columns.keys() {
        if name != col_ean { order.push(name.as_str()) }
    }
    order
}

pub fn get_records(sheet: &Worksheet, excel: &SheetInfo, columns: &IndexMap<String, u32>) -> Vec<Record> {
    let last_row = get_last_data_row(sheet, excel.header_row, columns);
    let order = display_order(columns, &excel.col_ean);
    let mut records: Vec<Record> = Vec::new();

    for (row_id, row) in (excel.header_row + 1..=last_row).enumerate() {
        let cells: IndexMap<String, String> = order.iter()
            .map(|&name| {
                let value = columns.get(name)
                    .map(|&col| cell_text(sheet, col, row))
                    .unwrap_or_default();
                (name.to_string(), value)
            })
            .collect();

        let get = |column: &String| cells.get(column).cloned().unwrap_or_default();

        let mut links: Vec<ExternalLink> = Vec::new();
        for (name, column) in [("Qogita", &excel.col_product_link), ("Amazon.fr", &excel.col_amazon_link)] {
            let url = get(column);
            if !url.is_empty() { links.push(ExternalLink { name: name.to_string(), url }) }
        }

        records.push(Record {
            row_id,
            ean: get(&excel.col_ean),
            decision: Decision::from_cell(&get(&excel.col_decision)),
            sales_text: get(&excel.col_sale),
            bsr: get(&excel.col_bsr),
            seller: get(&excel.col_seller),
            price_source: get(&excel.col_price_source),
            price_target: get(&excel.col_price_target),
            asin: get(&excel.col_asin),
            coefficient: get(&excel.col_coeff),
            profit: get(&excel.col_profit),
            links,
            cells,
        });
    }
    records
}
