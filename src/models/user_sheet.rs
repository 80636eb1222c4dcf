use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const SELLERAMP_LOOKUP: &str = "https://sas.selleramp.com/sas/lookup?src=&ver=&SasLookup%5Bsearch_term%5D=%27{ean}&search_term={ean}&force_old_search";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct SheetInfo {
    pub path_to_sheet: PathBuf, // Full path to the spreadsheet, rewritten on every decision
    pub sheet_name: Option<String>, // None means the first sheet in the book
    pub header_row: u32, // Row holding the column names, data starts on the row after
    pub col_ean: String,
    pub col_sale: String,
    pub col_decision: String,
    pub col_bsr: String,
    pub col_seller: String,
    pub col_product_link: String,
    pub col_amazon_link: String,
    pub col_price_source: String,
    pub col_price_target: String,
    pub col_asin: String,
    pub col_coeff: String,
    pub col_profit: String,
}

impl Default for SheetInfo {
    fn default() -> Self {
        SheetInfo {
            path_to_sheet: PathBuf::from("Qogita Analyse v3_check+JEWLWW(photo).xlsx"),
            sheet_name: None,
            header_row: 1,
            col_ean: String::from("EAN"),
            col_sale: String::from("Sale"),
            col_decision: String::from("Mua Hay Ko"),
            col_bsr: String::from("BSR"),
            col_seller: String::from("Seller"),
            col_product_link: String::from("Product Link"),
            col_amazon_link: String::from("Link Amazon.fr"),
            col_price_source: String::from("Prix Qogita"),
            col_price_target: String::from("Prix amazon"),
            col_asin: String::from("ASIN"),
            col_coeff: String::from("Coeff"),
            col_profit: String::from("Profit"),
        }
    }
}

impl SheetInfo {
    /// Columns the store refuses to load without.
    pub fn required_columns(&self) -> [&str; 3] {
        [self.col_ean.as_str(), self.col_sale.as_str(), self.col_decision.as_str()]
    }

    /// Columns shown in the details panel, in order.
    pub fn detail_columns(&self) -> [&str; 6] {
        [
            self.col_ean.as_str(),
            self.col_price_source.as_str(),
            self.col_price_target.as_str(),
            self.col_asin.as_str(),
            self.col_coeff.as_str(),
            self.col_profit.as_str(),
        ]
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ViewInfo {
    pub image_dir: PathBuf, // Folder with one <ean>.png per product
    pub page_size: usize,
    pub lookup_url_template: String, // {ean} is replaced by the digits-only EAN
    pub only_undecided: bool, // Start with the "undecided only" filter on
}

impl Default for ViewInfo {
    fn default() -> Self {
        ViewInfo {
            image_dir: PathBuf::from("SellerampPhoto"),
            page_size: 25,
            lookup_url_template: String::from(SELLERAMP_LOOKUP),
            only_undecided: false,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ReviewSettings {
    pub sheet: SheetInfo,
    pub view: ViewInfo,
}
