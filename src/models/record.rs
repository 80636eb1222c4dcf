use std::fmt;

use indexmap::IndexMap;
use strum::EnumIter;

/// Position of a record among the data rows of the worksheet, zero-based.
pub type RowId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter)]
pub enum Decision {
    #[default]
    Unset,
    Buy,
    NoBuy,
}
impl Decision {
    /// Text written to the decision cell.
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Unset => "",
            Decision::Buy => "Y",
            Decision::NoBuy => "N",
        }
    }

    /// Anything that is not exactly "Y" or "N" (after trimming) reads as Unset.
    pub fn from_cell(raw: &str) -> Self {
        match raw.trim() {
            "Y" => Decision::Buy,
            "N" => Decision::NoBuy,
            _ => Decision::Unset,
        }
    }

    pub fn is_unset(&self) -> bool {
        *self == Decision::Unset
    }
}
impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Unset => write!(f, "-"),
            _ => write!(f, "{}", self.as_str()),
        }
    }
}

//--------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ExternalLink {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub row_id: RowId,
    pub ean: String,        // Verbatim cell text, see parsing::ean for the normalized form
    pub decision: Decision,
    pub sales_text: String, // "12.5/mo", "unknown", or whatever the sheet has
    pub bsr: String,
    pub seller: String,
    pub price_source: String,
    pub price_target: String,
    pub asin: String,
    pub coefficient: String,
    pub profit: String,
    pub links: Vec<ExternalLink>,
    pub cells: IndexMap<String, String>, // Every column of the row, EAN first
}

impl Record {
    pub fn cell(&self, column: &str) -> &str {
        self.cells.get(column).map(String::as_str).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn decision_reads_only_exact_markers() {
        assert_eq!(Decision::from_cell("Y"), Decision::Buy);
        assert_eq!(Decision::from_cell(" N "), Decision::NoBuy);
        assert_eq!(Decision::from_cell(""), Decision::Unset);
        assert_eq!(Decision::from_cell("y"), Decision::Unset);
        assert_eq!(Decision::from_cell("maybe"), Decision::Unset);
    }

    #[test]
    fn decision_cell_text_reads_back() {
        for decision in Decision::iter() {
            assert_eq!(Decision::from_cell(decision.as_str()), decision);
        }
    }

    #[test]
    fn pick_list_offers_every_decision_in_order() {
        let options: Vec<Decision> = Decision::iter().collect();
        assert_eq!(options, vec![Decision::Unset, Decision::Buy, Decision::NoBuy]);
        assert_eq!(options.iter().map(ToString::to_string).collect::<Vec<_>>(), vec!["-", "Y", "N"]);
    }
}
