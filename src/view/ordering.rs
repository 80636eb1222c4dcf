use crate::{
    models::record::{Record, RowId},
    parsing::sale_rate::sort_key,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewFilter {
    #[default]
    All,
    Undecided, // Only records without a decision yet
}

impl ViewFilter {
    pub fn keeps(&self, record: &Record) -> bool {
        match self {
            ViewFilter::All => true,
            ViewFilter::Undecided => record.decision.is_unset(),
        }
    }
}

/// Row ids ordered by sales rate, highest first. Ties keep storage order.
pub fn ordered_view(records: &[Record]) -> Vec<RowId> {
    ordered_view_filtered(records, ViewFilter::All)
}

pub fn ordered_view_filtered(records: &[Record], filter: ViewFilter) -> Vec<RowId> {
    let mut keyed: Vec<(RowId, f64)> = records.iter()
        .filter(|r| filter.keeps(r))
        .map(|r| (r.row_id, sort_key(&r.sales_text)))
        .collect();

    // sort_by is stable
    keyed.sort_by(|a, b| b.1.total_cmp(&a.1));
    keyed.into_iter().map(|(row, _)| row).collect()
}
