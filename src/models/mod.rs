mod query_options;
mod record;
mod record_json;
mod status;

pub(crate) use query_options::{FilterOptions, MonthRange, SortDirection, SortField, SortOptions};
pub(crate) use record::{Category, Record, RecordInput, RecordKind, SalaryDetails};
pub(crate) use record_json::RecordJson;
pub(crate) use status::{MonthStatus, YearStatistics};

#[cfg(test)]
pub(crate) mod fixtures;
#[cfg(test)]
mod tests;
