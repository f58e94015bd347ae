use rust_decimal::Decimal;

/// Derived completeness summary for one (year, month). Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MonthStatus {
    pub(crate) year: i32,
    pub(crate) month: u32,
    pub(crate) has_salary: bool,
    pub(crate) has_swile: bool,
    pub(crate) has_transport: bool,
    pub(crate) not_worked: bool,
    pub(crate) is_complete: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct YearStatistics {
    pub(crate) total_entries: usize,
    pub(crate) worked_months: usize,
    pub(crate) not_worked_months: usize,
    pub(crate) total_salary: Decimal,
    pub(crate) total_swile_payments: Decimal,
    pub(crate) average_salary: Decimal,
    pub(crate) paid_transport_count: usize,
    pub(crate) unpaid_transport_count: usize,
}
