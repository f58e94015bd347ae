use super::Category;

/// Inclusive (year, month) bounds, compared lexicographically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MonthRange {
    pub(crate) start: (i32, u32),
    pub(crate) end: (i32, u32),
}

impl MonthRange {
    pub(crate) fn new(start_year: i32, start_month: u32, end_year: i32, end_month: u32) -> Self {
        Self {
            start: (start_year, start_month),
            end: (end_year, end_month),
        }
    }

    pub(crate) fn contains(&self, year: i32, month: u32) -> bool {
        let at = (year, month);
        self.start <= at && at <= self.end
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct FilterOptions {
    pub(crate) category: Option<Category>,
    pub(crate) transport_paid: Option<bool>,
    pub(crate) month_range: Option<MonthRange>,
}

impl FilterOptions {
    pub(crate) fn is_active(&self) -> bool {
        self.category.is_some() || self.transport_paid.is_some() || self.month_range.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SortField {
    Year,
    Month,
    Category,
    Amount,
    SalaryNet,
    SwilePayment,
    Notes,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Category => "category",
            Self::Amount => "amount",
            Self::SalaryNet => "salaryNet",
            Self::SwilePayment => "swilePayment",
            Self::Notes => "notes",
            Self::CreatedAt => "createdAt",
            Self::UpdatedAt => "updatedAt",
        }
    }

    /// Accepts the JSON field name or a lowercase / dashed spelling of it.
    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "year" => Some(Self::Year),
            "month" => Some(Self::Month),
            "category" => Some(Self::Category),
            "amount" => Some(Self::Amount),
            "salarynet" | "net" => Some(Self::SalaryNet),
            "swilepayment" | "swile" => Some(Self::SwilePayment),
            "notes" | "note" => Some(Self::Notes),
            "createdat" | "created" => Some(Self::CreatedAt),
            "updatedat" | "updated" => Some(Self::UpdatedAt),
            _ => None,
        }
    }

    pub(crate) fn all() -> &'static [SortField] {
        &[
            Self::Year,
            Self::Month,
            Self::Category,
            Self::Amount,
            Self::SalaryNet,
            Self::SwilePayment,
            Self::Notes,
            Self::CreatedAt,
            Self::UpdatedAt,
        ]
    }
}

impl std::fmt::Display for SortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SortOptions {
    pub(crate) field: SortField,
    pub(crate) direction: SortDirection,
}

impl Default for SortOptions {
    fn default() -> Self {
        Self {
            field: SortField::Month,
            direction: SortDirection::Desc,
        }
    }
}

impl std::fmt::Display for SortOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let arrow = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        write!(f, "{} {arrow}", self.field)
    }
}
