use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Category {
    Salary,
    Bonus,
    Overtime,
    Benefits,
}

impl Category {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Salary => "salary",
            Self::Bonus => "bonus",
            Self::Overtime => "overtime",
            Self::Benefits => "benefits",
        }
    }

    /// Exact match on the wire name. Callers that accept user-typed text
    /// should lowercase it first.
    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s {
            "salary" => Some(Self::Salary),
            "bonus" => Some(Self::Bonus),
            "overtime" => Some(Self::Overtime),
            "benefits" => Some(Self::Benefits),
            _ => None,
        }
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Salary => "Salary",
            Self::Bonus => "Bonus",
            Self::Overtime => "Overtime",
            Self::Benefits => "Benefits",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fields only a salary record carries.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SalaryDetails {
    pub(crate) salary_net: Decimal,
    /// Supplementary benefit payment, usually received one month late.
    pub(crate) swile_payment: Decimal,
    pub(crate) transport_paid: bool,
    pub(crate) worked: bool,
    /// Snapshot of the year's recurring transport amount.
    pub(crate) transport_default: Option<Decimal>,
}

impl Default for SalaryDetails {
    fn default() -> Self {
        Self {
            salary_net: Decimal::ZERO,
            swile_payment: Decimal::ZERO,
            transport_paid: false,
            worked: true,
            transport_default: None,
        }
    }
}

/// The record variant. The category tag is the variant itself.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RecordKind {
    Salary(SalaryDetails),
    Bonus,
    Overtime,
    Benefits,
}

impl RecordKind {
    pub(crate) fn category(&self) -> Category {
        match self {
            Self::Salary(_) => Category::Salary,
            Self::Bonus => Category::Bonus,
            Self::Overtime => Category::Overtime,
            Self::Benefits => Category::Benefits,
        }
    }

    /// Kind for a non-salary category; `None` for salary, which needs details.
    pub(crate) fn other(category: Category) -> Option<Self> {
        match category {
            Category::Salary => None,
            Category::Bonus => Some(Self::Bonus),
            Category::Overtime => Some(Self::Overtime),
            Category::Benefits => Some(Self::Benefits),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Record {
    pub(crate) id: String,
    pub(crate) year: i32,
    pub(crate) month: u32,
    /// Equals `salary_net` for records created through the ledger.
    pub(crate) amount: Decimal,
    pub(crate) notes: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
    pub(crate) kind: RecordKind,
}

impl Record {
    pub(crate) fn category(&self) -> Category {
        self.kind.category()
    }

    pub(crate) fn is_salary(&self) -> bool {
        matches!(self.kind, RecordKind::Salary(_))
    }

    pub(crate) fn salary(&self) -> Option<&SalaryDetails> {
        match &self.kind {
            RecordKind::Salary(details) => Some(details),
            _ => None,
        }
    }

    pub(crate) fn salary_mut(&mut self) -> Option<&mut SalaryDetails> {
        match &mut self.kind {
            RecordKind::Salary(details) => Some(details),
            _ => None,
        }
    }

    pub(crate) fn is_in(&self, year: i32, month: u32) -> bool {
        self.year == year && self.month == month
    }

    /// Refresh `updated_at`, never letting it fall behind `created_at`.
    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now.max(self.created_at);
    }

    /// Every field as a fully-populated input, the base an update patch is
    /// merged onto.
    pub(crate) fn to_input(&self) -> RecordInput {
        let mut input = RecordInput {
            year: Some(self.year),
            month: Some(self.month),
            category: Some(self.category()),
            amount: Some(self.amount),
            notes: Some(self.notes.clone()),
            ..RecordInput::default()
        };
        if let Some(s) = self.salary() {
            input.salary_net = Some(s.salary_net);
            input.swile_payment = Some(s.swile_payment);
            input.transport_paid = Some(s.transport_paid);
            input.worked = Some(s.worked);
            input.transport_default = s.transport_default;
        }
        input
    }
}

/// Caller-supplied record fields. Used whole for create and as a partial
/// patch for update; identifiers and timestamps are never caller-owned.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct RecordInput {
    pub(crate) year: Option<i32>,
    pub(crate) month: Option<u32>,
    pub(crate) category: Option<Category>,
    pub(crate) amount: Option<Decimal>,
    pub(crate) salary_net: Option<Decimal>,
    pub(crate) swile_payment: Option<Decimal>,
    pub(crate) transport_paid: Option<bool>,
    pub(crate) worked: Option<bool>,
    pub(crate) transport_default: Option<Decimal>,
    pub(crate) notes: Option<String>,
}

impl RecordInput {
    pub(crate) fn salary(
        year: i32,
        month: u32,
        salary_net: Decimal,
        swile_payment: Decimal,
        transport_paid: bool,
    ) -> Self {
        Self {
            year: Some(year),
            month: Some(month),
            category: Some(Category::Salary),
            salary_net: Some(salary_net),
            swile_payment: Some(swile_payment),
            transport_paid: Some(transport_paid),
            worked: Some(true),
            ..Self::default()
        }
    }

    /// A month explicitly marked as not worked.
    pub(crate) fn not_worked(year: i32, month: u32) -> Self {
        Self {
            worked: Some(false),
            ..Self::salary(year, month, Decimal::ZERO, Decimal::ZERO, false)
        }
    }

    pub(crate) fn other(year: i32, month: u32, category: Category, amount: Decimal) -> Self {
        Self {
            year: Some(year),
            month: Some(month),
            category: Some(category),
            amount: Some(amount),
            ..Self::default()
        }
    }

    pub(crate) fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Overlay every field set in `patch` onto `self`.
    pub(crate) fn merged_with(mut self, patch: &RecordInput) -> Self {
        macro_rules! overlay {
            ($($field:ident),*) => {
                $(if patch.$field.is_some() {
                    self.$field = patch.$field.clone();
                })*
            };
        }
        overlay!(
            year,
            month,
            category,
            amount,
            salary_net,
            swile_payment,
            transport_paid,
            worked,
            transport_default,
            notes
        );
        self
    }
}
