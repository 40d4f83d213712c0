use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed set of expense categories shared by every view and report.
/// Serializes as the human-readable label so persisted JSON matches the
/// documented external format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ExpenseCategory {
    #[serde(rename = "Food & Dining")]
    FoodAndDining,
    Transportation,
    Shopping,
    Entertainment,
    #[serde(rename = "Bills & Utilities")]
    BillsAndUtilities,
    Healthcare,
    Education,
    Travel,
    Groceries,
    Other,
}

impl ExpenseCategory {
    /// Every category, in the order views present them.
    pub const ALL: [ExpenseCategory; 10] = [
        ExpenseCategory::FoodAndDining,
        ExpenseCategory::Transportation,
        ExpenseCategory::Shopping,
        ExpenseCategory::Entertainment,
        ExpenseCategory::BillsAndUtilities,
        ExpenseCategory::Healthcare,
        ExpenseCategory::Education,
        ExpenseCategory::Travel,
        ExpenseCategory::Groceries,
        ExpenseCategory::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ExpenseCategory::FoodAndDining => "Food & Dining",
            ExpenseCategory::Transportation => "Transportation",
            ExpenseCategory::Shopping => "Shopping",
            ExpenseCategory::Entertainment => "Entertainment",
            ExpenseCategory::BillsAndUtilities => "Bills & Utilities",
            ExpenseCategory::Healthcare => "Healthcare",
            ExpenseCategory::Education => "Education",
            ExpenseCategory::Travel => "Travel",
            ExpenseCategory::Groceries => "Groceries",
            ExpenseCategory::Other => "Other",
        }
    }

    /// Labels in presentation order, for `group_by_category`.
    pub fn labels() -> [&'static str; 10] {
        Self::ALL.map(Self::label)
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fixed set of income categories, separate from expense categories.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum IncomeCategory {
    Salary,
    Freelance,
    Business,
    Investment,
    Rental,
    Bonus,
    Gift,
    Other,
}

impl IncomeCategory {
    pub const ALL: [IncomeCategory; 8] = [
        IncomeCategory::Salary,
        IncomeCategory::Freelance,
        IncomeCategory::Business,
        IncomeCategory::Investment,
        IncomeCategory::Rental,
        IncomeCategory::Bonus,
        IncomeCategory::Gift,
        IncomeCategory::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            IncomeCategory::Salary => "Salary",
            IncomeCategory::Freelance => "Freelance",
            IncomeCategory::Business => "Business",
            IncomeCategory::Investment => "Investment",
            IncomeCategory::Rental => "Rental",
            IncomeCategory::Bonus => "Bonus",
            IncomeCategory::Gift => "Gift",
            IncomeCategory::Other => "Other",
        }
    }

    pub fn labels() -> [&'static str; 8] {
        Self::ALL.map(Self::label)
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

impl fmt::Display for IncomeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
