pub mod raw;

use crate::money::Money;
use crate::raw::{money, present, timestamp};
use chrono::NaiveDateTime;
use num_traits::Zero;
use std::fmt;

/// One payment as received for a student's course ledger.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentRecord {
    /// `None` when the backend date is missing or unreadable, which sorts first
    pub date: Option<NaiveDateTime>,
    pub paid_amount: Money,
    pub course_fee: Money,
    pub receipt_number: String,
    pub course: String,
    pub reported_balance: Option<Money>,
}

impl PaymentRecord {
    pub fn new(date: Option<NaiveDateTime>, paid_amount: Money, course_fee: Money) -> Self {
        PaymentRecord {
            date,
            paid_amount,
            course_fee,
            ..Default::default()
        }
    }

    pub fn display_date(&self) -> String {
        self.date
            .map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }
}

impl From<raw::Payment> for PaymentRecord {
    fn from(raw_payment: raw::Payment) -> Self {
        let raw::Payment {
            dates,
            paid,
            course_fees,
            receipt,
            course,
            balance,
        } = raw_payment;
        PaymentRecord {
            date: timestamp(&dates),
            paid_amount: money(&paid),
            course_fee: money(&course_fees),
            receipt_number: present(&receipt).unwrap_or_default(),
            course: present(&course).unwrap_or_default(),
            reported_balance: balance.as_ref().map(|b| b.money()),
        }
    }
}

/// A payment with the balance left on the course after it.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedPayment {
    pub record: PaymentRecord,
    pub running_balance: Money,
}

impl AnnotatedPayment {
    /// Judged on the running balance alone. `reported_balance` is the backend's own figure
    /// and is kept for display only, see DESIGN.md on the status badge.
    pub fn status(&self) -> PaymentStatus {
        let paid = self.record.paid_amount;
        let balance = self.running_balance;
        if balance.is_zero() && paid.is_positive() {
            PaymentStatus::Paid
        } else if paid.is_zero() && balance == self.record.course_fee {
            PaymentStatus::Pending
        } else if paid.is_positive() && balance.is_positive() {
            PaymentStatus::Partial
        } else {
            PaymentStatus::Unknown
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Paid,
    Pending,
    Partial,
    Unknown,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Partial => "Partial",
            PaymentStatus::Unknown => "Unknown",
        };
        f.pad(label)
    }
}
