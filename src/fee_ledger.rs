use crate::money::Money;
use crate::payload::{Envelope, PaymentData};
use crate::payment::{AnnotatedPayment, PaymentRecord};
use anyhow::Result;
use itertools::Itertools;
use log::{debug, warn};
use num_traits::Zero;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentSummary {
    pub total_amount: Money,
    pub total_paid: Money,
    /// Never negative, overpayment shows as nothing due
    pub total_due: Money,
    pub record_count: usize,
}

/// Payments of one student's course in date order, each with the balance left after it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeeLedger {
    payments: Vec<AnnotatedPayment>,
    summary: PaymentSummary,
    divergent_fees: Vec<Money>,
}

impl FeeLedger {
    /// Sorts the records by date (same-date records keep their given order) and walks them
    /// from the course fee down, flooring each shown balance at zero.
    ///
    /// The opening balance is the course fee of the earliest record. Records are expected to
    /// agree on that fee; when they don't, every distinct fee is kept in `divergent_fees`.
    pub fn calculate(mut records: Vec<PaymentRecord>) -> Self {
        records.sort_by_key(|record| record.date);

        let course_fee = records
            .first()
            .map(|record| record.course_fee)
            .unwrap_or_else(Money::zero);
        let fees: Vec<Money> = records.iter().map(|record| record.course_fee).unique().collect();
        let divergent_fees = if fees.len() > 1 {
            warn!(
                "Payments disagree on the course fee ({}), using {}",
                fees.iter().join(", "),
                course_fee
            );
            fees
        } else {
            Vec::new()
        };

        let total_paid: Money = records.iter().map(|record| record.paid_amount).sum();
        let summary = PaymentSummary {
            total_amount: course_fee,
            total_paid,
            total_due: (course_fee - total_paid).floor_zero(),
            record_count: records.len(),
        };

        let mut balance = course_fee;
        let payments = records
            .into_iter()
            .map(|record| {
                balance -= record.paid_amount;
                AnnotatedPayment {
                    record,
                    running_balance: balance.floor_zero(),
                }
            })
            .collect();

        debug!("Fee ledger computed: {:?}", summary);
        FeeLedger {
            payments,
            summary,
            divergent_fees,
        }
    }

    pub fn from_payload(envelope: Envelope<PaymentData>) -> Result<Self> {
        let data = envelope.into_data()?;
        Ok(Self::calculate(
            data.payments.into_iter().map(PaymentRecord::from).collect(),
        ))
    }

    pub fn payments(&self) -> &[AnnotatedPayment] {
        &self.payments
    }

    pub fn summary(&self) -> &PaymentSummary {
        &self.summary
    }

    /// Distinct course fees in date order, empty unless the records disagree
    pub fn divergent_fees(&self) -> &[Money] {
        &self.divergent_fees
    }

    pub fn is_empty(&self) -> bool {
        self.payments.is_empty()
    }
}

impl fmt::Display for FeeLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let amt_pad = 14;
        for payment in &self.payments {
            let record = &payment.record;
            writeln!(
                f,
                "{:10} | {:12} | {:24} | {:>amt_pad$} | {:>amt_pad$} | {}",
                record.display_date(),
                record.receipt_number,
                record.course,
                record.paid_amount.to_string(),
                payment.running_balance.to_string(),
                payment.status(),
            )?;
        }
        let PaymentSummary {
            total_amount,
            total_paid,
            total_due,
            record_count,
        } = &self.summary;
        writeln!(f, "{:16} | {:>amt_pad$}", "Course Fee", total_amount.to_string())?;
        writeln!(f, "{:16} | {:>amt_pad$}", "Paid", total_paid.to_string())?;
        writeln!(f, "{:16} | {:>amt_pad$}", "Due", total_due.to_string())?;
        writeln!(f, "{:16} | {:>amt_pad$}", "Payments", record_count)?;
        let last_payment = self
            .payments
            .last()
            .map_or_else(|| "N/A".to_string(), |payment| payment.record.display_date());
        writeln!(f, "{:16} | {:>amt_pad$}", "Last Payment", last_payment)
    }
}

#[cfg(test)]
mod fee_ledger_tests {
    use super::*;
    use crate::date::parse_timestamp;
    use crate::payment::PaymentStatus;
    use anyhow::Context;
    use std::convert::TryFrom;

    fn payment(date: &str, paid: f64, fee: f64) -> Result<PaymentRecord> {
        Ok(PaymentRecord::new(
            parse_timestamp(date),
            Money::try_from(paid)?,
            Money::try_from(fee)?,
        ))
    }

    fn balances(ledger: &FeeLedger) -> Vec<Money> {
        ledger.payments().iter().map(|p| p.running_balance).collect()
    }

    #[test]
    fn running_balance_in_date_order() -> Result<()> {
        // given out of order
        let ledger = FeeLedger::calculate(vec![
            payment("2024-02-10", 5000.0, 20000.0)?,
            payment("2024-01-10", 5000.0, 20000.0)?,
        ]);
        assert_eq!(
            balances(&ledger),
            vec![Money::try_from(15000.0)?, Money::try_from(10000.0)?]
        );
        assert_eq!(
            ledger.payments()[0].record.display_date(),
            "10/01/2024",
            "Earliest payment first"
        );
        assert_eq!(
            ledger.summary(),
            &PaymentSummary {
                total_amount: Money::try_from(20000.0)?,
                total_paid: Money::try_from(10000.0)?,
                total_due: Money::try_from(10000.0)?,
                record_count: 2,
            }
        );
        assert!(ledger.divergent_fees().is_empty());
        Ok(())
    }

    #[test]
    fn epoch_dates_count_toward_totals() -> Result<()> {
        let envelope = crate::payload::parse_envelopes::<PaymentData>(
            r#"{"success":true,"data":{"payments":[
                {"Dates":"2024-01-10","Paid":5000,"courseFees":20000},
                {"Dates":1707523200000,"Paid":5000,"courseFees":20000}
            ]}}"#,
        )?
        .into_iter()
        .next()
        .context("One envelope")?;
        let ledger = FeeLedger::from_payload(envelope)?;
        assert_eq!(ledger.summary().record_count, 2);
        assert_eq!(ledger.summary().total_paid, Money::try_from(10000.0)?);
        assert_eq!(ledger.summary().total_due, Money::try_from(10000.0)?);
        assert_eq!(ledger.payments()[1].record.display_date(), "10/02/2024");
        assert!(ledger.to_string().ends_with("Last Payment     |     10/02/2024\n"));
        Ok(())
    }

    #[test]
    fn empty_ledger() {
        let ledger = FeeLedger::calculate(Vec::new());
        assert!(ledger.is_empty());
        assert_eq!(ledger.summary(), &PaymentSummary::default());
        assert!(ledger.summary().total_amount.is_zero());
        assert!(ledger.summary().total_due.is_zero());
    }

    #[test]
    fn overpayment_floors_at_zero() -> Result<()> {
        let ledger = FeeLedger::calculate(vec![
            payment("2024-01-01", 800.0, 1000.0)?,
            payment("2024-01-02", 500.0, 1000.0)?,
            payment("2024-01-03", 100.0, 1000.0)?,
        ]);
        assert_eq!(
            balances(&ledger),
            vec![Money::try_from(200.0)?, Money::zero(), Money::zero()]
        );
        assert_eq!(ledger.summary().total_paid, Money::try_from(1400.0)?);
        assert!(ledger.summary().total_due.is_zero());
        let statuses: Vec<_> = ledger.payments().iter().map(|p| p.status()).collect();
        assert_eq!(
            statuses,
            vec![PaymentStatus::Partial, PaymentStatus::Paid, PaymentStatus::Paid]
        );
        Ok(())
    }

    #[test]
    fn same_date_keeps_given_order() -> Result<()> {
        let mut first = payment("2024-03-01", 100.0, 1000.0)?;
        first.receipt_number = "R1".to_string();
        let mut second = payment("2024-03-01", 200.0, 1000.0)?;
        second.receipt_number = "R2".to_string();
        let ledger = FeeLedger::calculate(vec![first, second]);
        let receipts: Vec<&str> = ledger
            .payments()
            .iter()
            .map(|p| p.record.receipt_number.as_str())
            .collect();
        assert_eq!(receipts, vec!["R1", "R2"]);
        Ok(())
    }

    #[test]
    fn undated_payments_sort_first() -> Result<()> {
        let ledger = FeeLedger::calculate(vec![
            payment("2024-03-01", 100.0, 1000.0)?,
            payment("", 300.0, 1000.0)?,
        ]);
        assert_eq!(ledger.payments()[0].record.date, None);
        assert_eq!(
            balances(&ledger),
            vec![Money::try_from(700.0)?, Money::try_from(600.0)?]
        );
        Ok(())
    }

    #[test]
    fn divergent_fees_are_surfaced() -> Result<()> {
        let ledger = FeeLedger::calculate(vec![
            payment("2024-02-01", 1000.0, 12000.0)?,
            payment("2024-01-01", 1000.0, 10000.0)?,
            payment("2024-03-01", 1000.0, 10000.0)?,
        ]);
        assert_eq!(ledger.summary().total_amount, Money::try_from(10000.0)?);
        assert_eq!(
            ledger.divergent_fees(),
            &[Money::try_from(10000.0)?, Money::try_from(12000.0)?]
        );
        assert_eq!(ledger.payments()[2].running_balance, Money::try_from(7000.0)?);
        Ok(())
    }

    #[test]
    fn balance_never_rises_and_calculation_repeats() -> Result<()> {
        let records = vec![
            payment("2024-05-01", 1250.5, 9999.99)?,
            payment("2024-01-15", 0.0, 9999.99)?,
            payment("2024-03-20", 4000.0, 9999.99)?,
            payment("2024-03-20", 6000.0, 9999.99)?,
            payment("2024-07-01", 300.0, 9999.99)?,
        ];
        let ledger = FeeLedger::calculate(records.clone());
        assert_eq!(ledger, FeeLedger::calculate(records));

        let balances = balances(&ledger);
        assert!(balances.iter().all(|b| !b.0.is_sign_negative()));
        assert!(balances.windows(2).all(|pair| pair[1] <= pair[0]));

        let summary = ledger.summary();
        if summary.total_paid <= summary.total_amount {
            assert_eq!(summary.total_due + summary.total_paid, summary.total_amount);
        } else {
            assert!(summary.total_due.is_zero());
        }
        Ok(())
    }
}
