use anyhow::{Context, Error, Result};
use itertools::Itertools;
use log::warn;
use num_traits::Zero;
use rust_decimal::prelude::*;
use std::convert::TryFrom;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub, SubAssign};

/// Basically this holds a Decimal that is scaled out to at least 2 dp (doesn't round).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(pub Decimal);

impl Money {
    pub fn new(mut d: Decimal) -> Self {
        if d.scale() < 2 {
            d.rescale(2);
        }
        Self(d)
    }

    /// Reads an amount the way the portal backend sends them: the longest leading number is
    /// taken (an exponent included) and anything unreadable counts as zero.
    pub fn lenient(text: &str) -> Self {
        let text = text.trim();
        let bytes = text.as_bytes();
        let mut end = usize::from(matches!(bytes.first(), Some(b'-' | b'+')));
        let mut digits = false;
        let mut point = false;
        while let Some(&b) = bytes.get(end) {
            match b {
                b'0'..=b'9' => digits = true,
                b'.' if !point => point = true,
                _ => break,
            }
            end += 1;
        }
        if !digits {
            return Self::zero();
        }

        let mantissa_end = end;
        if matches!(bytes.get(end), Some(b'e' | b'E')) {
            let mut exp_end = end + 1;
            if matches!(bytes.get(exp_end), Some(b'-' | b'+')) {
                exp_end += 1;
            }
            let exp_digits = bytes[exp_end..].iter().take_while(|b| b.is_ascii_digit()).count();
            if exp_digits > 0 {
                end = exp_end + exp_digits;
            }
        }

        let number = &text[..end];
        let parsed = if end > mantissa_end {
            Decimal::from_scientific(number)
        } else {
            Decimal::from_str(number)
        };
        match parsed {
            Ok(d) => Self::new(d),
            Err(err) => {
                warn!("Amount {} out of range, read as zero: {}", text, err);
                Self::zero()
            }
        }
    }

    pub fn floor_zero(self) -> Self {
        if self.0.is_sign_negative() {
            Self::zero()
        } else {
            self
        }
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }
}

impl TryFrom<f64> for Money {
    type Error = Error;

    fn try_from(f: f64) -> Result<Self> {
        let d = Decimal::from_f64(f).context(format!("Failed to convert {} to Money", f))?;
        Ok(Self::new(d))
    }
}

impl From<Decimal> for Money {
    fn from(d: Decimal) -> Self {
        Self::new(d)
    }
}

/// Groups the integer digits en-IN style: the last three, then pairs.
fn group_en_in(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_owned();
    }
    let (mut head, tail) = digits.split_at(digits.len() - 3);
    let mut pairs = Vec::new();
    while head.len() > 2 {
        let (rest, pair) = head.split_at(head.len() - 2);
        pairs.push(pair);
        head = rest;
    }
    pairs.push(head);
    format!("{},{}", pairs.iter().rev().join(","), tail)
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fixed = format!("{:.2}", self.0.abs().round_dp(2));
        let (int, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
        let amount = format!("₹{}.{}", group_en_in(int), frac);
        if self.0.is_sign_negative() && !self.0.is_zero() {
            write!(f, "({})", amount)
        } else {
            write!(f, "{}", amount)
        }
    }
}

impl Add<Money> for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money(self.0 + other.0)
    }
}

impl Sub<Money> for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Money) {
        self.0 -= other.0;
    }
}

impl Zero for Money {
    fn zero() -> Self {
        Self::new(Decimal::ZERO)
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

#[cfg(test)]
mod money_tests {
    use super::*;
    use std::convert::TryInto;

    #[test]
    fn money_from_f64() -> Result<()> {
        // less than 2 dp
        let m: Money = 1f64.try_into()?;
        assert_eq!(m.to_string(), "₹1.00");
        let m: Money = 1.1.try_into()?;
        assert_eq!(m.to_string(), "₹1.10");

        let m: Money = 1.11.try_into()?;
        assert_eq!(m.to_string(), "₹1.11");

        // display rounds to paise
        let m: Money = 1.116.try_into()?;
        assert_eq!(m.to_string(), "₹1.12");

        Ok(())
    }

    #[test]
    fn en_in_grouping() -> Result<()> {
        assert_eq!(Money::try_from(999.0)?.to_string(), "₹999.00");
        assert_eq!(Money::try_from(20000.0)?.to_string(), "₹20,000.00");
        assert_eq!(Money::try_from(120000.0)?.to_string(), "₹1,20,000.00");
        assert_eq!(Money::try_from(12345678.5)?.to_string(), "₹1,23,45,678.50");
        assert_eq!(Money::try_from(-1500.0)?.to_string(), "(₹1,500.00)");
        Ok(())
    }

    #[test]
    fn lenient_amounts() {
        assert_eq!(Money::lenient("5000"), Money::new(Decimal::from(5000)));
        assert_eq!(Money::lenient(" 2500.50 "), Money::new(Decimal::new(250050, 2)));
        assert_eq!(Money::lenient("5000/-"), Money::new(Decimal::from(5000)));
        assert_eq!(Money::lenient("20,000"), Money::new(Decimal::from(20)));
        assert_eq!(Money::lenient("-300"), Money::new(Decimal::from(-300)));
        assert_eq!(Money::lenient(""), Money::zero());
        assert_eq!(Money::lenient("N/A"), Money::zero());
        assert_eq!(Money::lenient("1.2.3"), Money::new(Decimal::new(12, 1)));
        assert_eq!(Money::lenient("1e3"), Money::new(Decimal::from(1000)));
        assert_eq!(Money::lenient("2.5E-1"), Money::new(Decimal::new(25, 2)));
        assert_eq!(Money::lenient("7e"), Money::new(Decimal::from(7)));
        assert_eq!(Money::lenient("-"), Money::zero());
        // beyond what a Decimal holds
        assert_eq!(Money::lenient("1e40"), Money::zero());
    }

    #[test]
    fn test_add_sub() -> Result<()> {
        let add = Money::try_from(100.00)? + Money::try_from(100.00)?;
        assert_eq!(add.to_string(), "₹200.00");
        let sub = Money::try_from(100.00)? - Money::try_from(150.00)?;
        assert_eq!(sub.floor_zero(), Money::zero());
        let total: Money = vec![Money::try_from(1.5)?, Money::try_from(2.5)?]
            .into_iter()
            .sum();
        assert_eq!(total, Money::try_from(4.0)?);
        Ok(())
    }

    #[test]
    #[should_panic(expected = "Addition overflowed")]
    #[allow(unused_must_use)]
    fn test_add_panic() -> () {
        Money::try_from(7.9e28).unwrap() + Money::try_from(7.9e28).unwrap();
    }
}
