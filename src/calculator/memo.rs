//! Process-lifetime memo tables for the pricer and the yield solver
//!
//! Keys compare floats bit-for-bit (`f64::to_bits`), so two rates that differ
//! in the last ulp get separate entries, as do `0.0` and `-0.0`. Nothing is
//! evicted; tables only grow until `clear` is called explicitly.

use std::collections::HashMap;

use log::debug;

use super::pricer::discount_factor;

/// Hit/miss counters for one memo table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoStats {
    pub hits: u64,
    pub misses: u64,
}

impl MemoStats {
    fn record_hit(&mut self) {
        self.hits += 1;
    }

    fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Fraction of lookups served from the table
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Identifies one coupon schedule: (coupon cashflow, discount rate)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CouponMemoKey {
    cashflow_bits: u64,
    rate_bits: u64,
}

impl CouponMemoKey {
    pub fn new(cashflow: f64, rate: f64) -> Self {
        Self {
            cashflow_bits: cashflow.to_bits(),
            rate_bits: rate.to_bits(),
        }
    }

    pub fn cashflow(&self) -> f64 {
        f64::from_bits(self.cashflow_bits)
    }

    pub fn rate(&self) -> f64 {
        f64::from_bits(self.rate_bits)
    }
}

/// Cumulative discounted coupon values per schedule
///
/// Each record is indexed by year: `record[0] == 0.0` and
/// `record[k] == record[k - 1] + cashflow / (1 + rate)^k`.
#[derive(Debug, Default)]
pub struct CouponMemo {
    records: HashMap<CouponMemoKey, Vec<f64>>,
    stats: MemoStats,
}

impl CouponMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of `cashflow / (1 + rate)^k` for k in 1..=years
    ///
    /// Extends the record from its highest cached year when `years` is past
    /// the end. Earlier entries are never touched again.
    pub fn cumulative(&mut self, cashflow: f64, rate: f64, years: u16) -> f64 {
        let key = CouponMemoKey::new(cashflow, rate);
        let record = self.records.entry(key).or_insert_with(|| vec![0.0]);
        let target = usize::from(years);

        if let Some(&value) = record.get(target) {
            self.stats.record_hit();
            return value;
        }

        self.stats.record_miss();
        let mut total = record[record.len() - 1];
        // The record stops short of `years`, so its length fits a u16
        let first_new = record.len() as u16;
        record.reserve(target + 1 - record.len());
        for year in first_new..=years {
            total += cashflow / discount_factor(year, rate);
            record.push(total);
        }

        debug!(
            "coupon memo cf={} rate={}: filled years {}..={}",
            cashflow, rate, first_new, years
        );
        total
    }

    /// Cached entry for `years`, without filling
    pub fn get(&self, cashflow: f64, rate: f64, years: u16) -> Option<f64> {
        self.records
            .get(&CouponMemoKey::new(cashflow, rate))
            .and_then(|record| record.get(usize::from(years)).copied())
    }

    /// Highest year cached for a schedule (0 when only the base case exists)
    pub fn cached_years(&self, cashflow: f64, rate: f64) -> Option<u16> {
        self.records
            .get(&CouponMemoKey::new(cashflow, rate))
            .map(|record| (record.len() - 1) as u16)
    }

    /// Number of distinct schedules
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn stats(&self) -> MemoStats {
        self.stats
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.stats = MemoStats::default();
    }
}

/// Identifies one yield search: (coupon, years, face, price)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YieldMemoKey {
    coupon_bits: u64,
    years: u16,
    face_bits: u64,
    price_bits: u64,
}

impl YieldMemoKey {
    pub fn new(coupon: f64, years: u16, face: f64, price: f64) -> Self {
        Self {
            coupon_bits: coupon.to_bits(),
            years,
            face_bits: face.to_bits(),
            price_bits: price.to_bits(),
        }
    }
}

/// Solved yields, NaN included so failed searches are not repeated
#[derive(Debug, Default)]
pub struct YieldMemo {
    entries: HashMap<YieldMemoKey, f64>,
    stats: MemoStats,
}

impl YieldMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a solved yield, counting the hit or miss
    pub fn lookup(&mut self, key: &YieldMemoKey) -> Option<f64> {
        match self.entries.get(key) {
            Some(&value) => {
                self.stats.record_hit();
                Some(value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    pub fn insert(&mut self, key: YieldMemoKey, value: f64) {
        self.entries.insert(key, value);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> MemoStats {
        self.stats
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats = MemoStats::default();
    }
}
