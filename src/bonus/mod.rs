pub mod week;

use chrono::{DateTime, Datelike, Duration, Utc};
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::BonusPolicy;
use crate::decimal::Money;
use crate::types::{UserId, UserSchemeId};

pub use week::{get_week_number, week_of, IsoWeek};

/// a contribution together with the bonus it earned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusPayment {
    pub id: Uuid,
    pub user_id: UserId,
    pub scheme_id: UserSchemeId,
    pub date: DateTime<Utc>,
    pub amount: Money,
    pub bonus: Money,
    pub week: IsoWeek,
    /// contribution plus bonus
    pub total_credited: Money,
}

/// where a customer stands in the weekly payment cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusStatus {
    pub next_payment_due: Option<DateTime<Utc>>,
    /// the next payment date has been reached
    pub payment_due: bool,
    /// a payment made now would earn the bonus
    pub bonus_eligible: bool,
}

/// weekly bonus rules applied to payment dates
#[derive(Debug, Clone, Default)]
pub struct BonusEngine {
    pub policy: BonusPolicy,
}

impl BonusEngine {
    pub fn new(policy: BonusPolicy) -> Self {
        Self { policy }
    }

    /// Monday-first weekday index of the payment below the policy's cutoff.
    ///
    /// The scheme start date is accepted but not consulted: no start-date
    /// rule has been defined for eligibility yet.
    pub fn is_eligible(&self, payment_date: DateTime<Utc>, _scheme_start_date: DateTime<Utc>) -> bool {
        payment_date.weekday().num_days_from_monday() < self.policy.eligible_weekdays
    }

    /// flat bonus for an eligible payment, zero otherwise
    pub fn bonus_for(&self, payment_date: DateTime<Utc>, scheme_start_date: DateTime<Utc>) -> Money {
        if self.is_eligible(payment_date, scheme_start_date) {
            self.policy.amount
        } else {
            Money::ZERO
        }
    }

    /// one cadence after the last payment, `None` past the calendar's range
    pub fn next_payment_date(&self, last_payment_date: DateTime<Utc>) -> Option<DateTime<Utc>> {
        last_payment_date.checked_add_signed(Duration::days(i64::from(self.policy.cadence_days)))
    }

    /// record a contribution made now
    pub fn record_payment(
        &self,
        user_id: UserId,
        scheme_id: UserSchemeId,
        amount: Money,
        scheme_start_date: DateTime<Utc>,
        time_provider: &SafeTimeProvider,
    ) -> BonusPayment {
        let date = time_provider.now();
        let bonus = self.bonus_for(date, scheme_start_date);

        tracing::debug!(%user_id, %scheme_id, %amount, %bonus, "bonus payment recorded");

        BonusPayment {
            id: Uuid::new_v4(),
            user_id,
            scheme_id,
            date,
            amount,
            bonus,
            week: get_week_number(date),
            total_credited: amount + bonus,
        }
    }

    /// Payment cycle status as of now.
    ///
    /// Without a previous payment there is no due date, so nothing is due.
    pub fn status(
        &self,
        last_payment_date: Option<DateTime<Utc>>,
        scheme_start_date: DateTime<Utc>,
        time_provider: &SafeTimeProvider,
    ) -> BonusStatus {
        let now = time_provider.now();
        let next_payment_due = last_payment_date.and_then(|last| self.next_payment_date(last));
        let payment_due = next_payment_due.is_some_and(|due| due <= now);

        BonusStatus {
            next_payment_due,
            payment_due,
            bonus_eligible: payment_due && self.is_eligible(now, scheme_start_date),
        }
    }
}

/// true when the payment falls Monday through Friday
pub fn is_eligible_for_bonus(payment_date: DateTime<Utc>, scheme_start_date: DateTime<Utc>) -> bool {
    BonusEngine::default().is_eligible(payment_date, scheme_start_date)
}

/// 5 for an eligible payment, 0 otherwise
pub fn calculate_bonus(payment_date: DateTime<Utc>, scheme_start_date: DateTime<Utc>) -> Money {
    BonusEngine::default().bonus_for(payment_date, scheme_start_date)
}

/// same weekday one week later
pub fn get_next_payment_date(last_payment_date: DateTime<Utc>) -> Option<DateTime<Utc>> {
    BonusEngine::default().next_payment_date(last_payment_date)
}

pub fn total_bonus(payments: &[BonusPayment]) -> Money {
    payments.iter().map(|p| p.bonus).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use hourglass_rs::TimeSource;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 10, 30, 0).unwrap()
    }

    #[test]
    fn test_weekday_eligibility() {
        let start = at(2024, 1, 1);
        // 2024-03-06 is a wednesday, 2024-03-09 a saturday
        assert!(is_eligible_for_bonus(at(2024, 3, 6), start));
        assert!(!is_eligible_for_bonus(at(2024, 3, 9), start));
        assert!(!is_eligible_for_bonus(at(2024, 3, 10), start));
        assert!(is_eligible_for_bonus(at(2024, 3, 4), start));
        assert!(is_eligible_for_bonus(at(2024, 3, 8), start));
    }

    #[test]
    fn test_start_date_does_not_affect_eligibility() {
        let wednesday = at(2024, 3, 6);
        for start in [at(2000, 1, 1), wednesday, at(2030, 12, 31)] {
            assert!(is_eligible_for_bonus(wednesday, start));
        }
    }

    #[test]
    fn test_bonus_matches_eligibility() {
        let start = at(2024, 1, 1);
        for day in 1..=14 {
            let date = at(2024, 4, day);
            let expected = if is_eligible_for_bonus(date, start) { Money::from_major(5) } else { Money::ZERO };
            assert_eq!(calculate_bonus(date, start), expected);
        }
    }

    #[test]
    fn test_next_payment_date() {
        assert_eq!(get_next_payment_date(at(2024, 2, 26)), Some(at(2024, 3, 4)));
        assert_eq!(get_next_payment_date(at(2023, 12, 28)), Some(at(2024, 1, 4)));
    }

    #[test]
    fn test_next_payment_date_out_of_range() {
        let last = Utc.from_utc_datetime(&NaiveDate::MAX.and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(get_next_payment_date(last), None);
    }

    #[test]
    fn test_custom_policy() {
        let engine = BonusEngine::new(BonusPolicy {
            amount: Money::from_major(20),
            cadence_days: 14,
            eligible_weekdays: 3,
        });
        let start = at(2024, 1, 1);
        assert_eq!(engine.bonus_for(at(2024, 3, 6), start), Money::from_major(20));
        assert_eq!(engine.bonus_for(at(2024, 3, 7), start), Money::ZERO);
        assert_eq!(engine.next_payment_date(at(2024, 3, 1)), Some(at(2024, 3, 15)));
    }

    #[test]
    fn test_record_payment() {
        let time = SafeTimeProvider::new(TimeSource::Test(at(2024, 1, 3)));
        let engine = BonusEngine::default();
        let payment = engine.record_payment(Uuid::new_v4(), Uuid::new_v4(), Money::from_major(200), at(2023, 6, 1), &time);

        assert_eq!(payment.bonus, Money::from_major(5));
        assert_eq!(payment.total_credited, Money::from_major(205));
        assert_eq!(payment.week, IsoWeek { year: 2024, week: 1 });
        assert_eq!(payment.date, time.now());
    }

    #[test]
    fn test_status_cycle() {
        let engine = BonusEngine::default();
        let start = at(2024, 1, 1);
        // wednesday
        let time = SafeTimeProvider::new(TimeSource::Test(at(2024, 3, 6)));
        let control = time.test_control().unwrap();

        let status = engine.status(None, start, &time);
        assert_eq!(status.next_payment_due, None);
        assert!(!status.payment_due);
        assert!(!status.bonus_eligible);

        let last = at(2024, 3, 1);
        let status = engine.status(Some(last), start, &time);
        assert_eq!(status.next_payment_due, Some(at(2024, 3, 8)));
        assert!(!status.payment_due);

        // friday the 8th, after the due time
        control.advance(Duration::days(2) + Duration::hours(1));
        let status = engine.status(Some(last), start, &time);
        assert!(status.payment_due);
        assert!(status.bonus_eligible);

        // saturday: still due, no bonus
        control.advance(Duration::days(1));
        let status = engine.status(Some(last), start, &time);
        assert!(status.payment_due);
        assert!(!status.bonus_eligible);
    }

    #[test]
    fn test_total_bonus() {
        let time = SafeTimeProvider::new(TimeSource::Test(at(2024, 3, 4)));
        let control = time.test_control().unwrap();
        let engine = BonusEngine::default();
        let (user, scheme, start) = (Uuid::new_v4(), Uuid::new_v4(), at(2024, 1, 1));

        let mut payments = Vec::new();
        for _ in 0..7 {
            payments.push(engine.record_payment(user, scheme, Money::from_major(100), start, &time));
            control.advance(Duration::days(1));
        }
        // monday through sunday: five weekdays earn the bonus
        assert_eq!(total_bonus(&payments), Money::from_major(25));
    }
}
