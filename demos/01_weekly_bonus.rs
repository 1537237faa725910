/// weekly bonus - walk a customer through a few weekly payments
use savings_scheme_rs::chrono::{Duration, TimeZone, Utc};
use savings_scheme_rs::bonus::total_bonus;
use savings_scheme_rs::{BonusEngine, BonusPolicy, Money, SafeTimeProvider, TimeSource, Uuid};

fn main() {
    // monday 1 january 2024
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
    let time = SafeTimeProvider::new(TimeSource::Test(start));
    let control = time.test_control().unwrap();

    let engine = BonusEngine::new(BonusPolicy::default());
    let user_id = Uuid::new_v4();
    let scheme_id = Uuid::new_v4();

    let mut payments = Vec::new();
    // weekdays earn the bonus, the saturday payment does not
    for gap in [0, 7, 12, 9] {
        control.advance(Duration::days(gap));
        let payment = engine.record_payment(user_id, scheme_id, Money::from_major(500), start, &time);
        println!(
            "{} week {} paid {} bonus {} credited {}",
            payment.date.format("%a %Y-%m-%d"),
            payment.week,
            payment.amount,
            payment.bonus,
            payment.total_credited
        );
        payments.push(payment);
    }

    let last = payments.last().map(|p| p.date);
    control.advance(Duration::days(7));
    let status = engine.status(last, start, &time);
    println!(
        "next due: {:?}, due now: {}, bonus eligible: {}",
        status.next_payment_due.map(|d| d.date_naive()),
        status.payment_due,
        status.bonus_eligible
    );
    println!("total bonus so far: {}", total_bonus(&payments));
}
