/// quick start - enroll a customer, record a few entries and print progress
use savings_scheme_rs::chrono::{Duration, TimeZone, Utc};
use savings_scheme_rs::serialization::SchemeProgressView;
use savings_scheme_rs::{
    calculate_interest, entry_interest, generate_receipt_number, Decimal, Money, PaymentMode, Rate, SafeTimeProvider,
    Scheme, TimeSource, Transaction, User, UserSchemeBuilder,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::Test(Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap()));
    let control = time.test_control().unwrap();

    // 1000 at 10% for a full year
    let interest = calculate_interest(Money::from_major(1_000), Rate::from_percentage(Decimal::from(10)), Decimal::from(365));
    println!("interest on 1000 @ 10% for 365 days: {}", interest);

    // enroll a customer in the daily savings scheme at 100 a day
    let customer = User::new("Meena", "9876543210", time.now());
    let mut enrollment = UserSchemeBuilder::new(customer.id, Scheme::daily_savings())
        .daily_amount(Money::from_major(100))
        .build(&time)?;

    // ten days of cash entries
    let mut transactions = Vec::new();
    for _ in 0..10 {
        let amount = Money::from_major(100);
        let tx = Transaction::new(customer.id, enrollment.id, amount, time.now(), PaymentMode::Cash)
            .with_interest(entry_interest(amount, &enrollment))
            .with_receipt(generate_receipt_number(&time));
        enrollment.current_balance += amount;
        transactions.push(tx);
        control.advance(Duration::days(1));
    }

    println!("last receipt: {}", transactions[9].receipt_number.as_deref().unwrap_or("-"));

    let view = SchemeProgressView::from_scheme(&enrollment, &transactions, &time)?;
    println!("{}", view.to_json_pretty()?);

    Ok(())
}
