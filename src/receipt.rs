use hourglass_rs::SafeTimeProvider;

/// prefix printed on every receipt
pub const RECEIPT_PREFIX: &str = "FST";

/// `FST` + `yymmdd` + the last six digits of the current unix time in milliseconds
pub fn generate_receipt_number(time_provider: &SafeTimeProvider) -> String {
    let now = time_provider.now();
    let suffix = now.timestamp_millis().rem_euclid(1_000_000);
    format!("{RECEIPT_PREFIX}{}{suffix:06}", now.format("%y%m%d"))
}
