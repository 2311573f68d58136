//! Pure arithmetic behind the order summaries: SMS units, recharge pin
//! totals and bill loan amounts. Every function here is deterministic except
//! the pin generator.

use std::num::IntErrorKind;

use rand::Rng;

use crate::catalog::bills::{LOAN_ELIGIBLE_AMOUNT, LOAN_MIN_AMOUNT};

/// Characters per SMS segment
pub const SMS_SEGMENT_LENGTH: usize = 160;

pub const MIN_PIN_QUANTITY: u32 = 1;
pub const MAX_PIN_QUANTITY: u32 = 20;

/// Digits in a generated recharge pin
pub const PIN_LENGTH: usize = 16;

/// Number of SMS segments a message occupies. An empty message still costs one.
pub fn sms_segments(message_len: usize) -> u32 {
    message_len.div_ceil(SMS_SEGMENT_LENGTH).max(1) as u32
}

/// Units debited for sending `message` to `recipients` numbers
pub fn total_sms_units(message: &str, recipients: usize) -> u32 {
    sms_segments(message.chars().count()) * recipients as u32
}

/// Clamp a typed quantity into [1, 20]. Numbers too large to parse clamp to
/// the maximum; empty or non-numeric input falls back to 1.
pub fn clamp_pin_quantity(input: &str) -> u32 {
    match input.trim().parse::<i64>() {
        Ok(q) => q.clamp(MIN_PIN_QUANTITY as i64, MAX_PIN_QUANTITY as i64) as u32,
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => MAX_PIN_QUANTITY,
        Err(_) => MIN_PIN_QUANTITY,
    }
}

pub fn pin_order_total(denomination: u64, quantity: u32) -> u64 {
    denomination * quantity as u64
}

/// Fabricate `quantity` recharge pins of 16 random digits each
pub fn generate_pins(quantity: u32) -> Vec<String> {
    let mut rng = rand::thread_rng();
    (0..quantity)
        .map(|_| {
            (0..PIN_LENGTH)
                .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
                .collect()
        })
        .collect()
}

/// `1234567890123456` -> `1234 5678 9012 3456`
pub fn format_pin(pin: &str) -> String {
    pin.chars()
        .collect::<Vec<_>>()
        .chunks(4)
        .map(|group| group.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Loan amount for a slider position, as a share of the eligible amount
pub fn loan_amount(percent: u8) -> u64 {
    let pct = percent.min(100) as u64;
    (LOAN_ELIGIBLE_AMOUNT * pct / 100).max(LOAN_MIN_AMOUNT)
}
