use chrono::{DateTime, Local};
use rand::Rng;

use super::money::format_naira_decimal;

/// Masked sender account shown on every receipt
pub const SENDER_MASK: &str = "8065***1";

/// Fabricated record of a completed transfer
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub amount: u64,
    pub timestamp: DateTime<Local>,
    pub kind: String,
    pub sender: String,
    pub recipient: String,
    pub remark: String,
    pub transaction_no: String,
    pub session_id: String,
}

impl Receipt {
    pub fn fabricate(
        amount: u64,
        kind: impl Into<String>,
        recipient: impl Into<String>,
        remark: impl Into<String>,
    ) -> Self {
        let mut rng = rand::thread_rng();
        Self {
            amount,
            timestamp: Local::now(),
            kind: kind.into(),
            sender: SENDER_MASK.to_string(),
            recipient: recipient.into(),
            remark: remark.into(),
            transaction_no: rng.gen_range(100_000..1_000_000u32).to_string(),
            session_id: rng.gen_range(1_000_000..10_000_000u32).to_string(),
        }
    }

    /// Label/value rows in display order
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Amount", format_naira_decimal(self.amount)),
            ("Date & Time", self.timestamp.format("%b %d, %Y %I:%M %p").to_string()),
            ("Type", self.kind.clone()),
            ("Sender", self.sender.clone()),
            ("Recipient", self.recipient.clone()),
            ("Remark", self.remark.clone()),
            ("Transaction No.", self.transaction_no.clone()),
            ("Session ID", self.session_id.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fabricated_numbers_have_fixed_width() {
        let receipt = Receipt::fabricate(90_000, "Fiat Transfer", "John Doe", "Rent");
        assert_eq!(receipt.transaction_no.len(), 6);
        assert_eq!(receipt.session_id.len(), 7);
        assert_eq!(receipt.sender, SENDER_MASK);
    }

    #[test]
    fn test_rows_order() {
        let receipt = Receipt::fabricate(500, "Fiat Transfer", "Ada", "");
        let labels: Vec<_> = receipt.rows().into_iter().map(|(l, _)| l).collect();
        assert_eq!(labels[0], "Amount");
        assert_eq!(labels[7], "Session ID");
    }
}
