//! Payment sources offered by the "Select Payment Method" dialogs and the
//! option lists used by scheduling dialogs.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentMethod {
    pub id: &'static str,
    pub label: &'static str,
    pub detail: &'static str,
}

const FIAT: PaymentMethod = PaymentMethod {
    id: "fiat",
    label: "Fiat Balance",
    detail: "₦ 245,000.00",
};

const CRYPTO: PaymentMethod = PaymentMethod {
    id: "crypto",
    label: "Crypto Wallet",
    detail: "0.045 BTC",
};

pub const TRANSFER_METHODS: &[PaymentMethod] = &[FIAT, CRYPTO];

pub const PIN_METHODS: &[PaymentMethod] = &[FIAT, CRYPTO];

pub const SMS_METHODS: &[PaymentMethod] = &[FIAT, CRYPTO];

pub const FLIGHT_METHODS: &[PaymentMethod] = &[
    FIAT,
    CRYPTO,
    PaymentMethod {
        id: "request",
        label: "Request from Friend",
        detail: "Share a payment request",
    },
];

pub const BILL_METHODS: &[PaymentMethod] = &[
    FIAT,
    CRYPTO,
    PaymentMethod {
        id: "loan",
        label: "Bill Loan",
        detail: "Eligible: ₦7,000",
    },
    PaymentMethod {
        id: "request",
        label: "Request Link",
        detail: "Share to pay",
    },
];

pub const TRANSFER_FREQUENCIES: &[&str] = &[
    "One-time",
    "Daily",
    "Weekly",
    "Monthly",
    "Every 1st of the month",
];

pub const PAY_ORDER_FREQUENCIES: &[&str] = &["Daily", "Weekly", "Monthly"];

/// Balance shown on the dashboard and in every fiat payment option
pub const FIAT_BALANCE: u64 = 245_000;
