#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickAction {
    pub label: &'static str,
    pub route: &'static str,
}

pub const QUICK_ACTIONS: &[QuickAction] = &[
    QuickAction { label: "Fiat Transfer", route: "/transfer" },
    QuickAction { label: "Buy Data", route: "/bills?type=data" },
    QuickAction { label: "Airtime", route: "/bills?type=airtime" },
    QuickAction { label: "Cable TV", route: "/bills?type=cable" },
    QuickAction { label: "Electricity", route: "/bills?type=electricity" },
    QuickAction { label: "Recharge Pins", route: "/pins" },
    QuickAction { label: "Education", route: "/bills?type=education" },
    QuickAction { label: "Bulk SMS", route: "/sms" },
    QuickAction { label: "Flight Tickets", route: "/flights" },
    QuickAction { label: "Betting Wallets", route: "/bills?type=betting" },
    QuickAction { label: "Bill Loans", route: "/bills?type=loans" },
    QuickAction { label: "Airtime to Cash", route: "/bills?type=airtime-cash" },
    QuickAction { label: "Rewards", route: "/rewards" },
    QuickAction { label: "Bots", route: "/bots" },
    QuickAction { label: "Support", route: "/support" },
    QuickAction { label: "Social Media", route: "/socials" },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionDirection {
    Credit,
    Debit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecentTransaction {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub amount: &'static str,
    pub when: &'static str,
    pub direction: TransactionDirection,
}

pub const RECENT_TRANSACTIONS: &[RecentTransaction] = &[
    RecentTransaction {
        title: "Received from David",
        subtitle: "Ref: David",
        amount: "+₦50,000",
        when: "Today",
        direction: TransactionDirection::Credit,
    },
    RecentTransaction {
        title: "Received from Forchard",
        subtitle: "+¢10 (N14,000)",
        amount: "+₦14,000",
        when: "Today",
        direction: TransactionDirection::Credit,
    },
    RecentTransaction {
        title: "Bought 30GB data",
        subtitle: "To 08065925000",
        amount: "-₦7,000",
        when: "Yesterday",
        direction: TransactionDirection::Debit,
    },
];

pub const TIPS: &[&str] = &[
    "Get instant bonus by sharing your referral link",
    "Make payment from your WhatsApp or Telegram",
    "Send Fiat money to 15 countries",
    "Buy data and airtime for your friends online",
    "Custom receipts",
    "More features coming soon beyond your expectations",
];

pub const FUND_OPTIONS: &[&str] = &["Bank transfer", "USSD", "Cards", "Request / QR"];
pub const WITHDRAW_OPTIONS: &[&str] = &["Linked bank", "Crypto", "Gift card", "Send user / QR"];
pub const BOTTOM_NAV: &[&str] = &["Home", "Finance", "Rewards", "Me"];

pub const USER_NAME: &str = "John Doe";
pub const USER_INITIALS: &str = "JD";
pub const BALANCE_DISPLAY: &str = "₦ 245,000.00";
