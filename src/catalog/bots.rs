#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotStats {
    pub first_label: &'static str,
    pub first_value: &'static str,
    pub second_label: &'static str,
    pub second_value: &'static str,
}

/// A bot the user has already activated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotSummary {
    pub id: u32,
    pub name: &'static str,
    pub description: &'static str,
    pub active: bool,
    pub stats: BotStats,
}

pub const ACTIVE_BOTS: &[BotSummary] = &[
    BotSummary {
        id: 1,
        name: "Savings Automator",
        description: "Automatically saves 10% of every transfer received",
        active: true,
        stats: BotStats {
            first_label: "Saved",
            first_value: "₦45,000",
            second_label: "Transactions",
            second_value: "23",
        },
    },
    BotSummary {
        id: 2,
        name: "Bill Reminder",
        description: "Reminds you 3 days before bill due dates",
        active: true,
        stats: BotStats {
            first_label: "Reminders",
            first_value: "12",
            second_label: "Bills Paid",
            second_value: "8",
        },
    },
    BotSummary {
        id: 3,
        name: "Round-Up Bot",
        description: "Rounds up transactions and saves the difference",
        active: false,
        stats: BotStats {
            first_label: "Saved",
            first_value: "₦3,200",
            second_label: "Transactions",
            second_value: "45",
        },
    },
];

/// A bot the user can add
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotOffer {
    pub id: u32,
    pub name: &'static str,
    pub description: &'static str,
    pub premium: bool,
}

pub const AVAILABLE_BOTS: &[BotOffer] = &[
    BotOffer {
        id: 4,
        name: "Expense Tracker",
        description: "Categorizes and tracks all your expenses automatically",
        premium: false,
    },
    BotOffer {
        id: 5,
        name: "Smart Budgeter",
        description: "AI-powered budget suggestions based on spending patterns",
        premium: true,
    },
    BotOffer {
        id: 6,
        name: "Investment Advisor",
        description: "Get AI recommendations for crypto and stock investments",
        premium: true,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Save,
    Reminder,
    Report,
}

impl ActivityKind {
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Save => "$",
            Self::Reminder => "!",
            Self::Report => "#",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotActivity {
    pub time: &'static str,
    pub action: &'static str,
    pub kind: ActivityKind,
}

pub const RECENT_ACTIVITY: &[BotActivity] = &[
    BotActivity {
        time: "2 mins ago",
        action: "Savings Bot saved ₦500 from transfer",
        kind: ActivityKind::Save,
    },
    BotActivity {
        time: "1 hour ago",
        action: "Bill Reminder: Electricity bill due in 3 days",
        kind: ActivityKind::Reminder,
    },
    BotActivity {
        time: "3 hours ago",
        action: "Round-Up saved ₦45 from ₦1,955 transaction",
        kind: ActivityKind::Save,
    },
    BotActivity {
        time: "Yesterday",
        action: "Weekly expense report generated",
        kind: ActivityKind::Report,
    },
];

/// Header tiles: (label, value)
pub const HEADER_STATS: &[(&str, &str)] = &[
    ("Active Bots", "3"),
    ("Total Saved", "₦48k"),
    ("Actions", "68"),
];
