#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slide {
    pub title: &'static str,
    pub description: &'static str,
}

pub const SLIDES: &[Slide] = &[
    Slide {
        title: "Pan-African Reach",
        description: "Experience instant, seamless, and borderless payments across Africa.",
    },
    Slide {
        title: "Smart Transactions",
        description: "Smarter ways to pay bills, transfer funds, exchange crypto, and manage your finances, all in one app.",
    },
    Slide {
        title: "AI, Security, Compliance",
        description: "AI-powered, secure, and regulation-ready. MOLADA puts control back in your hands.",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactChannel {
    pub label: &'static str,
    pub value: &'static str,
}

pub const CONTACT_CHANNELS: &[ContactChannel] = &[
    ContactChannel { label: "Call", value: "+234 XXX XXX XXXX" },
    ContactChannel { label: "Email", value: "support@moladapay.com" },
    ContactChannel { label: "WhatsApp", value: "WhatsApp Support" },
];

pub const FOLLOW_US: &[&str] = &["TikTok", "Instagram", "Facebook", "Twitter", "Telegram", "WhatsApp"];
