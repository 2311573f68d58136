#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaqCategory {
    pub id: &'static str,
    pub name: &'static str,
    pub count: u32,
}

pub const FAQ_CATEGORIES: &[FaqCategory] = &[
    FaqCategory { id: "account", name: "Account & Security", count: 12 },
    FaqCategory { id: "transfers", name: "Transfers & Payments", count: 15 },
    FaqCategory { id: "bills", name: "Bill Payments", count: 8 },
    FaqCategory { id: "crypto", name: "Crypto & Wallets", count: 10 },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Faq {
    pub question: &'static str,
    pub answer: &'static str,
}

impl Faq {
    /// Case-insensitive match against question or answer. An empty query matches everything.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        needle.is_empty()
            || self.question.to_lowercase().contains(&needle)
            || self.answer.to_lowercase().contains(&needle)
    }
}

pub const POPULAR_FAQS: &[Faq] = &[
    Faq {
        question: "How do I reset my password?",
        answer: "Go to Settings > Security > Change Password. You'll need to verify your identity via email or phone.",
    },
    Faq {
        question: "Why is my transfer pending?",
        answer: "Transfers can take up to 24 hours during peak times. If it exceeds this, please contact support.",
    },
    Faq {
        question: "How do I verify my account?",
        answer: "Complete KYC by uploading your valid ID and taking a selfie. Verification usually takes 1-2 hours.",
    },
    Faq {
        question: "What are the transfer limits?",
        answer: "Unverified accounts: ₦50,000/day. Verified accounts: ₦5,000,000/day. Premium: Unlimited.",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketStatus {
    Open,
    Resolved,
}

impl TicketStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Resolved => "resolved",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportTicket {
    pub id: &'static str,
    pub subject: &'static str,
    pub status: TicketStatus,
    pub date: &'static str,
}

pub const RECENT_TICKETS: &[SupportTicket] = &[
    SupportTicket {
        id: "TKT-001",
        subject: "Transfer delayed",
        status: TicketStatus::Resolved,
        date: "2 days ago",
    },
    SupportTicket {
        id: "TKT-002",
        subject: "Account verification issue",
        status: TicketStatus::Open,
        date: "1 day ago",
    },
];

pub const CHAT_GREETING: &str = "Hello! I'm MOLADA AI Assistant. How can I help you today?";

pub const CHAT_AUTO_REPLY: &str = "Thank you for your message. Our team will get back to you shortly. In the meantime, you can check our FAQ section for quick answers.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_faq_matches_is_case_insensitive() {
        assert!(POPULAR_FAQS[1].matches("PENDING"));
        assert!(POPULAR_FAQS[3].matches("unlimited"));
        assert!(!POPULAR_FAQS[0].matches("crypto"));
    }

    #[test]
    fn test_blank_query_matches_every_faq() {
        assert!(POPULAR_FAQS.iter().all(|f| f.matches("   ")));
    }
}
