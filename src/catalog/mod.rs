//! Hardcoded sample data for every screen.
//!
//! Each catalog is a `'static` slice that never changes at runtime. Lookups
//! are total: an unknown key yields `None` and the caller renders nothing.

pub mod bills;
pub mod bots;
pub mod dashboard;
pub mod messaging;
pub mod onboarding;
pub mod payments;
pub mod rewards;
pub mod social;
pub mod support;
pub mod telecom;
pub mod travel;

pub use bills::{BillCategory, CablePackage, Disco};
pub use bots::{ActivityKind, BotActivity, BotOffer, BotStats, BotSummary};
pub use dashboard::{QuickAction, RecentTransaction, TransactionDirection};
pub use messaging::SmsPackage;
pub use onboarding::{ContactChannel, Slide};
pub use payments::PaymentMethod;
pub use rewards::{DailyTask, LeaderboardEntry, Reward};
pub use social::{CommunityStat, SocialLink};
pub use support::{Faq, FaqCategory, SupportTicket, TicketStatus};
pub use telecom::{DataBundle, Network};

/// Find a mobile network by its id (`"mtn"`, `"airtel"`, ...)
pub fn find_network(id: &str) -> Option<&'static Network> {
    telecom::NETWORKS.iter().find(|n| n.id == id)
}

/// Find an SMS unit package by the number of units it sells
pub fn find_sms_package(units: u32) -> Option<&'static SmsPackage> {
    messaging::SMS_PACKAGES.iter().find(|p| p.units == units)
}

/// Popular FAQ by position in the list
pub fn faq(index: usize) -> Option<&'static Faq> {
    support::POPULAR_FAQS.get(index)
}

/// Bill category from the `type` query parameter of `/bills`
pub fn find_bill_category(key: &str) -> Option<BillCategory> {
    BillCategory::from_key(key)
}

pub fn find_faq_category(id: &str) -> Option<&'static FaqCategory> {
    support::FAQ_CATEGORIES.iter().find(|c| c.id == id)
}

pub fn find_reward(id: u32) -> Option<&'static Reward> {
    rewards::AVAILABLE_REWARDS.iter().find(|r| r.id == id)
}

pub fn find_social_link(id: &str) -> Option<&'static SocialLink> {
    social::SOCIAL_LINKS.iter().find(|s| s.id == id)
}

pub fn find_payment_method(methods: &'static [PaymentMethod], id: &str) -> Option<&'static PaymentMethod> {
    methods.iter().find(|m| m.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_network_known_and_unknown() {
        let mtn = find_network("mtn").expect("mtn is in the catalog");
        assert_eq!(mtn.name, "MTN");
        assert_eq!(mtn.denominations, &[100, 200, 500, 1000, 2000, 5000]);
        assert!(find_network("vodafone").is_none());
    }

    #[test]
    fn test_find_sms_package() {
        let pkg = find_sms_package(1000).unwrap();
        assert_eq!(pkg.price, 13000);
        assert_eq!(pkg.bonus, 100);
        assert!(find_sms_package(42).is_none());
    }

    #[test]
    fn test_faq_lookup_out_of_range_is_none() {
        assert!(faq(0).unwrap().question.contains("reset my password"));
        assert!(faq(support::POPULAR_FAQS.len()).is_none());
    }

    #[test]
    fn test_find_reward_and_social_link() {
        assert_eq!(find_reward(3).unwrap().title, "Free Transfer");
        assert!(find_reward(99).is_none());
        assert_eq!(find_social_link("telegram").unwrap().handle, "@MoladaPayOfficial");
        assert!(find_social_link("myspace").is_none());
    }

    #[test]
    fn test_find_payment_method() {
        let loan = find_payment_method(payments::BILL_METHODS, "loan").unwrap();
        assert_eq!(loan.label, "Bill Loan");
        assert!(find_payment_method(payments::TRANSFER_METHODS, "loan").is_none());
    }

    #[test]
    fn test_find_bill_category() {
        assert_eq!(find_bill_category("airtime-cash"), Some(BillCategory::AirtimeToCash));
        assert_eq!(find_bill_category(""), None);
    }

    #[test]
    fn test_find_faq_category() {
        assert_eq!(find_faq_category("bills").unwrap().count, 8);
        assert!(find_faq_category("stocks").is_none());
    }
}
