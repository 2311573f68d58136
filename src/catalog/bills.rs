/// Sub-form selected by the `type` query parameter of `/bills`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BillCategory {
    #[default]
    Data,
    Airtime,
    Cable,
    Electricity,
    Education,
    Betting,
    Loans,
    Cac,
    AirtimeToCash,
}

impl BillCategory {
    pub const ALL: [BillCategory; 9] = [
        Self::Data,
        Self::Airtime,
        Self::Cable,
        Self::Electricity,
        Self::Education,
        Self::Betting,
        Self::Loans,
        Self::Cac,
        Self::AirtimeToCash,
    ];

    /// Value of the `type` query parameter
    pub fn key(&self) -> &'static str {
        match self {
            Self::Data => "data",
            Self::Airtime => "airtime",
            Self::Cable => "cable",
            Self::Electricity => "electricity",
            Self::Education => "education",
            Self::Betting => "betting",
            Self::Loans => "loans",
            Self::Cac => "cac",
            Self::AirtimeToCash => "airtime-cash",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.key() == key)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Data => "Buy Data",
            Self::Airtime => "Buy Airtime",
            Self::Cable => "Cable TV",
            Self::Electricity => "Electricity",
            Self::Education => "Education",
            Self::Betting => "Betting Wallet",
            Self::Loans => "Bill Loans",
            Self::Cac => "CAC Registration",
            Self::AirtimeToCash => "Airtime to Cash",
        }
    }

    /// Informational categories have no PAY NOW / SET PAY ORDER actions
    pub fn is_payable(&self) -> bool {
        !matches!(self, Self::Education | Self::Cac | Self::AirtimeToCash)
    }
}

pub const CABLE_PROVIDERS: &[&str] = &["DSTV", "GOTV", "Startimes", "Showmax"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CablePackage {
    pub id: &'static str,
    pub name: &'static str,
    pub price: u64,
}

pub const CABLE_PACKAGES: &[CablePackage] = &[
    CablePackage { id: "premium", name: "Premium", price: 37_000 },
    CablePackage { id: "compact", name: "Compact Plus", price: 19_800 },
    CablePackage { id: "yanga", name: "Yanga", price: 5_100 },
];

pub const METER_TYPES: &[&str] = &["Prepaid", "Postpaid"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Disco {
    pub id: &'static str,
    pub name: &'static str,
}

pub const DISCOS: &[Disco] = &[
    Disco { id: "forchard", name: "Forchard Pay (Demo)" },
    Disco { id: "ikeja", name: "Ikeja Electric" },
    Disco { id: "eko", name: "Eko Electric" },
];

pub const BETTING_PLATFORMS: &[&str] = &["SportyBet", "1xBet"];

pub const BETTING_LIMIT_WARNING: &str = "You’ve reached your 20% monthly bet funding limit.";

pub const LOAN_ELIGIBLE_AMOUNT: u64 = 7_000;
pub const LOAN_MIN_AMOUNT: u64 = 500;

pub const LOAN_RESTRICTIONS: &[&str] = &[
    "No airtime-to-cash while bill loan is active",
    "No funding others' airtime",
    "Long-term unpaid loans = Withdrawal Suspension",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_round_trip_through_from_key() {
        for category in BillCategory::ALL {
            assert_eq!(BillCategory::from_key(category.key()), Some(category));
        }
        assert_eq!(BillCategory::from_key("groceries"), None);
    }

    #[test]
    fn test_informational_categories_are_not_payable() {
        assert!(!BillCategory::Education.is_payable());
        assert!(!BillCategory::Cac.is_payable());
        assert!(!BillCategory::AirtimeToCash.is_payable());
        assert!(BillCategory::Loans.is_payable());
        assert!(BillCategory::default().is_payable());
    }
}
