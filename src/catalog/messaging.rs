pub const SENDER_IDS: &[&str] = &["MOLADA", "MyBusiness", "Custom"];

/// A purchasable block of SMS units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmsPackage {
    pub units: u32,
    pub price: u64,
    pub bonus: u32,
}

impl SmsPackage {
    /// Units credited after purchase, bonus included
    pub fn credited_units(&self) -> u32 {
        self.units + self.bonus
    }

    /// Naira per SMS, formatted with one decimal place
    pub fn price_per_sms(&self) -> String {
        format!("{:.1}", self.price as f64 / self.units as f64)
    }
}

pub const SMS_PACKAGES: &[SmsPackage] = &[
    SmsPackage { units: 100, price: 1500, bonus: 0 },
    SmsPackage { units: 500, price: 7000, bonus: 25 },
    SmsPackage { units: 1000, price: 13000, bonus: 100 },
    SmsPackage { units: 5000, price: 60000, bonus: 750 },
];

/// Units every new session starts with
pub const STARTING_SMS_BALANCE: u32 = 150;
