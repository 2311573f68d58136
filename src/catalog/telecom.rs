/// A mobile network operator that sells airtime, data and recharge pins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Network {
    pub id: &'static str,
    pub name: &'static str,
    pub denominations: &'static [u64],
}

impl Network {
    /// Single-letter badge standing in for the network logo
    pub fn badge(&self) -> char {
        self.name.chars().next().unwrap_or('?')
    }
}

const STANDARD_DENOMINATIONS: &[u64] = &[100, 200, 500, 1000, 2000, 5000];

pub const NETWORKS: &[Network] = &[
    Network {
        id: "mtn",
        name: "MTN",
        denominations: STANDARD_DENOMINATIONS,
    },
    Network {
        id: "airtel",
        name: "Airtel",
        denominations: STANDARD_DENOMINATIONS,
    },
    Network {
        id: "glo",
        name: "Glo",
        denominations: STANDARD_DENOMINATIONS,
    },
    Network {
        id: "9mobile",
        name: "9Mobile",
        denominations: STANDARD_DENOMINATIONS,
    },
];

/// Quick-pick amounts on the airtime form
pub const AIRTIME_PRESETS: &[u64] = &[100, 200, 500, 1000, 2000];

pub const BUNDLE_PERIODS: &[&str] = &["Daily", "Weekly", "Monthly", "Yearly"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataBundle {
    pub period: &'static str,
    pub size: &'static str,
    pub validity: &'static str,
    pub price: u64,
}

pub const DATA_BUNDLES: &[DataBundle] = &[
    DataBundle { period: "Daily", size: "100 MB", validity: "1 Day", price: 100 },
    DataBundle { period: "Daily", size: "1 GB", validity: "1 Day", price: 350 },
    DataBundle { period: "Weekly", size: "1.5 GB", validity: "7 Days", price: 500 },
    DataBundle { period: "Weekly", size: "6 GB", validity: "7 Days", price: 1500 },
    DataBundle { period: "Monthly", size: "1.5 GB", validity: "30 Days", price: 1200 },
    DataBundle { period: "Monthly", size: "10 GB", validity: "30 Days", price: 3500 },
    DataBundle { period: "Monthly", size: "30 GB", validity: "30 Days", price: 7000 },
    DataBundle { period: "Yearly", size: "120 GB", validity: "365 Days", price: 50000 },
];

/// Bundles on offer for one period tab, in catalog order
pub fn bundles_for_period(period: &str) -> impl Iterator<Item = &'static DataBundle> + '_ {
    DATA_BUNDLES.iter().filter(move |b| b.period == period)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_network_sells_six_denominations() {
        assert_eq!(NETWORKS.len(), 4);
        for network in NETWORKS {
            assert_eq!(network.denominations.len(), 6);
        }
    }

    #[test]
    fn test_badge_is_first_letter() {
        assert_eq!(NETWORKS[3].badge(), '9');
        assert_eq!(NETWORKS[1].badge(), 'A');
    }

    #[test]
    fn test_bundles_for_period() {
        let monthly: Vec<_> = bundles_for_period("Monthly").collect();
        assert_eq!(monthly.len(), 3);
        assert!(bundles_for_period("Hourly").next().is_none());
    }
}
