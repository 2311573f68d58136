#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyTask {
    pub title: &'static str,
    pub points: u32,
    pub completed: bool,
}

pub const DAILY_TASKS: &[DailyTask] = &[
    DailyTask { title: "Login to app", points: 5, completed: true },
    DailyTask { title: "Make a transfer", points: 20, completed: true },
    DailyTask { title: "Pay a bill", points: 15, completed: false },
    DailyTask { title: "Refer a friend", points: 100, completed: false },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reward {
    pub id: u32,
    pub title: &'static str,
    pub points: u32,
    pub kind: &'static str,
}

pub const AVAILABLE_REWARDS: &[Reward] = &[
    Reward { id: 1, title: "₦500 Airtime", points: 500, kind: "Airtime" },
    Reward { id: 2, title: "₦1,000 Data Bundle", points: 900, kind: "Data" },
    Reward { id: 3, title: "Free Transfer", points: 150, kind: "Transfer" },
    Reward { id: 4, title: "₦2,000 Cashback", points: 1800, kind: "Cash" },
    Reward { id: 5, title: "Premium Badge", points: 5000, kind: "Badge" },
    Reward { id: 6, title: "₦5,000 Shopping Voucher", points: 4500, kind: "Voucher" },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub name: &'static str,
    pub points: u32,
    pub initials: &'static str,
    pub is_user: bool,
}

pub const LEADERBOARD: &[LeaderboardEntry] = &[
    LeaderboardEntry { rank: 1, name: "Adebayo O.", points: 15420, initials: "AO", is_user: false },
    LeaderboardEntry { rank: 2, name: "Chioma N.", points: 14850, initials: "CN", is_user: false },
    LeaderboardEntry { rank: 3, name: "Ibrahim M.", points: 13200, initials: "IM", is_user: false },
    LeaderboardEntry { rank: 4, name: "You", points: 2850, initials: "JD", is_user: true },
    LeaderboardEntry { rank: 5, name: "Fatima A.", points: 2100, initials: "FA", is_user: false },
];

pub const USER_POINTS: u32 = 2850;
pub const STREAK_DAYS: u32 = 7;
pub const LEVEL_PROGRESS_PERCENT: u16 = 40;

impl Reward {
    pub fn affordable(&self, balance: u32) -> bool {
        self.points <= balance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affordable_rewards_for_starting_points() {
        let affordable: Vec<u32> = AVAILABLE_REWARDS
            .iter()
            .filter(|r| r.affordable(USER_POINTS))
            .map(|r| r.id)
            .collect();
        assert_eq!(affordable, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_leaderboard_marks_exactly_one_user_row() {
        assert_eq!(LEADERBOARD.iter().filter(|e| e.is_user).count(), 1);
    }
}
