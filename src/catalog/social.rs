#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SocialLink {
    pub id: &'static str,
    pub name: &'static str,
    pub handle: &'static str,
    pub followers: &'static str,
    pub url: &'static str,
}

pub const SOCIAL_LINKS: &[SocialLink] = &[
    SocialLink {
        id: "twitter",
        name: "Twitter / X",
        handle: "@MoladaPay",
        followers: "125K",
        url: "https://twitter.com/MoladaPay",
    },
    SocialLink {
        id: "instagram",
        name: "Instagram",
        handle: "@moladapay",
        followers: "89K",
        url: "https://instagram.com/moladapay",
    },
    SocialLink {
        id: "facebook",
        name: "Facebook",
        handle: "MOLADA Pay",
        followers: "67K",
        url: "https://facebook.com/moladapay",
    },
    SocialLink {
        id: "linkedin",
        name: "LinkedIn",
        handle: "MOLADA Pay",
        followers: "15K",
        url: "https://linkedin.com/company/moladapay",
    },
    SocialLink {
        id: "telegram",
        name: "Telegram",
        handle: "@MoladaPayOfficial",
        followers: "45K",
        url: "https://t.me/moladapay",
    },
    SocialLink {
        id: "discord",
        name: "Discord",
        handle: "MOLADA Community",
        followers: "32K",
        url: "https://discord.gg/moladapay",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommunityStat {
    pub label: &'static str,
    pub value: &'static str,
}

pub const COMMUNITY_STATS: &[CommunityStat] = &[
    CommunityStat { label: "Total Followers", value: "373K" },
    CommunityStat { label: "Monthly Posts", value: "120+" },
    CommunityStat { label: "Giveaways", value: "Weekly" },
];

pub const REFERRAL_CODE: &str = "MOLADA-JD2024";
pub const REFERRAL_PITCH: &str = "Earn ₦500 for every friend who joins!";

pub fn referral_link(code: &str) -> String {
    format!("https://molada.pay/ref/{code}")
}
