use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::serde_helpers::optional_timestamp;

// ============================================================================
// Enumerations
// ============================================================================

/// How a launch is paced across channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LaunchType {
    BigBang,
    SoftLaunch,
    TeaserLaunchFollowup,
    ContinuousPromotion,
    RollingLaunch,
}

impl LaunchType {
    pub const ALL: [LaunchType; 5] = [
        LaunchType::BigBang,
        LaunchType::SoftLaunch,
        LaunchType::TeaserLaunchFollowup,
        LaunchType::ContinuousPromotion,
        LaunchType::RollingLaunch,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LaunchType::BigBang => "big-bang",
            LaunchType::SoftLaunch => "soft-launch",
            LaunchType::TeaserLaunchFollowup => "teaser-launch-followup",
            LaunchType::ContinuousPromotion => "continuous-promotion",
            LaunchType::RollingLaunch => "rolling-launch",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LaunchType::BigBang => "Big Bang (one-day, all-channels push)",
            LaunchType::SoftLaunch => "Soft Launch (gradual rollout, test feedback)",
            LaunchType::TeaserLaunchFollowup => "Teaser → Launch → Follow-up (3-stage)",
            LaunchType::ContinuousPromotion => {
                "Continuous Promotion (weekly drip posts for a month)"
            }
            LaunchType::RollingLaunch => "Rolling Launch (one channel after another)",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

impl std::fmt::Display for LaunchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Channels a campaign can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    ProductHunt,
    X,
    Reddit,
    LinkedIn,
    Betalist,
    IndieHackers,
    Email,
    Other,
}

impl Channel {
    pub const ALL: [Channel; 8] = [
        Channel::ProductHunt,
        Channel::X,
        Channel::Reddit,
        Channel::LinkedIn,
        Channel::Betalist,
        Channel::IndieHackers,
        Channel::Email,
        Channel::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Channel::ProductHunt => "producthunt",
            Channel::X => "x",
            Channel::Reddit => "reddit",
            Channel::LinkedIn => "linkedin",
            Channel::Betalist => "betalist",
            Channel::IndieHackers => "indiehackers",
            Channel::Email => "email",
            Channel::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Channel::ProductHunt => "Product Hunt",
            Channel::X => "X (Twitter)",
            Channel::Reddit => "Reddit",
            Channel::LinkedIn => "LinkedIn",
            Channel::Betalist => "Betalist",
            Channel::IndieHackers => "Indie Hackers",
            Channel::Email => "Email (existing list)",
            Channel::Other => "Other (manual entry)",
        }
    }

    /// Display label for a channel id as stored on a campaign.
    pub fn label_for(id: &str) -> &str {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == id)
            .map(Channel::label)
            .unwrap_or(id)
    }
}

/// Voice of the generated posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Professional,
    Casual,
    Witty,
    Hype,
}

impl Tone {
    pub const ALL: [Tone; 4] = [Tone::Professional, Tone::Casual, Tone::Witty, Tone::Hype];

    pub fn label(self) -> &'static str {
        match self {
            Tone::Professional => "Professional",
            Tone::Casual => "Casual",
            Tone::Witty => "Witty",
            Tone::Hype => "Hype",
        }
    }

    pub fn example(self) -> &'static str {
        match self {
            Tone::Professional => {
                "We're excited to announce the launch of our new product. Available starting today on our website."
            }
            Tone::Casual => "Guess what? Our new product is live! Check it out now.",
            Tone::Witty => {
                "Fresh out of the lab and ready to impress. Meet your new favorite gadget."
            }
            Tone::Hype => {
                "🚀 It's here! The product everyone's been waiting for just dropped. Don't miss out!"
            }
        }
    }
}

// ============================================================================
// Records
// ============================================================================

/// A generated campaign.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub channels: Vec<String>,
    /// Kept as text so records with unknown launch types still load.
    #[serde(default)]
    pub launch_type: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub launch_scripts: Vec<ChannelScripts>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// The posts generated for one channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelScripts {
    #[serde(default)]
    pub channel: String,
    #[serde(default)]
    pub scripts: Vec<LaunchScript>,
}

/// A single generated post.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchScript {
    #[serde(rename = "_id")]
    pub id: String,
    pub copy: PostCopy,
    #[serde(default, deserialize_with = "optional_timestamp")]
    pub publish_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub version: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostCopy {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

impl Campaign {
    pub fn launch_type_kind(&self) -> Option<LaunchType> {
        self.launch_type.as_deref().and_then(LaunchType::parse)
    }

    /// Find a post by id across every channel group, with its channel.
    pub fn find_script(&self, script_id: &str) -> Option<(&ChannelScripts, &LaunchScript)> {
        self.launch_scripts.iter().find_map(|group| {
            group
                .scripts
                .iter()
                .find(|s| s.id == script_id)
                .map(|s| (group, s))
        })
    }

    pub fn post_count(&self) -> usize {
        self.launch_scripts.iter().map(|g| g.scripts.len()).sum()
    }
}

/// Body of `PUT /api/campaigns/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignUpdate {
    pub name: String,
    pub description: String,
}

/// Body of `POST /api/campaigns/{productId}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCampaignRequest {
    pub selected_channels: Vec<Channel>,
    pub launch_type: LaunchType,
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<Tone>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_campaign() -> Campaign {
        serde_json::from_value(serde_json::json!({
            "_id": "c1",
            "name": "LaunchBot Big Bang",
            "description": "One day push",
            "status": "draft",
            "channels": ["reddit", "x"],
            "launchType": "big-bang",
            "keywords": ["saas", "ai"],
            "productId": "p1",
            "launchScripts": [
                {"channel": "reddit", "scripts": [
                    {"_id": "s1", "copy": {"title": "T1", "body": "B1"}, "publishDate": 1735689600000i64, "version": 1}
                ]},
                {"channel": "x", "scripts": [
                    {"_id": "s2", "copy": {"title": "T2", "body": "B2"}, "publishDate": "2025-01-02T09:00:00Z", "version": 2},
                    {"_id": "s3", "copy": {"title": "T3", "body": "B3"}}
                ]}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_campaign_decodes() {
        let c = sample_campaign();
        assert_eq!(c.launch_type_kind(), Some(LaunchType::BigBang));
        assert_eq!(c.launch_scripts.len(), 2);
        assert_eq!(c.post_count(), 3);
        assert!(c.launch_scripts[1].scripts[1].publish_date.is_none());
    }

    #[test]
    fn test_find_script_across_groups() {
        let c = sample_campaign();
        let (group, script) = c.find_script("s2").unwrap();
        assert_eq!(group.channel, "x");
        assert_eq!(script.copy.title, "T2");
        assert_eq!(script.version, 2);
        assert!(c.find_script("missing").is_none());
    }

    #[test]
    fn test_unknown_launch_type_still_loads() {
        let c: Campaign =
            serde_json::from_str(r#"{"_id":"c9","launchType":"guerrilla"}"#).unwrap();
        assert_eq!(c.launch_type.as_deref(), Some("guerrilla"));
        assert!(c.launch_type_kind().is_none());
    }

    #[test]
    fn test_launch_type_wire_names() {
        for t in LaunchType::ALL {
            let json = serde_json::to_value(t).unwrap();
            assert_eq!(json, t.as_str());
            assert_eq!(LaunchType::parse(t.as_str()), Some(t));
        }
    }

    #[test]
    fn test_channel_wire_names_match_ids() {
        for c in Channel::ALL {
            assert_eq!(serde_json::to_value(c).unwrap(), c.as_str());
        }
        assert_eq!(Channel::label_for("indiehackers"), "Indie Hackers");
        assert_eq!(Channel::label_for("mastodon"), "mastodon");
    }

    #[test]
    fn test_generate_request_body() {
        let req = GenerateCampaignRequest {
            selected_channels: vec![Channel::Reddit, Channel::ProductHunt],
            launch_type: LaunchType::SoftLaunch,
            keywords: vec!["saas".to_string()],
            tone: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["selectedChannels"], serde_json::json!(["reddit", "producthunt"]));
        assert_eq!(json["launchType"], "soft-launch");
        assert_eq!(json["keywords"], serde_json::json!(["saas"]));
        assert!(json.get("tone").is_none());
    }
}
