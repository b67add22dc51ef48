// Response shapes returned by the Gradient API. Every field that the
// dashboard may omit is defaulted so a partial payload still renders.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Standard `{ code, data }` wrapper around API payloads.
#[derive(Serialize, Deserialize, Debug)]
pub struct Envelope<T> {
    pub code: i64,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub code: String,
    pub referred_by: Option<String>,
    pub stats: ProfileStats,
    pub point: Points,
    /// Season number to points; `<n>_refer` keys hold referral points.
    pub season: BTreeMap<String, f64>,
    pub node: NodeTotals,
    pub social: Option<Social>,
    pub check_in: bool,
    pub follow: i64,
    pub create_at: i64,
    pub update_at: i64,
    pub season_no: i64,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct ProfileStats {
    pub level: i64,
    pub exp: f64,
    pub invitee: i64,
    pub pending: i64,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct Points {
    pub total: f64,
    pub balance: f64,
    pub withdraw: f64,
    pub referral: f64,
    pub today: f64,
}

/// Node counters on the profile. Durations are in seconds.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeTotals {
    pub sentry: i64,
    pub sentry_active: i64,
    pub sentry_duration: u64,
    pub work: i64,
    pub work_active: i64,
    pub total_duration: u64,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct Social {
    pub twitter: Option<String>,
    pub discord: Option<String>,
}

/// One row of the sentry node listing.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase", default)]
pub struct SentryNode {
    pub node_id: Option<String>,
    pub status: Option<String>,
    /// Seconds.
    pub uptime: u64,
    pub points: f64,
    /// Epoch milliseconds.
    pub last_seen: Option<i64>,
}

impl SentryNode {
    pub fn is_online(&self) -> bool {
        self.status.as_deref() == Some("online")
    }
}

/// Full node record. Durations are in milliseconds here, unlike the
/// profile totals.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeDetail {
    pub id: String,
    pub account: String,
    pub name: String,
    pub active: bool,
    pub connect: bool,
    pub banned: bool,
    pub hide: i64,
    pub create_at: i64,
    pub duration: i64,
    pub latency: f64,
    pub point: f64,
    pub season: BTreeMap<String, f64>,
    pub score: f64,
    pub today: f64,
    pub today_duration: i64,
    pub today_latency: f64,
    /// 0 while the node is active right now.
    pub last_active: i64,
    pub ip: String,
    pub location: Option<Location>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct Location {
    pub country: String,
    pub region: String,
    pub place: String,
    pub postcode: String,
    pub lat: f64,
    pub lng: f64,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct LatencyRecord {
    pub latency: Option<f64>,
    pub timestamp: i64,
    pub status: Option<String>,
    pub location: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct Banner {
    pub title: Option<String>,
    pub content: Option<String>,
    pub detail: Option<String>,
    pub link: Option<String>,
    pub image: Option<BannerImage>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct BannerImage {
    pub dashboard: Option<String>,
    pub extension: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase", default)]
pub struct Announcement {
    pub id: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub min_version: Option<String>,
    pub new_version: Option<String>,
    pub image: Option<BTreeMap<String, String>>,
}

impl Announcement {
    /// The `version` announcement carries the minimum supported extension
    /// version rather than news.
    pub fn is_version_notice(&self) -> bool {
        self.id.as_deref() == Some("version")
    }
}

/// Payload of `GET /status`. Not wrapped in an envelope.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct SystemStatus {
    pub time: Option<i64>,
    pub ip: Option<String>,
    pub env: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_parses_partial_payload() {
        let raw = r#"{
            "code": 200,
            "data": {
                "name": "ana",
                "email": "ana@example.com",
                "stats": { "level": 3, "exp": 1200, "invitee": 2, "pending": 1 },
                "point": { "total": 1500.5, "today": 12 },
                "season": { "1": 100, "1_refer": 20 },
                "node": { "sentry": 2, "sentryActive": 1, "sentryDuration": 3600 },
                "checkIn": true,
                "createAt": 1700000000000
            }
        }"#;
        let env: Envelope<Profile> = serde_json::from_str(raw).unwrap();
        assert_eq!(env.code, 200);
        let profile = env.data.unwrap();
        assert_eq!(profile.stats.level, 3);
        assert_eq!(profile.point.total, 1500.5);
        assert_eq!(profile.node.sentry_duration, 3600);
        assert_eq!(profile.season.get("1_refer"), Some(&20.0));
        assert!(profile.check_in);
        assert!(profile.social.is_none());
    }

    #[test]
    fn envelope_without_data() {
        let env: Envelope<Vec<SentryNode>> =
            serde_json::from_str(r#"{"code": 401, "message": "expired"}"#).unwrap();
        assert!(env.data.is_none());
        assert_eq!(env.message.as_deref(), Some("expired"));
    }

    #[test]
    fn sentry_node_status() {
        let nodes: Vec<SentryNode> = serde_json::from_str(
            r#"[{"nodeId": "AAAAAAAAAA", "status": "online", "uptime": 60},
                {"nodeId": "BBBBBBBBBB", "status": "offline"}]"#,
        )
        .unwrap();
        assert!(nodes[0].is_online());
        assert!(!nodes[1].is_online());
        assert_eq!(nodes[1].uptime, 0);
    }

    #[test]
    fn version_announcement() {
        let a: Announcement = serde_json::from_str(
            r#"{"id": "version", "minVersion": "1.0.2", "newVersion": "1.1.0"}"#,
        )
        .unwrap();
        assert!(a.is_version_notice());
        assert_eq!(a.new_version.as_deref(), Some("1.1.0"));
    }
}
