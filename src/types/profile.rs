//! Canonical player profile record

use serde::{Deserialize, Serialize};

/// Upstream payload as returned by a provider: always a JSON object.
pub type RawProfile = serde_json::Map<String, serde_json::Value>;

/// Kills-assists-deaths ratios for survival mode, one per squad size.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KadStats {
    pub team1: Option<f64>,
    pub team2: Option<f64>,
    pub team4: Option<f64>,
}

impl KadStats {
    /// True when no squad size reported a value.
    pub fn is_empty(&self) -> bool {
        self.team1.is_none() && self.team2.is_none() && self.team4.is_none()
    }
}

/// Normalized player profile, identical in shape whichever provider
/// supplied it.
///
/// Optional fields are `None` when the upstream did not supply them; they
/// serialize as `null` so the response shape never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub uid: String,
    pub nickname: Option<String>,
    pub level: Option<i64>,
    #[serde(rename = "accountId")]
    pub account_id: Option<String>,
    pub region: Option<String>,
    pub likes: Option<i64>,
    pub vip_level: Option<i64>,
    pub bio: Option<String>,
    pub survival_rank: Option<String>,
    pub clash_rank: Option<String>,
    pub survival_kad: KadStats,
    pub clash_kad: Option<f64>,
    pub diamonds_spent: Option<i64>,
    /// The provider payload, kept verbatim.
    pub raw: RawProfile,
}

impl ProfileRecord {
    /// An empty record for `uid` in `region`, carrying `raw` untouched.
    pub fn new(uid: impl Into<String>, region: impl Into<String>, raw: RawProfile) -> Self {
        Self {
            uid: uid.into(),
            nickname: None,
            level: None,
            account_id: None,
            region: Some(region.into()),
            likes: None,
            vip_level: None,
            bio: None,
            survival_rank: None,
            clash_rank: None,
            survival_kad: KadStats::default(),
            clash_kad: None,
            diamonds_spent: None,
            raw,
        }
    }
}
