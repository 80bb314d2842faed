//! Upstream payload normalization.
//!
//! Providers answer with loosely-typed JSON of the shape
//!
//! ```text
//! {
//!   "basicInfo": { "nickname", "level", "accountId", "likes", "vip", "bio" },
//!   "stats": {
//!     "survival": { "rank", "kad": { "team1", "team2", "team4" } },
//!     "clash":    { "rank", "kad" },
//!     "totalDiamondSpent"
//!   }
//! }
//! ```
//!
//! Any object along a path may be missing or of the wrong type; every
//! field below that point is then absent. Normalization never fails.

use serde_json::Value;

use crate::types::{KadStats, ProfileRecord, RawProfile};

/// Build the canonical record for `uid`/`region` from a provider payload.
///
/// `raw` is moved into the record unchanged.
pub fn normalize(uid: &str, region: &str, raw: RawProfile) -> ProfileRecord {
    let basic = object(Some(&raw), "basicInfo");
    let stats = object(Some(&raw), "stats");
    let survival = object(stats, "survival");
    let clash = object(stats, "clash");
    let survival_kad = object(survival, "kad");

    let mut record = ProfileRecord {
        nickname: text(field(basic, "nickname")),
        level: integer(field(basic, "level")),
        account_id: text(field(basic, "accountId")),
        likes: integer(field(basic, "likes")),
        vip_level: integer(field(basic, "vip")),
        bio: text(field(basic, "bio")),
        survival_rank: text(field(survival, "rank")),
        clash_rank: text(field(clash, "rank")),
        survival_kad: KadStats {
            team1: float(field(survival_kad, "team1")),
            team2: float(field(survival_kad, "team2")),
            team4: float(field(survival_kad, "team4")),
        },
        clash_kad: float(field(clash, "kad")),
        diamonds_spent: integer(field(stats, "totalDiamondSpent")),
        ..ProfileRecord::new(uid, region, RawProfile::new())
    };
    record.raw = raw;
    record
}

/// Nested object lookup; `None` if the parent is absent or the child is not
/// an object.
fn object<'a>(parent: Option<&'a RawProfile>, key: &str) -> Option<&'a RawProfile> {
    parent?.get(key)?.as_object()
}

fn field<'a>(parent: Option<&'a RawProfile>, key: &str) -> Option<&'a Value> {
    parent?.get(key)
}

/// Strings pass through; numbers are rendered as decimal text.
fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Integers, integral floats, and numeric strings.
fn integer(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn float(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}
