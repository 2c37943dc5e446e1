//! Raw-caption to canonical-field resolution.
//!
//! Resolution runs in three stages: exact canonical name, alias table
//! (the captions observed in real source exports, Chinese and English),
//! then a Jaro-Winkler fuzzy fallback against the canonical names for
//! captions that are merely misspelled or reformatted.

use tracing::warn;

use crate::model::Field;

/// Known source captions and the canonical field each maps to.
const ALIASES: &[(&str, Field)] = &[
    ("商品", Field::ProductName),
    ("商品名称", Field::ProductName),
    ("product", Field::ProductName),
    ("商品链接", Field::ProductUrl),
    ("商品URL", Field::ProductUrl),
    ("url", Field::ProductUrl),
    ("商品分类", Field::CategoryL1),
    ("一级类目", Field::CategoryL1),
    ("category", Field::CategoryL1),
    ("佣金比例", Field::Commission),
    ("佣金率", Field::Commission),
    ("commission_rate", Field::Commission),
    ("近7天销量", Field::Sales7d),
    ("7天销量", Field::Sales7d),
    ("近7天销售额", Field::Gmv7d),
    ("7天GMV", Field::Gmv7d),
    ("近30天销量", Field::Sales30d),
    ("30天销量", Field::Sales30d),
    ("近30天销售额", Field::Gmv30d),
    ("30天GMV", Field::Gmv30d),
    ("近30天直播GMV", Field::LiveGmv30d),
    ("30天直播GMV", Field::LiveGmv30d),
    ("近7天直播GMV", Field::LiveGmv7d),
    ("7天直播GMV", Field::LiveGmv7d),
    ("近30天商品卡GMV", Field::CardGmv30d),
    ("30天商品卡GMV", Field::CardGmv30d),
    ("近1年销量", Field::Sales1y),
    ("1年销量", Field::Sales1y),
    ("近30天转化率", Field::Conv30d),
    ("30天转化率", Field::Conv30d),
    ("转化率", Field::Conv30d),
    ("conversion_rate", Field::Conv30d),
    ("排名类型", Field::RankType),
    ("榜单类型", Field::RankType),
    ("排名", Field::RankNo),
    ("排名位置", Field::RankNo),
    ("近7天达人数", Field::Influencer7d),
    ("7天达人数", Field::Influencer7d),
    ("快照标签", Field::SnapshotTag),
    ("标签", Field::SnapshotTag),
];

/// Minimum Jaro-Winkler similarity for the fuzzy fallback.
const FUZZY_THRESHOLD: f64 = 0.88;

/// Strip caption formatting so `Sales 7d` / `sales-7d` / `SALES_7D`
/// compare equal to `sales_7d`.
fn canonical_key(caption: &str) -> String {
    caption
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Resolve a raw column caption to a canonical field, if any.
#[must_use]
pub fn resolve_caption(caption: &str) -> Option<Field> {
    let trimmed = caption.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(field) = Field::from_name(trimmed) {
        return Some(field);
    }

    if let Some((_, field)) = ALIASES.iter().find(|(alias, _)| *alias == trimmed) {
        return Some(*field);
    }

    let key = canonical_key(trimmed);
    if let Some(field) = Field::ALL
        .into_iter()
        .find(|f| canonical_key(f.name()) == key)
    {
        return Some(field);
    }

    // Fuzzy fallback only makes sense for ASCII-ish captions; alias-table
    // misses on Chinese captions stay unresolved rather than guessing.
    if !trimmed.is_ascii() {
        return None;
    }
    let (best, score) = Field::ALL
        .into_iter()
        .map(|f| (f, strsim::jaro_winkler(&key, &canonical_key(f.name()))))
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))?;
    if score >= FUZZY_THRESHOLD {
        warn!(caption = trimmed, field = %best, score, "fuzzy header match");
        Some(best)
    } else {
        None
    }
}
