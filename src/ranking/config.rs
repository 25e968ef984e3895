/// Process-wide ranking tunables.
///
/// Built once at startup (see [`crate::config::Config::ranking_config`]) and
/// passed by reference into every ranking call. Nothing mutates it at
/// request time, so concurrent queries can share one instance freely.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingConfig {
    /// Minimum raw similarity for the primary FAQ path. Inclusive.
    pub faq_min_similarity: f32,

    /// Maximum FAQ passages returned per query.
    pub max_faq_return: usize,

    /// Maximum reviews returned per query.
    pub max_review_return: usize,

    /// Additive boost applied to faq-bucket similarity when ranking.
    pub faq_boost: f32,

    /// Additive boost applied to review-bucket lexical totals when ranking.
    pub review_boost: f32,

    /// Weight of the position bonus in the review pipeline. Must stay below
    /// 1.0 so the bonus only breaks ties between equal lexical scores and
    /// never outranks a genuinely higher lexical score.
    pub position_bonus_weight: f32,

    /// Intent keywords that arm the FAQ rescue fallback.
    pub rescue_keywords: Vec<String>,

    /// URL substrings that mark a row as review content when no bucket tag
    /// is present.
    pub review_url_markers: Vec<String>,
}

/// Default similarity floor for the primary FAQ path.
pub const DEFAULT_FAQ_MIN_SIMILARITY: f32 = 0.62;

/// Default cap on returned FAQ passages.
pub const DEFAULT_MAX_FAQ_RETURN: usize = 3;

/// Default cap on returned reviews.
pub const DEFAULT_MAX_REVIEW_RETURN: usize = 3;

/// Default position bonus weight for the review pipeline.
pub const DEFAULT_POSITION_BONUS_WEIGHT: f32 = 0.5;

/// Default rescue keyword list (order/fulfilment intent).
pub const DEFAULT_RESCUE_KEYWORDS: &[&str] = &[
    "order", "orders", "track", "tracking", "deliver", "delivery", "shipping", "shipped", "status",
    "dispatch",
];

/// Default URL markers identifying review sources.
pub const DEFAULT_REVIEW_URL_MARKERS: &[&str] = &["google.com/maps", "g.co/kgs", "/reviews"];

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            faq_min_similarity: DEFAULT_FAQ_MIN_SIMILARITY,
            max_faq_return: DEFAULT_MAX_FAQ_RETURN,
            max_review_return: DEFAULT_MAX_REVIEW_RETURN,
            faq_boost: 0.0,
            review_boost: 0.0,
            position_bonus_weight: DEFAULT_POSITION_BONUS_WEIGHT,
            rescue_keywords: DEFAULT_RESCUE_KEYWORDS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            review_url_markers: DEFAULT_REVIEW_URL_MARKERS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}
