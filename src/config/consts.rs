// src/config/consts.rs

// Net config
pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";
pub const ACCEPT_LANGUAGE: &str = "ja,en-US;q=0.9,en;q=0.8";
pub const REQUEST_TIMEOUT_SECS: u64 = 15;

// Endpoints
pub const YOUTUBE_API_BASE: &str = "https://www.googleapis.com/youtube/v3";
pub const TIKTOK_PROFILE_URL: &str = "https://www.tiktok.com/@";
pub const INSTAGRAM_PROFILE_URL: &str = "https://www.instagram.com/";
pub const X_PROFILE_URL: &str = "https://x.com/";
pub const DEFAULT_SCHEDULE_URL: &str = "https://www.uverworld.jp/schedule/list/";

// Store
pub const REST_PREFIX: &str = "/rest/v1";
pub const TABLE_SNS_STATS: &str = "sns_stats";
pub const TABLE_VIDEO_STATS: &str = "youtube_stats";
pub const TABLE_CALENDAR: &str = "calendar_events";
pub const TABLE_SURVEY: &str = "survey_responses";
pub const INSERT_CHUNK: usize = 100;

// Pacing
pub const SOCIAL_PAUSE_SECS: u64 = 7; // be polite
pub const RATE_LIMIT_PAUSE_SECS: u64 = 60;

// Survey import
pub const EVENT_PICK_LIMIT: usize = 15;
pub const SURVEY_TIME_OF_DAY: &str = "T09:00:00Z";
pub const UNANSWERED: &str = "未回答";

// Dashboard
pub const CACHE_TTL_SECS: u64 = 600;
pub const RANKING_TOP_N: usize = 10;
pub const DASHBOARD_ROW_LIMIT: usize = 4000;
