// src/config/consts.rs

// Sources: published CSV exports of the roster spreadsheet.
// Local paths and file:// URLs are accepted too (see data/ for samples).
pub const DEFAULT_MEMBERS_SOURCE: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vRT80rJKxr62o2RBs5PpaCvpWbyH2B14dk1Gv610WH3QPoeQi2akdeu4Kgo97Mtq-QOmB8d3ORap8-n/pub?gid=0&single=true&output=csv";
pub const DEFAULT_FAMILY_SOURCE: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vRT80rJKxr62o2RBs5PpaCvpWbyH2B14dk1Gv610WH3QPoeQi2akdeu4Kgo97Mtq-QOmB8d3ORap8-n/pub?gid=1889067091&single=true&output=csv";

// Net config
pub const USER_AGENT: &str = "stvp_card/0.1";
pub const HTTP_TIMEOUT_SECS: u64 = 15;
pub const MAX_REDIRECTS: usize = 5;

// Cache
pub const DEFAULT_TTL_SECS: u64 = 300;

// Admin panel (shared key, not a security boundary)
pub const DEFAULT_ADMIN_PASSWORD: &str = "stvp2025";

// Local state
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";
pub const DEFAULT_SETTINGS_FILE: &str = "stvp.conf";

// Export
pub const DEFAULT_EXPORT_DIR: &str = "out";

// Card display fallbacks
pub const DEFAULT_BADGE: &str = "ACTIVO";
pub const DEFAULT_EXPIRY: &str = "AL DÍA";
