// Query filtering
/// Tokens must be longer than this many characters to take part in matching.
pub const MAX_NOISE_TOKEN_LEN: usize = 2;

/// Connector words and generic terms (Polish and English) dropped from queries.
pub const STOP_WORDS: &[&str] = &[
    "the", "and", "lub", "oraz", "albo", "dla", "przez", "jak", "czy", "które",
    "która", "ktore", "polecenie", "polecenia", "command", "commands",
];

/// Filter value that disables category scoping. Never stored on a record.
pub const CATEGORY_ALL: &str = "all";

// History
pub const MAX_HISTORY_ITEMS: usize = 10;
pub const RECENT_SEARCHES: usize = 5;

// Export
pub const DEFAULT_SCRIPT_NAME: &str = "exported_commands";
pub const ALIAS_NAME_MAX_LEN: usize = 30;
pub const EXPORT_SOURCE: &str = "LinuxHelper";

// AI suggestions
pub const AI_DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const AI_DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const AI_MAX_TOKENS: u32 = 500;
pub const AI_SUGGEST_TEMPERATURE: f32 = 0.3;
pub const AI_EXPLAIN_TEMPERATURE: f32 = 0.2;
pub const AI_MAX_SUGGESTIONS: usize = 3;

// File paths
pub const CATALOG_PATH: &str = "commands.json";
pub const HISTORY_PATH: &str = "history.json";
pub const BOOKMARKS_PATH: &str = "bookmarks.json";

// Server
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
