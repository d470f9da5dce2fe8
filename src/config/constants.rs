pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Conservative input token budget. Gemini 2.0 Flash accepts 1M input
/// tokens; capping at 900K reserves room for the model's output.
pub const DEFAULT_MAX_INPUT_TOKENS: u64 = 900_000;

pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";
pub const GITHUB_REPOSITORY_ENV: &str = "GITHUB_REPOSITORY";
pub const DATADOG_API_KEY_ENV: &str = "DATADOG_API_KEY";
pub const DATADOG_APP_KEY_ENV: &str = "DATADOG_APP_KEY";

pub const GITHUB_API_BASE: &str = "https://api.github.com";
pub const DATADOG_API_BASE: &str = "https://api.datadoghq.com";
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

pub const USER_AGENT: &str = concat!("gemini-actions/", env!("CARGO_PKG_VERSION"));

// dependency-impact sampling caps
pub const MAX_SCANNED_SOURCE_FILES: usize = 100;
pub const MAX_USAGE_LINES_PER_FILE: usize = 20;
pub const MAX_USAGE_CHARS_PER_DEP: usize = 5_000;
pub const MAX_DIFF_CHARS: usize = 10_000;

// datadog-respond caps
pub const MAX_DATADOG_PAYLOAD_CHARS: usize = 10_000;
pub const RECENT_COMMITS_LIMIT: usize = 10;

// repo-qa caps
pub const DEFAULT_SOURCE_PATHS: &str = "src/**";
pub const MAX_SELECTED_FILES: usize = 20;
pub const FALLBACK_SELECTED_FILES: usize = 15;
pub const MAX_QA_FILE_CHARS: usize = 5_000;

// pr-from-issue caps
pub const FALLBACK_PLAN_FILES: usize = 10;

/// Extensions treated as source code when sampling dependency usage.
pub const SOURCE_FILE_EXTENSIONS: &[&str] = &[
    "ts", "js", "tsx", "jsx", "py", "go", "java", "rb", "rs",
];
