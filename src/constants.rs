//! Global Constants
//!
//! Centralized constants for analysis thresholds and tuning.
//! Every threshold the classifier depends on is defined here exactly once.

/// Document tree analysis constants
pub mod analysis {
    /// A FRAME is complex when its direct child count exceeds this value
    pub const COMPLEX_FRAME_CHILD_THRESHOLD: usize = 10;

    /// Number of complex frames kept in the statistics record
    pub const MAX_REPORTED_COMPLEX_FRAMES: usize = 5;

    /// Default maximum nesting depth before traversal is aborted
    pub const DEFAULT_MAX_DEPTH: usize = 1024;

    /// Highest accepted `analysis.max_depth`; bounds the recursive JSON parse
    pub const MAX_DEPTH_CEILING: usize = 1024;

    /// Grid unit used to decide whether a frame is aligned (pixels)
    pub const GRID_UNIT: f64 = 8.0;

    /// Label used for component instances without a name
    pub const UNNAMED_COMPONENT: &str = "Unnamed Component";

    /// Font size placeholder when a text style carries no size
    pub const AUTO_FONT_SIZE: &str = "auto";
}

/// Color harmony thresholds
pub mod harmony {
    /// Hue range (degrees) below which a palette is monochromatic
    pub const MONOCHROMATIC_HUE_RANGE: f64 = 30.0;

    /// Lightness spread above which a palette is high contrast
    pub const HIGH_CONTRAST_LIGHTNESS_SPREAD: f64 = 0.5;

    /// Mean saturation above which a palette is vibrant
    pub const VIBRANT_SATURATION: f64 = 0.6;
}

/// Archetype scoring constants
pub mod scoring {
    /// Points awarded when an archetype rule is satisfied
    pub const RULE_POINTS: u32 = 5;

    /// Minimalist Monk: maximum palette size
    pub const MINIMALIST_MAX_COLORS: usize = 4;

    /// Minimalist Monk: layer count must stay below this
    pub const MINIMALIST_MAX_LAYERS: usize = 500;

    /// Color Mystic: minimum palette size
    pub const COLOR_MYSTIC_MIN_COLORS: usize = 6;

    /// Grid Guardian: maximum nesting depth
    pub const GRID_GUARDIAN_MAX_DEPTH: usize = 5;

    /// Type Whisperer: minimum number of typography styles
    pub const TYPE_WHISPERER_MIN_STYLES: usize = 5;

    /// Pixel Prophet: distinct complex layouts must exceed this
    pub const PIXEL_PROPHET_MIN_LAYOUTS: usize = 5;

    /// Pixel Prophet: INSTANCE layer count must exceed this
    pub const PIXEL_PROPHET_MIN_INSTANCES: usize = 20;

    /// Component Composer: minimum distinct components
    pub const COMPOSER_MIN_COMPONENTS: usize = 15;

    /// Component Composer: COMPONENT layer count must exceed this
    pub const COMPOSER_MIN_COMPONENT_LAYERS: usize = 10;
}

/// Fun-fact commentary thresholds
pub mod facts {
    /// Layer count above which a file is called "high" on layers
    pub const HIGH_LAYER_COUNT: usize = 1000;

    /// Typography style count above which type usage is "expressive"
    pub const EXPRESSIVE_TYPE_STYLES: usize = 5;
}

/// HTTP/Network constants
pub mod network {
    /// Figma REST API base URL
    pub const DEFAULT_API_BASE: &str = "https://api.figma.com/v1";

    /// Default request timeout (seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

    /// Connection timeout (seconds)
    pub const CONNECTION_TIMEOUT_SECS: u64 = 10;

    /// Maximum retries for transient failures
    pub const MAX_NETWORK_RETRIES: usize = 3;

    /// Minimum delay between retries (milliseconds)
    pub const RETRY_MIN_DELAY_MS: u64 = 500;

    /// Maximum delay between retries (seconds)
    pub const RETRY_MAX_DELAY_SECS: u64 = 30;

    /// Environment variable accepted as a token fallback
    pub const TOKEN_ENV_FALLBACK: &str = "FIGMA_ACCESS_TOKEN";
}

/// History store constants
pub mod history {
    /// Default number of recent files kept
    pub const DEFAULT_MAX_ENTRIES: usize = 10;

    /// Stored reports kept per file; older ones are pruned on record
    pub const REPORTS_PER_FILE: usize = 3;

    /// Upper bound for concurrent analyses in one invocation
    pub const MAX_CONCURRENCY: usize = 16;
}
