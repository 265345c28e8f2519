/// Projection anchor years: published pathway guidance provides values at
/// 2100 and extension ranges to 2300; nothing is published beyond that.
pub const NEAR_ANCHOR_YEAR: i32 = 2100;
pub const FAR_ANCHOR_YEAR: i32 = 2300;

/// Trend fitting policy
pub const DEFAULT_MIN_TREND_YEARS: usize = 10;

/// Climatology window used for the baseline reported alongside each trend
pub const BASELINE_WINDOW_YEARS: usize = 30;

/// Default projection horizons (years past the reference year)
pub const DEFAULT_HORIZONS: [i32; 3] = [10, 100, 1000];

/// Physical plausibility bounds for daily values
pub const MIN_VALID_TEMP: f64 = -60.0;
pub const MAX_VALID_TEMP: f64 = 60.0;
pub const MIN_VALID_PRECIP: f64 = 0.0;
pub const MAX_VALID_PRECIP: f64 = 500.0;
pub const MIN_VALID_WIND: f64 = 0.0;
pub const MAX_VALID_WIND: f64 = 250.0;

/// Uncertainty caveats carried verbatim into every report. These are part
/// of the output contract, not decoration.
pub const REPORT_CAVEATS: [&str; 4] = [
    "Observational record may contain gaps, inhomogeneities and station moves; a single station is not spatially representative.",
    "Trends are ordinary least-squares lines; no claim of meteorological skill beyond linear extrapolation is made.",
    "Scenario adjustments are simplified AR6-informed deltas; actual pathway spread and internal variability are much larger.",
    "Horizons beyond 2300 are illustrative only: scenario adjustments are frozen at their 2300 values to avoid non-physical extrapolation.",
];

/// Low-confidence marker appended to every wind projection note.
pub const WIND_CONFIDENCE_NOTE: &str =
    "low confidence: published pathway guidance for mean wind change is weak";
