/// DOM hooks and transition curves for the trail effect.
///
/// Numeric tunables live in `trail::TrailConfig`; these are the web-side
/// strings and delays that never vary.
pub const CONTAINER_SELECTOR: &str = ".trail-container";
pub const TRAIL_IMG_CLASS: &str = "trail-img";

// Scale-in / scale-out easing
pub const IN_EASING: &str = "cubic-bezier(0.07, 0.5, 0.5, 1)";
pub const OUT_EASING: &str = "cubic-bezier(0.87, 0, 0.13, 1)";

// Delay before flipping a fresh image to scale(1), so the browser registers
// the scale(0) starting style and the transition animates instead of snapping
pub const SCALE_IN_DEFER_MS: i32 = 10;
