// Page-facing constants: selectors, class names and attribute names shared by
// the DOM adapter. Simulation tuning lives in `bubble_core::constants`.

// Mounting
pub const AUTO_MOUNT_SELECTOR: &str = "[data-bubble-field=\"auto\"]"; // vanilla pages opt in with this
pub const POPULATION_ATTR: &str = "data-bubble-count"; // optional per-layer override
pub const MAX_POPULATION: usize = 64;

// Regions particles must not overlap
pub const OBSTACLE_SELECTOR: &str =
    ".product-card, .content-block, .hero, header, footer, main section, [data-bubble-obstacle]";

// Pointer-downs inside these never pop a bubble
pub const INTERACTIVE_SELECTOR: &str =
    "button, a, input, select, textarea, label, [role=\"button\"], [data-bubble-ignore]";

// Particle elements
pub const BUBBLE_TAG: &str = "span";
pub const BUBBLE_CLASS: &str = "bubble";
pub const POPPING_CLASS: &str = "is-popping"; // CSS animation length must match POP_DURATION_MS

// Media
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";
