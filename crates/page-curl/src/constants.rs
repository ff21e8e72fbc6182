/// Page width along the bend axis, in world units.
pub const PAGE_WIDTH: f32 = 1.28;

/// Page height, in world units.
pub const PAGE_HEIGHT: f32 = 1.73;

/// Sheet thickness. Also the stacking step between neighbouring pages.
pub const PAGE_DEPTH: f32 = 0.003;

/// Number of bend segments across the page width (the chain has one more joint).
pub const PAGE_SEGMENTS: u16 = 30;

/// Subdivisions along the page height.
pub const PAGE_HEIGHT_SEGMENTS: u16 = 2;

/// Smoothing time of the joint damper, in seconds.
pub const EASING_FACTOR: f32 = 0.5;

/// Weight of the concave curl near the spine.
pub const INSIDE_CURVE_STRENGTH: f32 = 0.18;

/// Weight of the convex curl toward the free edge.
pub const OUTSIDE_CURVE_STRENGTH: f32 = 0.05;

/// Joint where the inside curve hands over to the outside curve. Receives no curl.
pub const CURVE_TRANSITION_JOINT: usize = 8;

/// Per-page fan angle for resting pages, in degrees.
pub const PAGE_FAN_DEGREES: f32 = 0.8;

/// Angles closer than this to their target snap onto it (radians).
pub const SNAP_EPSILON: f32 = 0.001;
