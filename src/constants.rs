//! Centralised simulation defaults.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place.  [`crate::config::SimConfig::default`] is built from
//! these; `assets/particles.toml` can override any of them at startup.
//!
//! Coordinates are screen-space: origin at the top-left corner, x grows to the
//! right, y grows downward.

// ── Visible Bounds ────────────────────────────────────────────────────────────

/// Width of the visible field (world units == pixels).
pub const FIELD_WIDTH: f32 = 1000.0;

/// Height of the visible field.
pub const FIELD_HEIGHT: f32 = 1000.0;

/// Simulation ticks per second.  Also the compaction cadence: tombstoned
/// particles are evicted once every `TICK_RATE` ticks.
pub const TICK_RATE: u32 = 30;

// ── Spawning ──────────────────────────────────────────────────────────────────

/// Distance kept clear between the field edge and bulk-init spawn positions.
/// Burst spawn reuses it as the fallback offset when its window hits a bound.
pub const SPAWN_MARGIN: f32 = 20.0;

/// Half-width of the square window around the cursor used by burst spawns.
pub const BURST_RANGE: f32 = 20.0;

/// Particles created per burst spawn.
pub const BURST_COUNT: usize = 20;

/// Particles created by bulk init and by every reset.
pub const PARTICLE_COUNT: usize = 200;

/// Upper bound on `particle_count` and `burst_count` accepted from config.
pub const MAX_SPAWN_BATCH: usize = 100_000;

/// Each velocity component of a freshly spawned particle is sampled from
/// `[-INITIAL_SPEED, INITIAL_SPEED]`.
pub const INITIAL_SPEED: f32 = 10.0;

// ── Particle Geometry ─────────────────────────────────────────────────────────

pub const MIN_RADIUS: f32 = 1.0;

/// Upper radius bound.  Also the influence radius of the collision prefilter.
pub const MAX_RADIUS: f32 = 5.0;

/// Lower radius bound for attractors; the upper bound is [`MAX_RADIUS`].
///
/// Attraction radius grows with the cube of the body radius, so 2.5..5.0
/// gives fields between ~16 and 125 units.
pub const ATTRACTOR_MIN_RADIUS: f32 = 2.5;

/// Per-axis impulse magnitude an attractor applies to particles in range.
pub const ATTRACTION_STRENGTH: [f32; 2] = [10.0, 10.0];

// ── Forces & Time ─────────────────────────────────────────────────────────────

/// Gravity added to velocity each tick (scaled by time).  Positive y is down.
pub const GRAVITY: [f32; 2] = [0.0, 1.0];

/// Default time scale.  Not physical seconds: scales both gravity and
/// velocity integration.
pub const TIME_SCALE: f32 = 0.5;

/// The three time-scale presets cycled by the speed controls.
pub const TIME_SCALE_SLOW: f32 = 0.1;
pub const TIME_SCALE_NORMAL: f32 = 0.5;
pub const TIME_SCALE_FAST: f32 = 1.0;

/// Velocity exchange factor for the velocity-blend collision response.
pub const VELOCITY_BLEND_FACTOR: f32 = 0.01;

/// Weights of the x-blend collision response: the resolving particle's own
/// x velocity, then its partner's.
pub const X_BLEND_SELF_WEIGHT: f32 = 0.1;
pub const X_BLEND_OTHER_WEIGHT: f32 = 2.0;

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Spawn palette (sRGB): white, green, blue, yellow, red, magenta, cyan.
pub const PALETTE: [[f32; 3]; 7] = [
    [1.0, 1.0, 1.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 1.0, 0.0],
    [1.0, 0.0, 0.0],
    [1.0, 0.0, 1.0],
    [0.0, 1.0, 1.0],
];

/// Colour of attractor bodies.
pub const ATTRACTOR_COLOR: [f32; 3] = [1.0, 0.0, 0.0];

/// Outline colour (sRGBA) of the attraction radius indicator.
pub const ATTRACTION_OUTLINE_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 60.0 / 255.0];
