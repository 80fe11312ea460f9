//! Simulation constants and tuning parameters.
//!
//! Distances are meters, times are seconds, Y is up.

/// Nominal frame rate used by the headless runner (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per frame at the nominal frame rate.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Aggro / steering ---

/// Enemies closer than this to the player chase it.
pub const AGGRO_RADIUS: f32 = 20.0;

/// Horizontal speed below which a body is not re-oriented toward its motion.
pub const FACING_SPEED_EPSILON: f32 = 0.01;

// --- Player ---

pub const PLAYER_MAX_HEALTH: f32 = 100.0;
pub const PLAYER_MAX_STAMINA: f32 = 100.0;

/// Walking speed from a unit move direction.
pub const PLAYER_WALK_SPEED: f32 = 5.0;

/// Speed multiplier while sprinting with stamina left.
pub const PLAYER_SPRINT_MULTIPLIER: f32 = 1.8;

/// Upward velocity applied by a jump.
pub const PLAYER_JUMP_VELOCITY: f32 = 6.0;

/// Move-direction length under which input counts as standing still.
pub const MOVE_INPUT_EPSILON: f32 = 0.01;

/// Vertical speed under which the body counts as grounded for jumping.
pub const GROUNDED_VELOCITY_EPSILON: f32 = 0.05;

/// Stamina spent per second of sprinting.
pub const STAMINA_DRAIN_PER_SEC: f32 = 25.0;

/// Stamina recovered per second when not sprinting.
pub const STAMINA_REGEN_PER_SEC: f32 = 12.0;

/// How far the player's sensor looks for targets.
pub const SENSOR_RANGE: f32 = 4.0;

// --- Player weapon ---

pub const PLAYER_WEAPON_DAMAGE: f32 = 25.0;
pub const PLAYER_WEAPON_RANGE: f32 = 3.0;
pub const PLAYER_WEAPON_COOLDOWN: f64 = 0.6;

/// Delay between swing start and hit resolution. Independent of animation length.
pub const PLAYER_DAMAGE_DELAY: f64 = 0.35;

/// Swing duration used when the weapon has no swing animation.
pub const SWING_FALLBACK_SECS: f64 = 0.5;

// --- Enemy attacks ---

/// Fraction of `attack_duration` after which an enemy attack lands.
pub const ENEMY_HIT_FRACTION: f64 = 0.6;

/// Extra reach granted when an enemy attack lands, on top of `Combat::range`.
pub const ATTACK_RANGE_BUFFER: f32 = 0.5;

// --- Spider archetype ---

pub const SPIDER_MAX_HEALTH: f32 = 60.0;
pub const SPIDER_DAMAGE: f32 = 10.0;
pub const SPIDER_ATTACK_RANGE: f32 = 1.8;
pub const SPIDER_ATTACK_COOLDOWN: f64 = 1.5;
pub const SPIDER_ATTACK_DURATION: f64 = 1.0;
pub const SPIDER_MAX_SPEED: f32 = 3.0;
pub const SPIDER_BODY_RADIUS: f32 = 0.6;

// --- Animation ---

/// Horizontal speed above which an enemy plays its walk clip.
pub const WALK_ANIMATION_SPEED: f32 = 0.2;
