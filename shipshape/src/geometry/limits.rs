// Centralized ingestion limits to harden against untrusted input (shape text/JSON)

// Instruction text caps
pub const MAX_SHAPE_TEXT: usize = 1024 * 1024; // 1 MB of instruction text
pub const MAX_COMMANDS: usize = 10_000;

// Drawing size cap for loaded documents
pub const MAX_VERTICES: usize = 10_000;

// Numeric bounds
pub const COORD_MIN: f64 = -10_000_000.0;
pub const COORD_MAX: f64 =  10_000_000.0;
pub const SIZE_MAX: f64 = 100_000.0;

#[inline]
pub fn in_coord_bounds(x: f64) -> bool { x.is_finite() && x >= COORD_MIN && x <= COORD_MAX }

#[inline]
pub fn in_size_bounds(w: f64) -> bool { w.is_finite() && w > 0.0 && w <= SIZE_MAX }
