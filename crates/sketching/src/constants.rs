/// Length of a rate counter window in milliseconds.
pub const RATE_WINDOW_MS: f64 = 1000.0;

/// Sample circle radius per unit of pressure.
pub const PRESSURE_RADIUS_SCALE: f64 = 10.0;

/// Line width of the per-sample pressure circles.
pub const CIRCLE_LINE_WIDTH: f64 = 0.75;

/// Line width of stroke paths.
pub const STROKE_LINE_WIDTH: f64 = 1.0;

/// Debug overlay font size; also the overlay line height.
pub const DEBUG_FONT_SIZE: f64 = 10.0;

/// Hue (degrees) of a zero-pressure sample. Full pressure maps to 0 (red).
pub const ZERO_PRESSURE_HUE: f64 = 240.0;

/// Maximum flattening steps per cubic segment on the CPU surface.
pub const MAX_CURVE_STEPS: usize = 64;
