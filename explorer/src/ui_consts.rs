// Side panels
pub const CONTROLS_PANEL_WIDTH: f32 = 280.0;
pub const DETAIL_PANEL_WIDTH: f32 = 320.0;

// Common spacing between grouped controls
pub const SECTION_SPACING: f32 = 8.0;
pub const DETAIL_SECTION_SPACING: f32 = 6.0;

// Text sizes
pub const HEADING_TEXT_SIZE: f32 = 16.0;
pub const META_TEXT_SIZE: f32 = 11.0;
pub const COUNT_TEXT_SIZE: f32 = 10.0;
