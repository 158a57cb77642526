use ratatui::style::Color;

pub const PRIMARY: Color = Color::from_u32(0x007aa2f7);
pub const SECONDARY: Color = Color::from_u32(0x00394b70);
pub const NEUTRAL: Color = Color::from_u32(0x00404040);
pub const DANGER: Color = Color::from_u32(0x00f7768e);
pub const ACCENT: Color = Color::from_u32(0x00e0af68);
