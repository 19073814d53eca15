use ratatui::style::Color;

pub const BRAND: Color = Color::Rgb(0x4f, 0x9d, 0xde);
pub const TEXT: Color = Color::Rgb(0xe5, 0xe5, 0xe5);
pub const MUTED: Color = Color::Rgb(0x9c, 0xa3, 0xaf);
pub const SEPARATOR: Color = Color::Rgb(0x6b, 0x72, 0x80);
pub const BORDER: Color = Color::Rgb(0x3f, 0x46, 0x52);
pub const POPUP_BORDER: Color = Color::Rgb(0xe5, 0xe5, 0xe5);
pub const SELECTED_BG: Color = Color::Rgb(0x1e, 0x3a, 0x5f);

/// Signed-in marker and success alerts.
pub const SUCCESS: Color = Color::Rgb(0x22, 0xc5, 0x5e);
/// Error alerts and the delete confirmation.
pub const DANGER: Color = Color::Rgb(0xef, 0x44, 0x44);
