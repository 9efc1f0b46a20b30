use ratatui::style::Color;

/// Colours by role. Values are Catppuccin Mocha swatches.
#[derive(Clone, Copy, Debug)]
pub struct Palette {
    pub text: Color,
    pub subtext: Color,
    pub overlay: Color,
    pub surface: Color,

    /// Focus, key hints
    pub blue: Color,
    /// Idle badge, enabled toggles, plain layer values
    pub green: Color,
    /// Composed characters
    pub mauve: Color,
    /// Armed badge, dead-key presses
    pub peach: Color,
    /// Keys the layout does not define
    pub red: Color,
    /// Status messages
    pub yellow: Color,
}

pub const MOCHA: Palette = Palette {
    text: Color::Rgb(205, 214, 244),
    subtext: Color::Rgb(186, 194, 222),
    overlay: Color::Rgb(108, 112, 134),
    surface: Color::Rgb(69, 71, 90),
    blue: Color::Rgb(137, 180, 250),
    green: Color::Rgb(166, 227, 161),
    mauve: Color::Rgb(203, 166, 247),
    peach: Color::Rgb(250, 179, 135),
    red: Color::Rgb(243, 139, 168),
    yellow: Color::Rgb(249, 226, 175),
};
