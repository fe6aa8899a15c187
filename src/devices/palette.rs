// palette.rs
use crate::{
    error::AppError,
    models::{Color, Rgb},
};

#[derive(Debug, Clone)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> Self {
        Self { colors }
    }

    pub fn color_of(&self, name: &str) -> Result<Color, AppError> {
        self.colors
            .iter()
            .find(|color| color.name == name)
            .cloned()
            .ok_or_else(|| AppError::UnknownColor(name.to_string()))
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}

impl Default for Palette {
    fn default() -> Self {
        let entries = [
            ("red", Rgb::new(255, 0, 0)),
            ("green", Rgb::new(0, 255, 0)),
            ("blue", Rgb::new(0, 0, 255)),
            ("yellow", Rgb::new(255, 255, 0)),
            ("purple", Rgb::new(128, 0, 128)),
            ("cyan", Rgb::new(0, 255, 255)),
            ("white", Rgb::new(255, 255, 255)),
        ];
        Self::new(
            entries
                .into_iter()
                .map(|(name, rgb)| Color {
                    name: name.to_string(),
                    rgb,
                })
                .collect(),
        )
    }
}
