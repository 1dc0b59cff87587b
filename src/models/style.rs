use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Rgb { red, green, blue }
    }

    pub fn css(&self) -> String {
        format!("rgb({}, {}, {})", self.red, self.green, self.blue)
    }

    pub fn to_colorgrad(&self) -> colorgrad::Color {
        colorgrad::Color::from_rgba8(self.red, self.green, self.blue, 255)
    }
}

/// One stop of the elevation colour ramp, as read from the colormap resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorBreakpoint {
    pub elevation: f64,
    pub color: Rgb,
    pub alpha: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}
