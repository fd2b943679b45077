use bunnyide::StyleClass;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub ui: UiColors,
    pub syntax: SyntaxColors,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiColors {
    pub background: ThemeColor,
    pub foreground: ThemeColor,
    pub border: ThemeColor,
    pub border_focused: ThemeColor,
    pub line_numbers: ThemeColor,
    pub cursor_line: ThemeColor,
    pub selection: ThemeColor,
    pub selection_fg: ThemeColor,

    // Status bar
    pub status_bar_bg: ThemeColor,
    pub status_bar_fg: ThemeColor,
    pub mode_payload_bg: ThemeColor,
    pub mode_shell_bg: ThemeColor,
    pub mode_fg: ThemeColor,

    // Diagnostics
    pub diagnostic_error: ThemeColor,
    pub diagnostic_error_line: ThemeColor,
}

/// One color per highlight class
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyntaxColors {
    pub text: ThemeColor,         // unclassified words
    pub variable: ThemeColor,     // $VAR
    pub number: ThemeColor,       // 500
    pub directive: ThemeColor,    // ATTACKMODE, LED, QUACK and catalog functions
    pub argument: ThemeColor,     // catalog arguments
    pub word: ThemeColor,         // HID, STORAGE and catalog words
    pub shell_keyword: ThemeColor,
    pub control_flow: ThemeColor, // if, while, case
    pub operator: ThemeColor,
    pub string: ThemeColor,
    pub comment: ThemeColor,
}

impl SyntaxColors {
    pub fn color_for(&self, class: StyleClass) -> &ThemeColor {
        match class {
            StyleClass::Generic => &self.text,
            StyleClass::Variable => &self.variable,
            StyleClass::Number => &self.number,
            StyleClass::Directive | StyleClass::Function => &self.directive,
            StyleClass::Argument => &self.argument,
            StyleClass::DirectiveArgument | StyleClass::Word => &self.word,
            StyleClass::ShellKeyword => &self.shell_keyword,
            StyleClass::ControlFlow => &self.control_flow,
            StyleClass::Operator => &self.operator,
            StyleClass::String => &self.string,
            StyleClass::Comment => &self.comment,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThemeColor {
    Rgb { r: u8, g: u8, b: u8 },
    Named(String),
}

impl ThemeColor {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb { r, g, b }
    }

    pub fn to_color(&self) -> Color {
        match self {
            ThemeColor::Rgb { r, g, b } => Color::Rgb(*r, *g, *b),
            ThemeColor::Named(name) => match name.to_lowercase().as_str() {
                "black" => Color::Black,
                "red" => Color::Red,
                "green" => Color::Green,
                "yellow" => Color::Yellow,
                "blue" => Color::Blue,
                "magenta" => Color::Magenta,
                "cyan" => Color::Cyan,
                "white" => Color::White,
                "gray" | "grey" => Color::Gray,
                "darkgray" | "darkgrey" => Color::DarkGray,
                _ => parse_hex(name).unwrap_or(Color::White),
            },
        }
    }
}

/// `#RRGGBB`
fn parse_hex(name: &str) -> Option<Color> {
    let hex = name.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: String::from("dark"),
            ui: UiColors {
                background: ThemeColor::rgb(30, 30, 30),
                foreground: ThemeColor::rgb(212, 212, 212),
                border: ThemeColor::rgb(60, 60, 60),
                border_focused: ThemeColor::rgb(100, 149, 237),
                line_numbers: ThemeColor::rgb(90, 90, 90),
                cursor_line: ThemeColor::rgb(40, 40, 40),
                selection: ThemeColor::rgb(70, 70, 120),
                selection_fg: ThemeColor::rgb(255, 255, 255),

                status_bar_bg: ThemeColor::rgb(25, 25, 25),
                status_bar_fg: ThemeColor::rgb(150, 150, 150),
                mode_payload_bg: ThemeColor::rgb(78, 201, 176),
                mode_shell_bg: ThemeColor::rgb(220, 220, 170),
                mode_fg: ThemeColor::rgb(30, 30, 30),

                diagnostic_error: ThemeColor::rgb(244, 71, 71),
                diagnostic_error_line: ThemeColor::rgb(50, 30, 30),
            },
            syntax: SyntaxColors {
                text: ThemeColor::rgb(212, 212, 212),
                variable: ThemeColor::rgb(156, 220, 254),
                number: ThemeColor::rgb(181, 206, 168),
                directive: ThemeColor::rgb(86, 156, 214),
                argument: ThemeColor::rgb(220, 220, 170),
                word: ThemeColor::rgb(78, 201, 176),
                shell_keyword: ThemeColor::rgb(197, 134, 192),
                control_flow: ThemeColor::rgb(216, 160, 223),
                operator: ThemeColor::rgb(150, 150, 150),
                string: ThemeColor::rgb(206, 145, 120),
                comment: ThemeColor::rgb(106, 153, 85),
            },
        }
    }

    pub fn light() -> Self {
        Self {
            name: String::from("light"),
            ui: UiColors {
                background: ThemeColor::rgb(255, 255, 255),
                foreground: ThemeColor::rgb(30, 30, 30),
                border: ThemeColor::rgb(200, 200, 200),
                border_focused: ThemeColor::rgb(0, 122, 204),
                line_numbers: ThemeColor::rgb(150, 150, 150),
                cursor_line: ThemeColor::rgb(240, 240, 240),
                selection: ThemeColor::rgb(173, 214, 255),
                selection_fg: ThemeColor::rgb(0, 0, 0),

                status_bar_bg: ThemeColor::rgb(240, 240, 240),
                status_bar_fg: ThemeColor::rgb(80, 80, 80),
                mode_payload_bg: ThemeColor::rgb(22, 163, 74),
                mode_shell_bg: ThemeColor::rgb(180, 140, 0),
                mode_fg: ThemeColor::rgb(255, 255, 255),

                diagnostic_error: ThemeColor::rgb(220, 38, 38),
                diagnostic_error_line: ThemeColor::rgb(254, 226, 226),
            },
            syntax: SyntaxColors {
                text: ThemeColor::rgb(30, 30, 30),
                variable: ThemeColor::rgb(0, 112, 193),
                number: ThemeColor::rgb(9, 134, 88),
                directive: ThemeColor::rgb(0, 0, 255),
                argument: ThemeColor::rgb(121, 94, 38),
                word: ThemeColor::rgb(38, 127, 153),
                shell_keyword: ThemeColor::rgb(175, 0, 219),
                control_flow: ThemeColor::rgb(175, 0, 219),
                operator: ThemeColor::rgb(100, 100, 100),
                string: ThemeColor::rgb(163, 21, 21),
                comment: ThemeColor::rgb(0, 128, 0),
            },
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
