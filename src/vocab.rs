//! Fixed vocabularies of the payload language.
//!
//! Every table is matched against an already-normalized word: the device
//! vocabularies are uppercase, the shell tables are lowercase.

/// Modes accepted by `ATTACKMODE`.
pub const ATTACK_MODES: &[&str] = &["HID", "STORAGE", "RNDIS_ETHERNET", "SERIAL"];

/// Colors and patterns accepted by `LED`.
pub const LED_COLORS: &[&str] = &["R", "G", "B", "Y", "C", "M", "W", "OFF", "SPECIAL"];

/// Keystroke words accepted by `QUACK` / `Q`.
pub const QUACK_WORDS: &[&str] = &["STRING", "ENTER", "DELAY", "GUI", "ALT", "CTRL", "SHIFT"];

/// Device directives recognized regardless of the catalog.
pub const DIRECTIVES: &[&str] = &[
    "ATTACKMODE",
    "LED",
    "QUACK",
    "Q",
    "DELAY",
    "RUN",
    "GET",
    "REQUIRETOOL",
    "WAIT_FOR_PRESENT",
    "WAIT_FOR_TARGET",
];

/// Common shell commands allowed at the start of a payload line.
pub const SHELL_COMMANDS: &[&str] = &[
    "cp", "mv", "rm", "mkdir", "chmod", "chown", "cat", "head", "tail", "grep", "sed", "awk",
    "curl", "wget", "ssh", "scp", "ls", "cd", "pwd", "whoami", "id", "uname", "ps", "kill", "tar",
    "zip", "python", "bash", "sh", "apt", "systemctl", "echo", "sleep", "clear",
];

/// Shell control-flow keywords.
pub const SHELL_KEYWORDS: &[&str] = &[
    "if", "fi", "then", "else", "elif", "for", "do", "done", "while", "esac", "case", "function",
];

pub fn is_attack_mode(upper: &str) -> bool {
    ATTACK_MODES.contains(&upper)
}

pub fn is_led_color(upper: &str) -> bool {
    LED_COLORS.contains(&upper)
}

pub fn is_quack_word(upper: &str) -> bool {
    QUACK_WORDS.contains(&upper)
}

pub fn is_directive(upper: &str) -> bool {
    DIRECTIVES.contains(&upper)
}

pub fn is_shell_command(lower: &str) -> bool {
    SHELL_COMMANDS.contains(&lower)
}

pub fn is_shell_keyword(lower: &str) -> bool {
    SHELL_KEYWORDS.contains(&lower)
}
