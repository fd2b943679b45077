pub mod autocomplete;
pub mod editor;
pub mod hover;
pub mod layout;
pub mod search_bar;
pub mod snippets;
pub mod status_bar;

use crate::app::App;
use ratatui::Frame;

pub fn render(frame: &mut Frame, app: &mut App) {
    layout::render(frame, app);
}
