//! Ratatui widgets for the tbx TUI.

pub mod alert;
pub mod command_bar;
pub mod help;
pub mod input_line;
pub mod output_pane;
pub mod status_bar;
pub mod tab_bar;
pub mod text_area;
