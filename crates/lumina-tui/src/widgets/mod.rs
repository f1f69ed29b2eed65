pub mod chat_input;
pub mod markup_lines;
pub mod pane_chrome;
pub mod status_bar;
pub mod toast;
