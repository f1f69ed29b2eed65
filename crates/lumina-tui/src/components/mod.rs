pub mod chat_panel;
pub mod help_overlay;
pub mod regions;
pub mod tile_grid;
pub mod tile_view;
