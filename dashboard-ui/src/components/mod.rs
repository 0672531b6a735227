pub mod action_items;
pub mod alerts;
pub mod page_shell;
pub mod report_card;
pub mod report_modal;
pub mod sidebar;
pub mod source_modal;
pub mod text;
