// Components module - reusable UI building blocks
//
// Shell components are rendered on every route:
// - Header: back button, page title, avatar
// - Account menu: dropdown overlay under the avatar
// - Logs strip: newest system log lines
// - Toasts: notification stack, drawn last
//
// Page components (profile form, loyalty panel) are composed by views.

pub mod account_menu;
pub mod header;
pub mod logs_strip;
pub mod loyalty_panel;
pub mod profile_form;
pub mod toast;
