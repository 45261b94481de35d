pub mod camera_view;
pub mod faq;
pub mod footer;
pub mod hero;
pub mod info_sections;
pub mod navbar;
pub mod result_card;
pub mod shapes_list;
