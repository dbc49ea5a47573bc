pub mod auth_gate;
pub mod home_page;
pub mod login;
pub mod restaurant_details;
pub mod review_form;
pub mod reviews_list;
pub mod score_banner;
pub mod search_box;
