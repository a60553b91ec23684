pub mod comments;
pub mod companies;
pub mod data_requests;
pub mod facebook_requests;
pub mod holidays;
pub mod sessions;
pub mod users;
