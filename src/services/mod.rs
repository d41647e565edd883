pub mod interest_guard;
pub mod matches_service;
pub mod member_service;
pub mod profile_service;
