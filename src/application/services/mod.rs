pub mod bookmark_service;
pub mod bookmark_service_impl;
pub mod tag_service;
pub mod tag_service_impl;
