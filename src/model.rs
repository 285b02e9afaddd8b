pub mod assignment;
pub mod request;
pub mod response_object;
