pub mod user_service;
pub use user_service::{NewUser, UserError, UserService};

pub mod user_service_impl;
pub use user_service_impl::SeaOrmUserService;

pub mod validation;
