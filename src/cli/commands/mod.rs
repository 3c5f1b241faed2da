mod client;
mod user;

pub use client::cmd_client_add;
pub use user::{
    cmd_user_create, cmd_user_delete, cmd_user_demote, cmd_user_list, cmd_user_promote,
    cmd_user_set_enabled, cmd_user_show, cmd_user_two_factor,
};
