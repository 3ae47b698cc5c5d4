mod core;
mod import_cmds;

pub use self::core::{cmd_choose_random, cmd_delete, cmd_save, cmd_show};
pub use import_cmds::cmd_get_wallpapers;
