pub type CmdResult<T> = create_hubs_app::Result<(T, i32)>;

pub mod init;
