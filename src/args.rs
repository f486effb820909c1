use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(name = "pug_lobby", rename_all = "kebab-case")]
pub struct Args {
    /// Game mode, "6v6" or "HL"
    #[clap(long, default_value = "6v6", env = "LOBBY_MODE")]
    pub mode: String,

    #[clap(long, default_value = "pug", env = "LOBBY_NAME")]
    pub name: String,

    #[clap(long, env = "LOBBY_PRIVATE")]
    pub private: bool,

    /// Read commands from this file instead of stdin
    #[clap(long)]
    pub script: Option<PathBuf>,

    /// Print the final lobby state as JSON on exit
    #[clap(long)]
    pub dump_json: bool,
}
