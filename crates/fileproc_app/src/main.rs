mod app;
mod commands;
mod config;
mod effects;
mod logging;
mod render;

fn main() -> std::process::ExitCode {
    app::run()
}
