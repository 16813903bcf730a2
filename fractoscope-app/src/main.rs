mod app;
mod app_dir;
mod config;
mod input;
mod render_bridge;
mod ui;

fn main() -> eframe::Result {
    app::run()
}
