use tracing_subscriber::EnvFilter;

mod gui;

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    gui::run()
}
