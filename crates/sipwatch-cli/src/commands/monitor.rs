use sipwatch_core::RefreshScheduler;

pub fn run(interval_ms: i64, seed: Option<u64>) {
    let config = super::scheduler_config(interval_ms);
    let scheduler = RefreshScheduler::new(config, super::make_generator(seed));
    let mut app = crate::tui::app::App::new(scheduler);
    if let Err(e) = app.run() {
        eprintln!("TUI error: {e}");
        std::process::exit(1);
    }
}
