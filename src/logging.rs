/// Route `log` records to stderr through `env_logger`, defaulting to `info`.
/// `RUST_LOG` overrides the filter.
pub fn setup() {
    use env_logger::{Builder, Env};
    // a second call (e.g. from tests) keeps the first logger
    let _ = Builder::from_env(Env::default().default_filter_or("info")).try_init();
}
