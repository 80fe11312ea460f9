use env_logger::{Builder, Env};

/// Filter used with `--verbose`: frame-level detail from the simulation
/// crates, everything else stays at info.
const VERBOSE_FILTER: &str = "info,hollowfang_sim=debug,hollowfang_headless=debug";
const DEFAULT_FILTER: &str = "info";

/// Install the logger for the headless runner.
///
/// An explicit `RUST_LOG` always takes precedence over `--verbose`, so a run
/// can be narrowed to e.g. `hollowfang_sim::systems::timers=trace`. Timestamps
/// carry milliseconds because frames are shorter than a second.
pub fn init(verbose: bool) {
    let filter = if verbose {
        VERBOSE_FILTER
    } else {
        DEFAULT_FILTER
    };

    let mut builder = Builder::from_env(Env::default().default_filter_or(filter));
    builder.format_timestamp_millis();

    // A logger may already be installed when several tests call this.
    let _ = builder.try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_repeatable() {
        init(false);
        init(true);
    }
}
