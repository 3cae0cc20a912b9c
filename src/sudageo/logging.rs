use tracing_subscriber::{fmt, EnvFilter};

/// Overrides the default filter when set, e.g. `SUDAGEO_LOG=sudageo::raster=debug`.
pub const LOG_ENV: &str = "SUDAGEO_LOG";

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "sudageo=debug"
    } else {
        "sudageo=info"
    }
}

/// Logs go to stderr so command output on stdout stays pipeable.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use crate::sudageo::logging::{default_directive, init};

    #[test]
    fn test_verbose_raises_level() {
        assert_eq!("sudageo=info", default_directive(false));
        assert_eq!("sudageo=debug", default_directive(true));
    }

    #[test]
    fn test_init_twice() {
        init(false);
        init(true);
    }
}
