use log::LevelFilter;

use crate::constants::DEBUG_MAX_TICKS;

/// Launch options read from the command line. Unknown flags and
/// malformed values fall back to the defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct Options {
    pub debug: bool,
    pub max_ticks: Option<u64>,
    pub log_level: LevelFilter,
}

impl Default for Options {
    fn default() -> Self {
        Options { debug: false, max_ticks: None, log_level: LevelFilter::Info }
    }
}

impl Options {
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut options = Options::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_ref() {
                "--debug" => options.debug = true,
                "--ticks" => {
                    options.max_ticks = args.next().and_then(|v| v.as_ref().parse().ok());
                }
                "--log-level" => {
                    if let Some(level) = args.next().and_then(|v| v.as_ref().parse().ok()) {
                        options.log_level = level;
                    }
                }
                _ => {}
            }
        }
        if options.debug && options.max_ticks.is_none() {
            options.max_ticks = Some(DEBUG_MAX_TICKS);
        }
        options
    }
}
