// SPDX-License-Identifier: MPL-2.0
use ila_ui::app::{self, Flags};
use ila_ui::logging;
use std::path::PathBuf;

const HELP: &str = "\
ila-ui: image viewer, scroller and toggler demo page

USAGE:
  ila-ui [OPTIONS] [PAGE]

OPTIONS:
  --lang <LOCALE>    Interface language (e.g. en-US, fr)
  --config <FILE>    Configuration file to merge over the defaults
  -v, --verbose      Debug logging
  -h, --help         Print this help
";

fn main() -> iced::Result {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let verbose = args.contains(["-v", "--verbose"]);
    logging::init(verbose);

    let lang = args.opt_value_from_str("--lang").unwrap_or_else(|err| {
        tracing::warn!("ignoring --lang: {err}");
        None
    });
    let config_path = args
        .opt_value_from_os_str("--config", |s| Ok::<_, std::convert::Infallible>(PathBuf::from(s)))
        .unwrap_or_default();
    let page_path = args.finish().into_iter().next().map(PathBuf::from);

    app::run(Flags {
        lang,
        config_path,
        page_path,
    })
}
