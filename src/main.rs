//! Reference glyph overlays on a glyph view, built with Bevy and Linebender crates.

use reference_viewer::core;

fn main() {
    let cli_args = core::platform::get_cli_args();
    if let Err(error) = core::runner::run_app(cli_args) {
        core::platform::handle_error(error);
    }
}
