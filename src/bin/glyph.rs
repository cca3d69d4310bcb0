//! The `glyph` interpreter binary: parse CLI arguments, run a source file,
//! and map the result onto a process exit code.

use log::error;

use glyph_lang::cli::Cli;
use glyph_lang::host::ConsoleHost;
use glyph_lang::GlyphError;

fn main() {
    let args = Cli::init();

    simple_logger::init_with_level((&args.verbosity).into()).unwrap();

    let host = ConsoleHost::new(args.trace);

    // a runtime error is already reported through `host` by `run_file`; a
    // parse error never reaches the host, so it is logged here instead.
    if let Err(err) = glyph_lang::run_file(&args.file, &host) {
        if let GlyphError::Parse(..) = &err {
            error!("{err}");
        }
        std::process::exit(-1);
    }
}
