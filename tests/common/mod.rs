//! Shared helpers for the integration tests: run a Glyph source string
//! in-process against a `ScriptedHost` and hand back what a test wants to
//! assert on, calling the library directly instead of spawning a compiled
//! binary.

use glyph_lang::error::ErrorKind;
use glyph_lang::host::ScriptedHost;
use glyph_lang::GlyphError;

/// Run `src` to completion and return its captured stdout lines. Panics
/// (failing the test) if the program does not run to completion.
#[allow(dead_code)]
pub fn run(src: &str) -> Vec<String> {
    let host = ScriptedHost::default();
    glyph_lang::run_str("test.gl", src, &host).unwrap_or_else(|e| panic!("program should run to completion: {e}"));
    host.output_lines()
}

/// Same as [`run`], but feeds `input` lines to `inputi`/`inputs` calls.
#[allow(dead_code)]
pub fn run_with_input(src: &str, input: &[&str]) -> Vec<String> {
    let host = ScriptedHost::new(input.iter().map(|s| s.to_string()));
    glyph_lang::run_str("test.gl", src, &host).unwrap_or_else(|e| panic!("program should run to completion: {e}"));
    host.output_lines()
}

/// Run `src`, expecting it to abort. Returns the error kind (panics if it
/// parsed fine but the error wasn't a runtime one, or if it unexpectedly
/// succeeded) together with whatever output was emitted before the abort.
#[allow(dead_code)]
pub fn run_err(src: &str) -> (ErrorKind, Vec<String>) {
    let host = ScriptedHost::default();
    let result = glyph_lang::run_str("test.gl", src, &host);
    let err = result.expect_err("program should fail");
    let kind = match err {
        GlyphError::Runtime(e) => e.kind,
        GlyphError::Parse(msg, pos) => panic!("expected a runtime error, got a parse error: {msg} at {pos:?}"),
    };
    (kind, host.output_lines())
}
