mod editing;
mod harness;
mod playback;
mod traversal;

use graphwalk::VERSION;

#[test]
fn scenarios_binary_smoke_runs() {
    assert!(!VERSION.is_empty());
}
