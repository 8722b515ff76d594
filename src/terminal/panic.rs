//! Panic hook that restores the terminal before the message prints.

use super::setup::emergency_restore;
use std::panic;

/// Install the hook. Call before creating the `TerminalManager`.
pub fn setup_panic_hook() {
    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        emergency_restore();
        original_hook(panic_info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_panic_hook_does_not_panic() {
        setup_panic_hook();
        // Put the default hook back for the other tests.
        let _ = panic::take_hook();
    }
}
