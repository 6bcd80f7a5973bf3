#![allow(dead_code)]

pub mod game_builders;

use std::sync::Once;

#[allow(unused_imports)]
pub use game_builders::{lead_full_trick, suit_hand, suit_per_seat_game};

static TRACING: Once = Once::new();

/// Installs the env-filtered log subscriber once per test binary, so
/// instrumented store and adapter spans show up under RUST_LOG.
pub fn init_tracing() {
    TRACING.call_once(|| {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "klaverjas=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .init();
    });
}
