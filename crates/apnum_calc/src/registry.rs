//! Process-wide calculator selection.
//!
//! A single-assignment cell: the first writer wins, and the first reader of
//! an unset cell triggers autodetection. Reads after initialization are plain
//! shared references with no further synchronization.

use crate::bigint::BigintCalculator;
use crate::calculator::Calculator;
use crate::portable::PortableCalculator;
use std::sync::OnceLock;
use tracing::{debug, warn};

pub static PORTABLE: PortableCalculator = PortableCalculator;
pub static BIGINT: BigintCalculator = BigintCalculator;

static ACTIVE: OnceLock<&'static dyn Calculator> = OnceLock::new();

/// Install a calculator for the whole process. Idempotent: only the first
/// call takes effect; returns whether this call won. Expected at startup or
/// from tests.
pub fn set_calculator(calc: &'static dyn Calculator) -> bool {
    let won = ACTIVE.set(calc).is_ok();
    if won {
        debug!(backend = calc.name(), "calculator selected");
    }
    won
}

/// The active calculator, autodetecting on first use.
pub fn calculator() -> &'static dyn Calculator {
    *ACTIVE.get_or_init(|| {
        let calc = autodetect();
        debug!(backend = calc.name(), "calculator autodetected");
        calc
    })
}

fn autodetect() -> &'static dyn Calculator {
    match std::env::var("APNUM_CALCULATOR").ok().as_deref() {
        Some("portable") => &PORTABLE,
        Some("bigint") => &BIGINT,
        Some(other) => {
            warn!(value = other, "unknown APNUM_CALCULATOR value, using default");
            &BIGINT
        }
        None => &BIGINT,
    }
}
