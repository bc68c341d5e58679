//! Add two numbers.

use crate::config::KeyStore;
use crate::error::{CommandError, CommandResult};
use std::io::Write;

/// Print `left + right = sum`, in uppercase hex when `hex` resolves true.
pub fn run(store: &KeyStore, out: &mut dyn Write) -> CommandResult {
    let left = store.get_int("left")?;
    let right = store.get_int("right")?;
    let sum = left
        .checked_add(right)
        .ok_or(CommandError::Overflow { left, right })?;

    if store.get_bool("hex")? {
        writeln!(out, "{} + {} = {}", hex(left), hex(right), hex(sum))?;
    } else {
        writeln!(out, "{left} + {right} = {sum}")?;
    }
    Ok(())
}

/// Signed uppercase hex, `-A` rather than the two's complement bits.
fn hex(n: i64) -> String {
    if n < 0 {
        format!("-{:X}", n.unsigned_abs())
    } else {
        format!("{n:X}")
    }
}
