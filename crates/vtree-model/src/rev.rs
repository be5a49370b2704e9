//! Revision and sequence number sentinels.
//!
//! `Rev` stamps every tree node with either the `Seqn` of the mutation that
//! wrote it, or one of a small set of reserved negative sentinels. `Seqn` is
//! the monotonically increasing sequence number a consensus layer assigns to
//! each mutation; this crate never constructs one, it only orders and
//! compares values handed to it.

/// A tree node's revision stamp, or a reserved sentinel.
pub type Rev = i64;

/// A mutation's position in the totally-ordered stream assigned by consensus.
pub type Seqn = i64;

/// The path does not exist (or was never written).
pub const MISSING: Rev = 0;

/// Precondition sentinel: bypass the revision check entirely.
pub const CLOBBER: Rev = -1;

/// The path currently resolves to a directory.
pub const DIR: Rev = -2;

/// Sentinel `Rev` stamped on the event produced by a no-op mutation.
pub const NOP: Rev = -3;

/// The well-known path that failed mutations are rewritten to land on.
pub const ERR_PATH: &str = "/ctl/err";

/// The literal wire form of a no-op mutation.
pub const NOP_MUT: &str = "nop:";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_are_negative_and_distinct() {
        let sentinels = [CLOBBER, DIR, NOP];
        assert!(sentinels.iter().all(|&r| r < 0));
        for (i, a) in sentinels.iter().enumerate() {
            for b in &sentinels[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(MISSING, 0);
    }
}
