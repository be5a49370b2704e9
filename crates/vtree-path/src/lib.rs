//! # vtree-path — path grammar and mutation wire-format codec
//!
//! Two independent, pure concerns live here:
//!
//! - [`grammar`] — the path grammar (`/` | (`/` component)+) and
//!   split/join between a path string and its components.
//! - [`codec`] — the mutation wire format (`"<rev>:<path>=<body>"`,
//!   `"<rev>:<path>"`, `"nop:"`) that consensus hands the apply loop.
//!
//! Neither module touches the tree; they are the boundary between wire
//! strings and the typed values the tree and the apply loop operate on.

pub mod codec;
pub mod grammar;

pub use codec::{Decoded, decode, encode_del, encode_set, is_nop};
pub use grammar::{check_path, join, split};
