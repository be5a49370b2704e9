//! Mutation wire format: `"<rev>:<path>=<body>"` (set), `"<rev>:<path>"` (delete),
//! `"nop:"` (no-op).

use vtree_model::{NOP_MUT, Rev, StoreError, StoreResult};

use crate::grammar::check_path;

/// A decoded mutation: either a set (`keep = true`) or a delete (`keep = false`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub path: String,
    pub body: String,
    pub rev: Rev,
    pub keep: bool,
}

/// Whether `mutation` is the literal no-op sentinel, handled specially by apply.
pub fn is_nop(mutation: &str) -> bool {
    mutation == NOP_MUT
}

/// Encodes a set mutation: `"<rev>:<path>=<body>"`.
pub fn encode_set(path: &str, body: &str, rev: Rev) -> StoreResult<String> {
    check_path(path)?;
    Ok(format!("{rev}:{path}={body}"))
}

/// Encodes a delete mutation: `"<rev>:<path>"`.
pub fn encode_del(path: &str, rev: Rev) -> StoreResult<String> {
    check_path(path)?;
    Ok(format!("{rev}:{path}"))
}

/// Decodes a (non-nop) mutation string.
///
/// `body` may itself contain `=`; only the first `=` in the tail after the
/// first `:` is treated as the set/body delimiter.
pub fn decode(mutation: &str) -> StoreResult<Decoded> {
    let (rev_str, tail) = mutation
        .split_once(':')
        .ok_or(StoreError::BadMutation { source: None })?;
    let rev: Rev = rev_str
        .parse()
        .map_err(|source| StoreError::BadMutation { source: Some(source) })?;

    let (path, body, keep) = match tail.split_once('=') {
        Some((path, body)) => (path, body, true),
        None => (tail, "", false),
    };
    check_path(path)?;

    Ok(Decoded {
        path: path.to_owned(),
        body: body.to_owned(),
        rev,
        keep,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use vtree_model::CLOBBER;

    #[test]
    fn encode_set_then_decode_round_trips() {
        let mutation = encode_set("/a/b", "hello=world", 7).unwrap();
        assert_eq!(mutation, "7:/a/b=hello=world");
        let decoded = decode(&mutation).unwrap();
        assert_eq!(decoded.path, "/a/b");
        assert_eq!(decoded.body, "hello=world");
        assert_eq!(decoded.rev, 7);
        assert!(decoded.keep);
    }

    #[test]
    fn encode_del_then_decode_round_trips() {
        let mutation = encode_del("/a/b", CLOBBER).unwrap();
        assert_eq!(mutation, "-1:/a/b");
        let decoded = decode(&mutation).unwrap();
        assert_eq!(decoded.path, "/a/b");
        assert_eq!(decoded.body, "");
        assert_eq!(decoded.rev, CLOBBER);
        assert!(!decoded.keep);
    }

    #[test]
    fn decode_rejects_missing_colon() {
        let err = decode("1/a/b").unwrap_err();
        assert!(matches!(err, StoreError::BadMutation { source: None }));
    }

    #[test]
    fn decode_rejects_non_integer_revision() {
        let err = decode("x:/a").unwrap_err();
        assert!(matches!(err, StoreError::BadMutation { source: Some(_) }));
    }

    #[test]
    fn decode_rejects_invalid_path() {
        assert_eq!(decode("1:a/b"), Err(StoreError::BadPath));
    }

    #[test]
    fn decode_allows_empty_body() {
        let decoded = decode("1:/a/b=").unwrap();
        assert_eq!(decoded.path, "/a/b");
        assert_eq!(decoded.body, "");
        assert!(decoded.keep);
    }

    #[test]
    fn nop_literal_is_recognized() {
        assert!(is_nop("nop:"));
        assert!(!is_nop("nop:extra"));
        assert!(!is_nop("0:/x"));
    }

    #[test]
    fn encode_rejects_invalid_path() {
        assert_eq!(encode_set("bad", "body", 1), Err(StoreError::BadPath));
        assert_eq!(encode_del("bad", 1), Err(StoreError::BadPath));
    }
}
