use serde::{Deserialize, Serialize};

use super::errors::{ProofError, ProofResult};
use super::types::Bytes32;
use crate::abi::{word_to_bool, word_to_u64, word_to_u8, ParamType, Token};
use crate::hash::iavl_inner_hash;

/// One step from a node towards the IAVL root.
///
/// `is_data_on_right` is true when the node being proven is the right child,
/// i.e. the sibling sits on the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IavlMerklePath {
    pub is_data_on_right: bool,
    pub subtree_height: u8,
    pub subtree_size: u64,
    pub subtree_version: u64,
    pub sibling_hash: Bytes32,
}

impl IavlMerklePath {
    /// Hash of the parent node whose other child is `child`.
    ///
    /// Fails when the subtree size or version does not fit the `int64`
    /// the tree stores.
    pub fn parent_hash(&self, child: &Bytes32) -> ProofResult<Bytes32> {
        let (left, right) = if self.is_data_on_right {
            (&self.sibling_hash, child)
        } else {
            (child, &self.sibling_hash)
        };
        Ok(Bytes32::new(iavl_inner_hash(
            self.subtree_height,
            tree_int("subtree_size", self.subtree_size)?,
            tree_int("subtree_version", self.subtree_version)?,
            left.as_bytes(),
            right.as_bytes(),
        )))
    }

    /// Rejects sizes and versions outside the `int64` range.
    pub fn check_range(&self) -> ProofResult<()> {
        tree_int("subtree_size", self.subtree_size)?;
        tree_int("subtree_version", self.subtree_version)?;
        Ok(())
    }

    /// Static tuple `(bool, uint8, uint64, uint64, bytes32)`.
    pub fn encode_token(&self) -> Token {
        Token::Tuple(vec![
            Token::bool(self.is_data_on_right),
            Token::uint(self.subtree_height),
            Token::uint(self.subtree_size),
            Token::uint(self.subtree_version),
            self.sibling_hash.to_token(),
        ])
    }

    /// Decode schema matching [`IavlMerklePath::encode_token`].
    pub fn param_type() -> ParamType {
        ParamType::Tuple(vec![
            ParamType::Bool,
            ParamType::Uint(8),
            ParamType::Uint(64),
            ParamType::Uint(64),
            ParamType::FixedBytes(32),
        ])
    }

    /// Rebuilds a path step from a decoded tuple.
    pub fn from_token(token: Token) -> ProofResult<Self> {
        let members = token.into_tuple()?;
        let [on_right, height, size, version, sibling] = members.as_slice() else {
            return Err(ProofError::UnexpectedLayout {
                field: "merkle_path",
            });
        };
        Ok(Self {
            is_data_on_right: word_to_bool(on_right.as_word()?)?,
            subtree_height: word_to_u8(height.as_word()?)?,
            subtree_size: word_to_u64(size.as_word()?)?,
            subtree_version: word_to_u64(version.as_word()?)?,
            sibling_hash: Bytes32::from_word(sibling.as_word()?),
        })
    }
}

/// Folds `leaf` through `paths`, leaf sibling first.
pub fn fold_path(leaf: &Bytes32, paths: &[IavlMerklePath]) -> ProofResult<Bytes32> {
    paths
        .iter()
        .try_fold(*leaf, |current, step| step.parent_hash(&current))
}

/// Converts a `u64` wire value into the `int64` IAVL nodes commit to.
pub(crate) fn tree_int(field: &'static str, value: u64) -> ProofResult<i64> {
    i64::try_from(value).map_err(|_| ProofError::ValueOutOfRange { field, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(is_data_on_right: bool) -> IavlMerklePath {
        IavlMerklePath {
            is_data_on_right,
            subtree_height: 1,
            subtree_size: 2,
            subtree_version: 180,
            sibling_hash: Bytes32::new([0x10; 32]),
        }
    }

    #[test]
    fn side_selects_argument_order() {
        let child = Bytes32::new([0x20; 32]);
        let right = step(true).parent_hash(&child).unwrap();
        let left = step(false).parent_hash(&child).unwrap();
        assert_ne!(left, right);
        assert_eq!(
            right.into_bytes(),
            iavl_inner_hash(1, 2, 180, &[0x10; 32], &[0x20; 32])
        );
    }

    #[test]
    fn empty_path_is_the_leaf() {
        let leaf = Bytes32::new([7; 32]);
        assert_eq!(fold_path(&leaf, &[]).unwrap(), leaf);
    }

    #[test]
    fn version_past_int64_is_rejected() {
        let mut wide = step(true);
        wide.subtree_version = 1 << 63;
        assert_eq!(
            wide.parent_hash(&Bytes32::ZERO),
            Err(ProofError::ValueOutOfRange {
                field: "subtree_version",
                value: 1 << 63
            })
        );
        assert_eq!(wide.check_range(), wide.parent_hash(&Bytes32::ZERO).map(|_| ()));

        wide.subtree_version = i64::MAX as u64;
        assert!(wide.parent_hash(&Bytes32::ZERO).is_ok());
    }

    #[test]
    fn path_step_is_five_static_words() {
        let token = step(true).encode_token();
        assert!(!token.is_dynamic());
        assert_eq!(token.head_len(), 160);
        assert_eq!(IavlMerklePath::from_token(token).unwrap(), step(true));
    }
}
