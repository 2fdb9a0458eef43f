//! Versioned binary form of a [`StubTree`].
//!
//! Layout: a [`Header`] (`b"JSTB"` and a format version), then the stubs
//! as a flat pre-order list of [`StubRecord`]s, all encoded with `bincode`.
//! Each record names its parent by pre-order index, so decoding rebuilds
//! the tree without the source text.

use jpsi_ir::ElementType;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::flags::StubFlags;
use crate::stub::{StubId, StubNode, StubTree};

pub const MAGIC: [u8; 4] = *b"JSTB";

/// Bumped whenever the record layout or the meaning of a flag changes.
pub const FORMAT_VERSION: u16 = 1;

/// Parent index of the root record.
const NO_PARENT: u32 = u32::MAX;

#[derive(Debug, thiserror::Error)]
pub enum StubSerializationError {
    #[error("not a stub file (bad magic)")]
    BadMagic,
    #[error("unsupported stub format version {found}")]
    UnsupportedVersion { found: u16 },
    #[error("unknown element type tag {0}")]
    UnknownElementType(u8),
    #[error("record {index} has a parent that is not on the current path")]
    DanglingParent { index: usize },
    #[error("empty stub stream")]
    Empty,
    #[error(transparent)]
    Codec(#[from] bincode::Error),
}

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    magic: [u8; 4],
    version: u16,
}

#[derive(Debug, Serialize, Deserialize)]
struct StubRecord {
    tag: u8,
    parent: u32,
    flags: u32,
    name: Option<String>,
    texts: Vec<String>,
}

impl StubRecord {
    fn from_stub(node: &StubNode) -> Self {
        StubRecord {
            tag: node.kind().tag(),
            parent: node.parent().map_or(NO_PARENT, StubId::raw),
            flags: node.flags().bits(),
            name: node.name().map(str::to_owned),
            texts: node.texts().to_vec(),
        }
    }

    fn into_stub(self) -> Result<StubNode, StubSerializationError> {
        let kind = ElementType::from_tag(self.tag)
            .ok_or(StubSerializationError::UnknownElementType(self.tag))?;
        Ok(StubNode::new(kind)
            .with_flags(StubFlags::from_bits_retain(self.flags))
            .with_name(self.name)
            .with_texts(self.texts))
    }
}

/// Encode `tree` into a fresh buffer.
#[tracing::instrument(level = "debug", skip_all, fields(stubs = tree.len()))]
pub fn serialize_stub_tree(tree: &StubTree) -> Result<Vec<u8>, StubSerializationError> {
    let header = Header {
        magic: MAGIC,
        version: FORMAT_VERSION,
    };
    let records: Vec<StubRecord> = tree
        .iter()
        .map(|(_, node)| StubRecord::from_stub(node))
        .collect();
    let mut bytes = bincode::serialize(&header)?;
    bincode::serialize_into(&mut bytes, &records)?;
    debug!(bytes = bytes.len(), "serialized stubs");
    Ok(bytes)
}

/// Decode a tree written by [`serialize_stub_tree`].
#[tracing::instrument(level = "debug", skip_all, fields(bytes = bytes.len()))]
pub fn deserialize_stub_tree(bytes: &[u8]) -> Result<StubTree, StubSerializationError> {
    let mut reader = bytes;
    let header: Header = bincode::deserialize_from(&mut reader)?;
    if header.magic != MAGIC {
        return Err(StubSerializationError::BadMagic);
    }
    if header.version != FORMAT_VERSION {
        return Err(StubSerializationError::UnsupportedVersion {
            found: header.version,
        });
    }
    let records: Vec<StubRecord> = bincode::deserialize_from(&mut reader)?;
    let tree = rebuild(records)?;
    debug!(stubs = tree.len(), "deserialized stubs");
    Ok(tree)
}

/// Relink records, checking that every parent is on the current pre-order
/// path.
fn rebuild(records: Vec<StubRecord>) -> Result<StubTree, StubSerializationError> {
    let mut records = records.into_iter().enumerate();
    let (_, root) = records.next().ok_or(StubSerializationError::Empty)?;
    if root.parent != NO_PARENT {
        return Err(StubSerializationError::DanglingParent { index: 0 });
    }
    let mut tree = StubTree::new(root.into_stub()?);
    let mut path = vec![tree.root()];
    for (index, record) in records {
        let parent = record.parent;
        while path.last().is_some_and(|top| top.raw() != parent) {
            path.pop();
        }
        let Some(&parent) = path.last() else {
            return Err(StubSerializationError::DanglingParent { index });
        };
        let id = tree.push(parent, record.into_stub()?);
        path.push(id);
    }
    Ok(tree)
}
