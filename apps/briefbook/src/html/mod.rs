// Permissive HTML handling for presentation descriptions.

pub mod blocks;

pub use blocks::{
    extract_text, is_block_tag, sanitize_whitespace, split_blocks, split_child_nodes, Block,
    BlockKind, SplitBlock,
};
