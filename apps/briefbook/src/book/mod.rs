// Book assembly and reader-side navigation.

pub mod assembler;
pub mod cursor;

pub use assembler::{assemble_books, NO_DESCRIPTION_PLACEHOLDER};
pub use cursor::ShelfCursor;
