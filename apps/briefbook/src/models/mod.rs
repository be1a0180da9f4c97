pub mod book;
pub mod presentation;

pub use book::{Book, BookPage};
pub use presentation::{Presentation, Presenter};
