pub mod annotation_ops;
pub mod keyword_search;
pub mod passage_crud;
pub mod passage_search;
pub mod vector_search;
