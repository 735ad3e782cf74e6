pub mod annotation_kind;
