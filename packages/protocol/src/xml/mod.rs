//! XML utilities.

mod utils;

pub use utils::{
    attribute_or_empty, child_text, descendants_with_tag, find_by_path, find_child,
    find_children, find_descendant, get_tag_name, get_text, has_class, has_tag, parse_document,
    CLASS_ATTRIBUTE,
};
