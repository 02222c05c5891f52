//! XML parsing and navigation.

mod document;
mod select;
mod utils;

pub use document::parse_document;
pub use select::NodeMatch;
pub use utils::{
    element_children, find_children, first_element_child, get_attribute, get_tag_name, has_tag,
    select_path, subtree_text, text_content,
};
