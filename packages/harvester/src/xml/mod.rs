//! XML utilities.

mod utils;

pub use utils::{
    child_text, element_children, find_by_path_ns, find_child, find_children_ns, get_attribute,
    get_tag_name, text_content,
};
