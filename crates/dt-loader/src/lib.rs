mod document;
mod template;

pub use document::{
    graph_to_value, load_graph_from_str, load_graph_from_value, serialize_graph, DialogueDocument,
    DEFAULT_SCHEMA_VERSION,
};
pub use template::{new_document_template, TemplateOptions};
