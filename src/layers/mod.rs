pub mod host;

pub use host::{
    ReaderFn, get_reader, is_supported_path, read_layers, read_layers_default,
    read_layers_with_summary,
};
