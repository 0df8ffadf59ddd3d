pub(crate) mod dfs;
pub mod dominators;
pub mod error;
pub(crate) mod forest;
pub mod graph;
pub(crate) mod spanning_tree;
pub mod vertex;


pub use dominators::DomTree;
pub use error::DomError;
pub use graph::Graph;
pub use vertex::Vertex;
