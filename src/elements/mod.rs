mod edge;
mod ids;
mod state;
mod vertex;

pub use self::edge::{Edge, DEFAULT_CAPACITY, DEFAULT_WEIGHT};
pub use self::ids::{EdgeId, ElementRef, IdAllocator, VertexId};
pub use self::state::ElementState;
pub use self::vertex::Vertex;
