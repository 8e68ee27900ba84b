mod event;
mod sink;

pub use event::{
    Event, PayloadDelete, PayloadEdgeCreate, PayloadModeChange, PayloadPick,
    PayloadPlaybackStep, PayloadResultInstall, PayloadVertexCreate, PayloadVertexMove,
    PayloadViewportResize,
};

pub use sink::{EventSink, FnSink};
