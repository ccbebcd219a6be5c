pub mod network;
pub mod diagnostics;
pub mod topology;

pub use network::Network;
pub use diagnostics::WorstEntry;
pub use topology::NetworkTopology;
