mod fake_host;
mod fake_network;
mod fake_runtime;
mod fake_store;

pub use fake_host::{FakeHost, FakeModels};
pub use fake_network::FakeNetwork;
pub use fake_runtime::FakeRuntime;
pub use fake_store::FakeStore;
