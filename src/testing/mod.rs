pub mod ports;

#[allow(unused_imports)]
pub use ports::FakeHost;
#[allow(unused_imports)]
pub use ports::FakeModels;
#[allow(unused_imports)]
pub use ports::FakeNetwork;
#[allow(unused_imports)]
pub use ports::FakeRuntime;
#[allow(unused_imports)]
pub use ports::FakeStore;
