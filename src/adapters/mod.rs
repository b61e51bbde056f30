mod bounded_command;
pub mod deployment_filesystem;
pub mod docker_cli;
pub mod host_resources;
pub mod network_probe;
pub mod ollama_models;

pub use deployment_filesystem::FilesystemDeploymentStore;
pub use docker_cli::DockerCli;
pub use host_resources::SysinfoHostResources;
pub use network_probe::TcpHttpProbe;
pub use ollama_models::OllamaModels;
